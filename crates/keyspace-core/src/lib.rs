pub mod api;
pub mod bitting;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod export;
pub mod sampling;
pub mod state;

pub use api::{count_adjacency_only, count_brute, count_constrained, count_prefix};
pub use num_bigint::BigUint;
