pub mod brute;
pub mod prefix;
pub mod state_space;
pub mod transfer;

pub use self::brute::BruteForceOracle;
pub use self::prefix::{PrefixSearch, PrefixSearchCounter, PrefixSearchOutcome};
pub use self::state_space::{LevelTable, StateSpaceCounter};
pub use self::transfer::{CountMatrix, TransferMatrixCounter};

use crate::config::KeyspaceParams;
use crate::error::KsResult;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Counting strategies. Only `Matrix` ignores the frequency cap and the
/// triple-repeat rule.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    Matrix,
    StateSpace,
    Brute,
    Prefix,
}

impl Method {
    pub fn enforces_all_rules(self) -> bool {
        !matches!(self, Method::Matrix)
    }

    pub fn description(self) -> &'static str {
        match self {
            Method::Matrix => "transfer matrix (MACS only)",
            Method::StateSpace => "level-synchronous state expansion",
            Method::Brute => "exhaustive oracle",
            Method::Prefix => "pruned depth-first search",
        }
    }

    pub fn counter(self) -> Box<dyn KeyCounter> {
        match self {
            Method::Matrix => Box::new(TransferMatrixCounter),
            Method::StateSpace => Box::new(StateSpaceCounter::new()),
            Method::Brute => Box::new(BruteForceOracle),
            Method::Prefix => Box::new(PrefixSearchCounter),
        }
    }
}

pub trait KeyCounter: Send + Sync {
    fn method(&self) -> Method;
    fn count(&self, params: &KeyspaceParams) -> KsResult<BigUint>;
}

/// Receives one call per completed level of the state-space expansion.
pub trait LevelObserver: Send + Sync {
    fn on_level(&self, level: usize, total_levels: usize, states: usize);
}

pub struct SilentObserver;

impl LevelObserver for SilentObserver {
    fn on_level(&self, _level: usize, _total_levels: usize, _states: usize) {}
}
