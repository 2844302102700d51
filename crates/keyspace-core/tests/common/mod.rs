#![allow(dead_code)]

use keyspace_core::config::KeyspaceParams;
use keyspace_core::BigUint;

pub fn big(value: u64) -> BigUint {
    BigUint::from(value)
}

/// Every (n, d, macs) with `macs < d` whose full product stays under `limit`.
pub fn small_grid(max_positions: usize, max_depths: usize, limit: u64) -> Vec<KeyspaceParams> {
    let mut grid = Vec::new();
    for n in 0..=max_positions {
        for d in 1..=max_depths {
            for macs in 0..d {
                let params = KeyspaceParams::new(n, d, macs);
                if params.sequence_space().is_some_and(|s| s <= limit) {
                    grid.push(params);
                }
            }
        }
    }
    grid
}
