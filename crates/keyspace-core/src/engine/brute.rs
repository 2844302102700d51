use super::{KeyCounter, Method};
use crate::bitting::{is_legal, Bitting};
use crate::config::KeyspaceParams;
use crate::error::KsResult;
use itertools::Itertools;
use num_bigint::BigUint;
use num_traits::One;
use std::time::Instant;
use tracing::{info, warn};

/// Reference oracle: walks all `d^n` sequences and keeps the legal ones.
/// Only meant for small keys.
pub struct BruteForceOracle;

impl BruteForceOracle {
    /// Every legal bitting, in lexicographic order.
    pub fn legal_bittings(params: &KeyspaceParams) -> KsResult<Vec<Bitting>> {
        params.validate()?;
        if params.positions == 0 {
            return Ok(vec![Vec::new()]);
        }

        let macs = params.macs;
        Ok(all_sequences(params)
            .filter(|bitting| is_legal(bitting, macs))
            .collect())
    }
}

fn all_sequences(params: &KeyspaceParams) -> impl Iterator<Item = Bitting> {
    let depths = params.depths;
    (0..params.positions)
        .map(move |_| 0..depths)
        .multi_cartesian_product()
}

impl KeyCounter for BruteForceOracle {
    fn method(&self) -> Method {
        Method::Brute
    }

    fn count(&self, params: &KeyspaceParams) -> KsResult<BigUint> {
        params.validate()?;
        if params.positions == 0 {
            return Ok(BigUint::one());
        }
        if !params.within_brute_force_limit() {
            warn!(
                "Brute force over {} walks more than the recommended number of sequences",
                params
            );
        }

        let start = Instant::now();
        let macs = params.macs;
        let legal = all_sequences(params)
            .filter(|bitting| is_legal(bitting, macs))
            .count();

        info!(
            "Brute force ({}): {} keys in {:.2?}",
            params,
            legal,
            start.elapsed()
        );
        Ok(BigUint::from(legal))
    }
}
