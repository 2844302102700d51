use crate::config::{KeyspaceParams, SamplingParams};
use crate::consts::PREFIX_SEARCH_LIMIT;
use crate::engine::{
    BruteForceOracle, KeyCounter, PrefixSearch, PrefixSearchCounter, PrefixSearchOutcome,
    StateSpaceCounter, TransferMatrixCounter,
};
use crate::error::KsResult;
use num_bigint::BigUint;
use rayon::prelude::*;
use tracing::{info, warn};

/// Keys of length `n` over `d` depths whose adjacent cuts differ by at most
/// `macs`. Ignores the frequency cap and the triple-repeat rule.
pub fn count_adjacency_only(n: usize, d: usize, macs: usize) -> KsResult<BigUint> {
    TransferMatrixCounter.count(&KeyspaceParams::new(n, d, macs))
}

/// Keys satisfying MACS, the half-length frequency cap and the ban on three
/// equal cuts in a row.
pub fn count_constrained(n: usize, d: usize, macs: usize) -> KsResult<BigUint> {
    StateSpaceCounter::new().count(&KeyspaceParams::new(n, d, macs))
}

/// Same quantity as [`count_constrained`] by exhaustive enumeration. Keep
/// `d^n` small.
pub fn count_brute(n: usize, d: usize, macs: usize) -> KsResult<BigUint> {
    BruteForceOracle.count(&KeyspaceParams::new(n, d, macs))
}

/// Same quantity as [`count_constrained`] by pruned depth-first search.
pub fn count_prefix(n: usize, d: usize, macs: usize) -> KsResult<BigUint> {
    PrefixSearchCounter.count(&KeyspaceParams::new(n, d, macs))
}

pub fn sample_legal(
    params: &KeyspaceParams,
    sampling: &SamplingParams,
) -> KsResult<PrefixSearchOutcome> {
    PrefixSearch::builder()
        .params(*params)
        .sampling(*sampling)
        .build()
        .run()
}

/// All engines evaluated on one parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossCheck {
    pub params: KeyspaceParams,
    pub adjacency_only: BigUint,
    pub constrained: BigUint,
    /// `None` when the MACS-only count is over the prefix search limit.
    pub prefix: Option<BigUint>,
    /// `None` when `d^n` is over the oracle limit.
    pub brute: Option<BigUint>,
}

impl CrossCheck {
    pub fn engines_agree(&self) -> bool {
        self.prefix
            .as_ref()
            .map_or(true, |p| *p == self.constrained)
            && self
                .brute
                .as_ref()
                .map_or(true, |b| *b == self.constrained)
    }

    pub fn adjacency_bounds(&self) -> bool {
        self.adjacency_only >= self.constrained
    }

    pub fn consistent(&self) -> bool {
        self.engines_agree() && self.adjacency_bounds()
    }
}

pub fn cross_check(params: &KeyspaceParams) -> KsResult<CrossCheck> {
    params.validate()?;

    let brute = if params.within_brute_force_limit() {
        Some(BruteForceOracle.count(params)?)
    } else {
        None
    };

    let adjacency_only = TransferMatrixCounter.count(params)?;
    let prefix = if adjacency_only <= BigUint::from(PREFIX_SEARCH_LIMIT) {
        Some(PrefixSearchCounter.count(params)?)
    } else {
        None
    };

    let check = CrossCheck {
        params: *params,
        adjacency_only,
        constrained: StateSpaceCounter::new().count(params)?,
        prefix,
        brute,
    };

    if !check.consistent() {
        warn!("Engines disagree for {}: {:?}", params, check);
    }
    Ok(check)
}

/// Cross-checks every `n <= max_positions`, `1 <= d <= max_depths`,
/// `macs < d`. Results come back in that nesting order.
pub fn sweep(max_positions: usize, max_depths: usize) -> KsResult<Vec<CrossCheck>> {
    let grid: Vec<KeyspaceParams> = (0..=max_positions)
        .flat_map(|n| (1..=max_depths).flat_map(move |d| (0..d).map(move |m| (n, d, m))))
        .map(KeyspaceParams::from)
        .collect();

    info!("Sweeping {} parameter sets", grid.len());
    grid.par_iter().map(cross_check).collect()
}
