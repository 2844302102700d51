use super::{KeyCounter, Method};
use crate::bitting::{admits_next, Bitting, Depth, LastTwo};
use crate::config::{KeyspaceParams, SamplingParams};
use crate::error::KsResult;
use crate::sampling::Reservoir;
use num_bigint::BigUint;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder, Debug, Clone)]
pub struct PrefixSearch {
    pub params: KeyspaceParams,
    #[builder(default)]
    pub sampling: SamplingParams,
}

#[derive(Debug, Clone)]
pub struct PrefixSearchOutcome {
    pub legal: BigUint,
    pub samples: Vec<Bitting>,
}

/// One subtree of the search: every key starting with a fixed first cut.
/// Owns its scratch prefix, depth counts and reservoir.
struct Branch<'a> {
    params: &'a KeyspaceParams,
    prefix: Bitting,
    freqs: Vec<u32>,
    legal: u64,
    reservoir: Reservoir,
}

impl<'a> Branch<'a> {
    fn new(params: &'a KeyspaceParams, reservoir: Reservoir) -> Self {
        Self {
            params,
            prefix: Vec::with_capacity(params.positions),
            freqs: vec![0; params.depths],
            legal: 0,
            reservoir,
        }
    }

    fn tail(&self) -> LastTwo {
        LastTwo::of(&self.prefix[self.prefix.len().saturating_sub(2)..])
    }

    fn try_extend(&mut self, next: Depth) {
        let p = self.params;
        if !admits_next(&self.freqs, self.tail(), next, p.positions, p.macs) {
            return;
        }
        self.prefix.push(next);
        self.freqs[next] += 1;

        if self.prefix.len() == p.positions {
            self.legal += 1;
            self.reservoir.offer(&self.prefix);
        } else {
            for b in 0..p.depths {
                self.try_extend(b);
            }
        }

        self.freqs[next] -= 1;
        self.prefix.pop();
    }
}

impl PrefixSearch {
    /// Depth-first enumeration with per-cut pruning. Subtrees rooted at each
    /// first cut run in parallel.
    pub fn run(&self) -> KsResult<PrefixSearchOutcome> {
        let params = &self.params;
        params.validate()?;

        let sample_size = self.sampling.sample_size;
        if params.positions == 0 {
            let samples = if sample_size > 0 { vec![Vec::new()] } else { Vec::new() };
            return Ok(PrefixSearchOutcome {
                legal: BigUint::from(1u32),
                samples,
            });
        }

        let start = Instant::now();
        let seed = self.sampling.seed;
        let branches: Vec<(u64, Reservoir)> = (0..params.depths)
            .into_par_iter()
            .map(|first| {
                let reservoir = Reservoir::new(sample_size, seed.wrapping_add(first as u64));
                let mut branch = Branch::new(params, reservoir);
                branch.try_extend(first);
                debug!("Prefix branch {}: {} keys", first, branch.legal);
                (branch.legal, branch.reservoir)
            })
            .collect();

        let legal: u64 = branches.iter().map(|(count, _)| count).sum();
        let reservoirs: Vec<Reservoir> = branches.into_iter().map(|(_, r)| r).collect();
        let merge_seed = seed.wrapping_add(params.depths as u64);
        let samples = Reservoir::merge(reservoirs, sample_size, merge_seed);

        info!(
            "Prefix search ({}): {} keys in {:.2?}",
            params,
            legal,
            start.elapsed()
        );
        Ok(PrefixSearchOutcome {
            legal: BigUint::from(legal),
            samples,
        })
    }
}

/// Counting-only view of [`PrefixSearch`].
pub struct PrefixSearchCounter;

impl KeyCounter for PrefixSearchCounter {
    fn method(&self) -> Method {
        Method::Prefix
    }

    fn count(&self, params: &KeyspaceParams) -> KsResult<BigUint> {
        let outcome = PrefixSearch::builder().params(*params).build().run()?;
        Ok(outcome.legal)
    }
}
