use super::{KeyCounter, LevelObserver, Method, SilentObserver};
use crate::config::KeyspaceParams;
use crate::error::KsResult;
use crate::state::State;
use fnv::FnvHashMap;
use num_bigint::BigUint;
use num_traits::One;
use std::time::Instant;
use tracing::{debug, info};

/// Number of distinct partial keys ending in each state, for one length.
pub type LevelTable = FnvHashMap<State, BigUint>;

/// Counts keys under the full rule set by expanding the state graph one
/// cut at a time and accumulating path counts per state.
pub struct StateSpaceCounter<O: LevelObserver = SilentObserver> {
    observer: O,
}

impl StateSpaceCounter {
    pub fn new() -> Self {
        Self {
            observer: SilentObserver,
        }
    }
}

impl Default for StateSpaceCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: LevelObserver> StateSpaceCounter<O> {
    pub fn with_observer<P: LevelObserver>(self, observer: P) -> StateSpaceCounter<P> {
        StateSpaceCounter { observer }
    }

    /// Runs all `positions` levels and returns the final table.
    pub fn final_level(&self, params: &KeyspaceParams) -> KsResult<LevelTable> {
        params.validate()?;

        let mut table = LevelTable::default();
        table.insert(State::initial(params.depths), BigUint::one());

        for level in 1..=params.positions {
            table = expand_level(table, params.positions, params.macs);
            debug!("Level {}/{}: {} states", level, params.positions, table.len());
            self.observer
                .on_level(level, params.positions, table.len());

            if table.is_empty() {
                debug!("State graph collapsed at level {}", level);
                break;
            }
        }

        Ok(table)
    }
}

/// Derives the next level from `level`, which is consumed.
///
/// A successor's count is the sum over every predecessor that reaches it.
pub fn expand_level(level: LevelTable, positions: usize, macs: usize) -> LevelTable {
    let mut next = LevelTable::default();
    for (state, paths) in &level {
        for successor in state.successors(positions, macs) {
            *next.entry(successor).or_default() += paths;
        }
    }
    next
}

impl<O: LevelObserver> KeyCounter for StateSpaceCounter<O> {
    fn method(&self) -> Method {
        Method::StateSpace
    }

    fn count(&self, params: &KeyspaceParams) -> KsResult<BigUint> {
        let start = Instant::now();
        let table = self.final_level(params)?;
        let total: BigUint = table.values().sum();

        info!(
            "State space ({}): {} keys from {} final states in {:.2?}",
            params,
            total,
            table.len(),
            start.elapsed()
        );
        Ok(total)
    }
}
