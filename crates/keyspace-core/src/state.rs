use crate::bitting::{admits_next, Depth, LastTwo};

/// Per-depth usage counts of a partial bitting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrequencyTable(Box<[u32]>);

impl FrequencyTable {
    pub fn zeros(depths: usize) -> Self {
        Self(vec![0; depths].into_boxed_slice())
    }

    pub fn counts(&self) -> &[u32] {
        &self.0
    }

    pub fn used(&self) -> usize {
        self.0.iter().map(|&f| f as usize).sum()
    }

    pub fn incremented(&self, depth: Depth) -> Self {
        let mut next = self.0.clone();
        next[depth] += 1;
        Self(next)
    }
}

/// A node of the level graph: what has been used, and how the key ends.
/// Keys sharing a state have identical sets of legal completions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    pub freqs: FrequencyTable,
    pub tail: LastTwo,
}

impl State {
    pub fn initial(depths: usize) -> Self {
        Self {
            freqs: FrequencyTable::zeros(depths),
            tail: LastTwo::default(),
        }
    }

    /// All states reachable by appending one admitted cut.
    pub fn successors(
        &self,
        positions: usize,
        macs: usize,
    ) -> impl Iterator<Item = State> + '_ {
        let depths = self.freqs.counts().len();
        (0..depths)
            .filter(move |&b| admits_next(self.freqs.counts(), self.tail, b, positions, macs))
            .map(move |b| State {
                freqs: self.freqs.incremented(b),
                tail: self.tail.push(b),
            })
    }
}
