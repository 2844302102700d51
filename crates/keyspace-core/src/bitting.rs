//! The legality rules for a bitting (a sequence of cut depths).
//!
//! Two formulations live here: the whole-sequence predicate [`is_legal`],
//! which the exhaustive oracle applies after the fact, and the step rule
//! [`admits_next`], which the search engines apply while a prefix grows.
//! A bitting is legal exactly when every one of its extension steps is
//! admitted.

use itertools::Itertools;

/// One cut depth, in `0..depths`.
pub type Depth = usize;

/// A full or partial key.
pub type Bitting = Vec<Depth>;

/// The trailing two cuts of a partial bitting, `None` until that many exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LastTwo {
    pub prev: Option<Depth>,
    pub last: Option<Depth>,
}

impl LastTwo {
    pub fn push(self, next: Depth) -> Self {
        Self {
            prev: self.last,
            last: Some(next),
        }
    }

    pub fn of(prefix: &[Depth]) -> Self {
        prefix
            .iter()
            .fold(Self::default(), |tail, &depth| tail.push(depth))
    }
}

/// True when a depth used `freq` times takes more than half of a key with
/// `positions` cuts. `2f > n` is `f > n/2` without rounding.
#[inline(always)]
pub fn exceeds_half(freq: usize, positions: usize) -> bool {
    2 * freq > positions
}

pub fn respects_macs(bitting: &[Depth], macs: usize) -> bool {
    bitting.windows(2).all(|w| w[0].abs_diff(w[1]) <= macs)
}

pub fn has_triple_repeat(bitting: &[Depth]) -> bool {
    bitting.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// No depth accounts for more than half of the cuts.
pub fn within_frequency_cap(bitting: &[Depth]) -> bool {
    bitting
        .iter()
        .counts()
        .values()
        .all(|&f| !exceeds_half(f, bitting.len()))
}

/// Whole-sequence legality: frequency cap, MACS and no three equal cuts in a row.
pub fn is_legal(bitting: &[Depth], macs: usize) -> bool {
    within_frequency_cap(bitting) && respects_macs(bitting, macs) && !has_triple_repeat(bitting)
}

/// Whether `next` may be appended to a prefix ending in `tail` whose depth
/// counts are `freqs`, for a key that will finally have `positions` cuts.
///
/// The frequency cap is measured against the final length, never the
/// current prefix length.
#[inline]
pub fn admits_next(
    freqs: &[u32],
    tail: LastTwo,
    next: Depth,
    positions: usize,
    macs: usize,
) -> bool {
    if tail.prev == Some(next) && tail.last == Some(next) {
        return false;
    }
    if let Some(last) = tail.last {
        if last.abs_diff(next) > macs {
            return false;
        }
    }
    !exceeds_half(freqs[next] as usize + 1, positions)
}
