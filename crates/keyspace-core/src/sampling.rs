//! Uniform sampling of legal keys while they are being enumerated.

use crate::bitting::{Bitting, Depth};

/// Keeps a uniform sample of at most `capacity` items from a stream of
/// unknown length (Algorithm R).
#[derive(Debug, Clone)]
pub struct Reservoir {
    capacity: usize,
    seen: u64,
    samples: Vec<Bitting>,
    rng: fastrand::Rng,
}

impl Reservoir {
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            capacity,
            seen: 0,
            samples: Vec::with_capacity(capacity.min(1024)),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn offer(&mut self, item: &[Depth]) {
        if self.capacity > 0 {
            if self.samples.len() < self.capacity {
                self.samples.push(item.to_vec());
            } else {
                let slot = self.rng.u64(0..=self.seen);
                if slot < self.capacity as u64 {
                    self.samples[slot as usize] = item.to_vec();
                }
            }
        }
        self.seen += 1;
    }

    pub fn seen(&self) -> u64 {
        self.seen
    }

    pub fn samples(&self) -> &[Bitting] {
        &self.samples
    }

    /// Combines reservoirs fed from disjoint streams into one uniform sample
    /// of the concatenated stream.
    ///
    /// Each slot is drawn from a source with probability proportional to the
    /// offers it saw that are not yet represented in the output.
    pub fn merge(parts: Vec<Reservoir>, capacity: usize, seed: u64) -> Vec<Bitting> {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut remaining: Vec<u64> = parts.iter().map(|p| p.seen).collect();
        let mut pools: Vec<Vec<Bitting>> = parts
            .into_iter()
            .map(|p| {
                let mut pool = p.samples;
                rng.shuffle(&mut pool);
                pool
            })
            .collect();

        let total: u64 = remaining.iter().sum();
        let take = (capacity as u64).min(total) as usize;
        let mut merged = Vec::with_capacity(take);

        for _ in 0..take {
            let left: u64 = remaining.iter().sum();
            let mut pick = rng.u64(0..left);
            let source = remaining
                .iter()
                .position(|&r| {
                    if pick < r {
                        true
                    } else {
                        pick -= r;
                        false
                    }
                })
                .unwrap_or(0);
            remaining[source] -= 1;
            if let Some(item) = pools[source].pop() {
                merged.push(item);
            }
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_then_caps() {
        let mut r = Reservoir::new(3, 7);
        for i in 0..10usize {
            r.offer(&[i]);
        }
        assert_eq!(r.seen(), 10);
        assert_eq!(r.samples().len(), 3);
        assert!(r.samples().iter().all(|s| s[0] < 10));
    }

    #[test]
    fn test_zero_capacity_only_counts() {
        let mut r = Reservoir::new(0, 1);
        r.offer(&[1, 2]);
        r.offer(&[2, 1]);
        assert_eq!(r.seen(), 2);
        assert!(r.samples().is_empty());
    }

    #[test]
    fn test_merge_respects_capacity_and_sources() {
        let mut a = Reservoir::new(4, 1);
        let mut b = Reservoir::new(4, 2);
        for i in 0..2usize {
            a.offer(&[0, i]);
        }
        for i in 0..50usize {
            b.offer(&[1, i]);
        }
        let merged = Reservoir::merge(vec![a, b], 4, 3);
        assert_eq!(merged.len(), 4);

        let mut unique = merged.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 4, "merge drew the same key twice");
    }

    #[test]
    fn test_merge_small_streams_keeps_everything() {
        let mut a = Reservoir::new(10, 1);
        let mut b = Reservoir::new(10, 2);
        a.offer(&[0]);
        b.offer(&[1]);
        b.offer(&[2]);
        let mut merged = Reservoir::merge(vec![a, b], 10, 9);
        merged.sort();
        assert_eq!(merged, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_sampling_is_roughly_uniform() {
        // 20 items, keep 5, 4000 trials: each item expected 1000 times.
        let mut hits = [0u32; 20];
        for trial in 0..4000u64 {
            let mut r = Reservoir::new(5, trial);
            for i in 0..20 {
                r.offer(&[i]);
            }
            for s in r.samples() {
                hits[s[0]] += 1;
            }
        }
        for (i, &h) in hits.iter().enumerate() {
            assert!((800..1200).contains(&h), "item {} sampled {} times", i, h);
        }
    }

    #[test]
    fn test_merge_of_uneven_streams_is_roughly_uniform() {
        // Streams of 2 and 50 keys merged down to 4: each of the 52 keys is
        // kept with probability 1/13, so 13000 trials expect 1000 hits each.
        // A merge that drew evenly from the two pools would favour the short
        // stream roughly sixfold.
        let mut hits = [0u32; 52];
        for trial in 0..13_000u64 {
            let mut short = Reservoir::new(4, trial);
            let mut long = Reservoir::new(4, trial ^ 0x5EED_0000);
            for i in 0..2 {
                short.offer(&[i]);
            }
            for i in 2..52 {
                long.offer(&[i]);
            }
            let merged = Reservoir::merge(vec![short, long], 4, trial.wrapping_mul(31));
            assert_eq!(merged.len(), 4);
            for s in &merged {
                hits[s[0]] += 1;
            }
        }
        for (i, &h) in hits.iter().enumerate() {
            assert!((800..1200).contains(&h), "key {} kept {} times", i, h);
        }
    }
}
