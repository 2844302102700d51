/// Upper bound on `d^n` for which the exhaustive oracle is run automatically
/// by `cross_check` and `sweep`.
pub const BRUTE_FORCE_LIMIT: u64 = 10_000_000;

/// Upper bound on the MACS-only count for which the prefix search, which
/// visits every legal key one by one, is run automatically.
pub const PREFIX_SEARCH_LIMIT: u64 = 100_000_000;

/// EN-1303 style reference: 14 cuts, 8 depths, MACS 6.
pub const EN1303_REFERENCE: (usize, usize, usize) = (14, 8, 6);

/// Smaller reference set: 10 cuts, 6 depths, MACS 4.
pub const COMPACT_REFERENCE: (usize, usize, usize) = (10, 6, 4);

/// Seed used by the reservoir sampler when none is supplied.
pub const DEFAULT_SAMPLE_SEED: u64 = 0xFEDE123;
