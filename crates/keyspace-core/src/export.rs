use crate::api::CrossCheck;
use crate::error::KsResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One CSV row of a sweep. Counts are decimal strings so they survive any
/// reader without overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepRecord {
    pub positions: usize,
    pub depths: usize,
    pub macs: usize,
    pub adjacency_only: String,
    pub constrained: String,
    pub prefix: Option<String>,
    pub brute: Option<String>,
    pub consistent: bool,
}

impl From<&CrossCheck> for SweepRecord {
    fn from(check: &CrossCheck) -> Self {
        Self {
            positions: check.params.positions,
            depths: check.params.depths,
            macs: check.params.macs,
            adjacency_only: check.adjacency_only.to_string(),
            constrained: check.constrained.to_string(),
            prefix: check.prefix.as_ref().map(|p| p.to_string()),
            brute: check.brute.as_ref().map(|b| b.to_string()),
            consistent: check.consistent(),
        }
    }
}

pub fn write_sweep_csv<P: AsRef<Path>>(path: P, checks: &[CrossCheck]) -> KsResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for check in checks {
        writer.serialize(SweepRecord::from(check))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_sweep_csv<P: AsRef<Path>>(path: P) -> KsResult<Vec<SweepRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
