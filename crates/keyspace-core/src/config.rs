use crate::consts::{BRUTE_FORCE_LIMIT, DEFAULT_SAMPLE_SEED, EN1303_REFERENCE};
use crate::error::{KeyspaceError, KsResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub params: KeyspaceParams,
    #[command(flatten)]
    pub sampling: SamplingParams,
}

/// The constraint set shared by every engine: key length, alphabet size and
/// maximum adjacent cut difference.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyspaceParams {
    /// Number of cut positions on the key (n).
    #[arg(short = 'n', long, default_value_t = EN1303_REFERENCE.0)]
    pub positions: usize,
    /// Number of distinct cut depths (d).
    #[arg(short = 'd', long, default_value_t = EN1303_REFERENCE.1)]
    pub depths: usize,
    /// Maximum allowed difference between adjacent cuts.
    #[arg(short = 'm', long, default_value_t = EN1303_REFERENCE.2)]
    pub macs: usize,
}

impl Default for KeyspaceParams {
    fn default() -> Self {
        let (positions, depths, macs) = EN1303_REFERENCE;
        Self {
            positions,
            depths,
            macs,
        }
    }
}

impl From<(usize, usize, usize)> for KeyspaceParams {
    fn from((positions, depths, macs): (usize, usize, usize)) -> Self {
        Self::new(positions, depths, macs)
    }
}

impl fmt::Display for KeyspaceParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={}, d={}, macs={}",
            self.positions, self.depths, self.macs
        )
    }
}

impl KeyspaceParams {
    pub fn new(positions: usize, depths: usize, macs: usize) -> Self {
        Self {
            positions,
            depths,
            macs,
        }
    }

    /// Checks the parameters every engine needs. Lengths and MACS are unsigned,
    /// so only an empty alphabet can be rejected here.
    pub fn validate(&self) -> KsResult<()> {
        if self.depths == 0 {
            return Err(KeyspaceError::InvalidParameter(format!(
                "depths must be at least 1 ({})",
                self
            )));
        }
        Ok(())
    }

    /// Size of the full Cartesian product `d^n`, if it fits in a `u64`.
    pub fn sequence_space(&self) -> Option<u64> {
        let exp = u32::try_from(self.positions).ok()?;
        (self.depths as u64).checked_pow(exp)
    }

    pub fn within_brute_force_limit(&self) -> bool {
        matches!(self.sequence_space(), Some(size) if size <= BRUTE_FORCE_LIMIT)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KeyspaceError::Config(format!("Failed to read params file {:?}: {}", path, e))
        })?;
        let params: Self = serde_json::from_str(&content)?;
        Ok(params)
    }

    /// Overlays only the values that were typed on the command line, leaving
    /// the rest as loaded from a preset file.
    pub fn merge_from_cli(&mut self, cli_params: &KeyspaceParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_params.$field;
                }
            };
        }

        update_if_present!(positions, "positions");
        update_if_present!(depths, "depths");
        update_if_present!(macs, "macs");
    }
}

#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    /// Number of legal bittings to keep as a uniform sample (0 disables).
    #[arg(long, default_value_t = 0)]
    pub sample_size: usize,
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SEED)]
    pub seed: u64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            sample_size: 0,
            seed: DEFAULT_SAMPLE_SEED,
        }
    }
}
