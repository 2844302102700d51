use crate::reports;
use clap::Args;
use keyspace_core::api::sweep;
use keyspace_core::error::KsResult;
use keyspace_core::export::write_sweep_csv;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    #[arg(long, default_value_t = 6)]
    pub max_positions: usize,
    #[arg(long, default_value_t = 4)]
    pub max_depths: usize,

    /// Write every cross-check as a CSV row.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Returns whether every parameter set was consistent.
pub fn run(args: &VerifyArgs) -> KsResult<bool> {
    info!(
        "🔎 Cross-checking engines up to n={}, d={}",
        args.max_positions, args.max_depths
    );
    let checks = sweep(args.max_positions, args.max_depths)?;

    reports::print_sweep_report(&checks);

    if let Some(path) = &args.output {
        write_sweep_csv(path, &checks)?;
        info!("💾 Wrote {} rows to {:?}", checks.len(), path);
    }

    Ok(checks.iter().all(|c| c.consistent()))
}
