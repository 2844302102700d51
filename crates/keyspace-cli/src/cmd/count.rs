use crate::reports::{self, CountRow};
use clap::Args;
use keyspace_core::api::sample_legal;
use keyspace_core::bitting::Bitting;
use keyspace_core::config::{Config, KeyspaceParams, SamplingParams};
use keyspace_core::consts::PREFIX_SEARCH_LIMIT;
use keyspace_core::engine::{KeyCounter, LevelObserver, Method, StateSpaceCounter};
use keyspace_core::error::KsResult;
use keyspace_core::BigUint;
use std::time::Instant;
use strum::IntoEnumIterator;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct CountArgs {
    #[command(flatten)]
    pub config: Config,

    /// Run a single engine. Without this, every engine that is cheap enough runs.
    #[arg(long, value_enum)]
    pub method: Option<Method>,

    /// Print the report as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Reports state-space progress through the log.
struct LevelLogger;

impl LevelObserver for LevelLogger {
    fn on_level(&self, level: usize, total_levels: usize, states: usize) {
        info!("    Level {}/{}: {} states", level, total_levels, states);
    }
}

/// Runs one engine. The prefix search also fills the sample reservoir, so
/// its samples come back with the row instead of costing a second search.
fn run_method(
    method: Method,
    params: &KeyspaceParams,
    sampling: &SamplingParams,
) -> KsResult<(CountRow, Option<Vec<Bitting>>)> {
    let start = Instant::now();
    let (keys, samples) = match method {
        Method::StateSpace => (
            StateSpaceCounter::new()
                .with_observer(LevelLogger)
                .count(params)?,
            None,
        ),
        Method::Prefix => {
            let outcome = sample_legal(params, sampling)?;
            (outcome.legal, Some(outcome.samples))
        }
        other => (other.counter().count(params)?, None),
    };
    let row = CountRow {
        method,
        keys,
        elapsed: start.elapsed(),
    };
    Ok((row, samples))
}

pub fn run(args: &CountArgs, params: KeyspaceParams) -> KsResult<()> {
    params.validate()?;
    info!("🔑 Counting keys: {}", params);

    let sampling = args.config.sampling;
    let mut rows = Vec::new();
    let mut samples = None;
    let mut record = |(row, drawn): (CountRow, Option<Vec<Bitting>>)| {
        rows.push(row);
        if drawn.is_some() {
            samples = drawn;
        }
    };
    match args.method {
        Some(method) => record(run_method(method, &params, &sampling)?),
        None => {
            let matrix = run_method(Method::Matrix, &params, &sampling)?;
            let prefix_ok = matrix.0.keys <= BigUint::from(PREFIX_SEARCH_LIMIT);
            record(matrix);

            for method in Method::iter().filter(|m| *m != Method::Matrix) {
                let affordable = match method {
                    Method::Brute => params.within_brute_force_limit(),
                    Method::Prefix => prefix_ok,
                    _ => true,
                };
                if affordable {
                    record(run_method(method, &params, &sampling)?);
                } else {
                    info!("⏭️  Skipping {} for {}: too large", method, params);
                }
            }
        }
    }

    let mut constrained = rows
        .iter()
        .filter(|r| r.method.enforces_all_rules())
        .map(|r| &r.keys);
    if let Some(first) = constrained.next() {
        if constrained.any(|k| k != first) {
            warn!("⚠️  Full-rule engines disagree for {}", params);
        }
    }

    let samples = match samples {
        Some(drawn) => drawn,
        None if sampling.sample_size > 0 => {
            info!("🎲 Sampling {} keys (seed {})", sampling.sample_size, sampling.seed);
            sample_legal(&params, &sampling)?.samples
        }
        None => Vec::new(),
    };

    if args.json {
        println!("{}", reports::count_json(&params, &rows, &samples)?);
    } else {
        reports::print_count_report(&params, &rows);
        if !samples.is_empty() {
            reports::print_samples(&samples);
        }
    }
    Ok(())
}
