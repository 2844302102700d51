mod format;
mod tables;

pub use self::format::group_thousands;
pub use self::tables::{count as print_count_report, samples as print_samples, sweep as print_sweep_report};

use keyspace_core::bitting::Bitting;
use keyspace_core::config::KeyspaceParams;
use keyspace_core::engine::Method;
use keyspace_core::error::KsResult;
use keyspace_core::BigUint;
use serde::Serialize;
use std::time::Duration;

pub struct CountRow {
    pub method: Method,
    pub keys: BigUint,
    pub elapsed: Duration,
}

#[derive(Serialize)]
struct JsonRow {
    method: Method,
    all_rules: bool,
    keys: String,
    millis: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    params: &'a KeyspaceParams,
    results: Vec<JsonRow>,
    samples: &'a [Bitting],
}

pub fn count_json(params: &KeyspaceParams, rows: &[CountRow], samples: &[Bitting]) -> KsResult<String> {
    let report = JsonReport {
        params,
        results: rows
            .iter()
            .map(|r| JsonRow {
                method: r.method,
                all_rules: r.method.enforces_all_rules(),
                keys: r.keys.to_string(),
                millis: r.elapsed.as_secs_f64() * 1000.0,
            })
            .collect(),
        samples,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
