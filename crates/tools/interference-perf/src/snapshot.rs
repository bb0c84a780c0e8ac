//! JSON snapshot of both collected datasets.
//!
//! The snapshot keeps the core's absent-vs-zero distinction: unmeasured
//! values are `null`, never `0`.

use std::path::Path;

use serde::Serialize;

use crate::dataset::{Benchmark, Configuration, ResultDataset};
use crate::error::Result;
use crate::metrics::TestCaseMetrics;

#[derive(Serialize)]
struct Snapshot<'a> {
    benchmark: &'static str,
    configurations: Vec<ConfigurationSnapshot<'a>>,
}

#[derive(Serialize)]
struct ConfigurationSnapshot<'a> {
    configuration: &'static str,
    cases: Vec<CaseSnapshot<'a>>,
}

#[derive(Serialize)]
struct CaseSnapshot<'a> {
    case: String,
    #[serde(flatten)]
    metrics: &'a TestCaseMetrics,
}

fn configuration_snapshot<'a>(
    configuration: Configuration,
    dataset: &'a ResultDataset,
) -> ConfigurationSnapshot<'a> {
    ConfigurationSnapshot {
        configuration: configuration.id(),
        cases: dataset
            .iter()
            .map(|(key, metrics)| CaseSnapshot {
                case: key.dir_name(),
                metrics,
            })
            .collect(),
    }
}

/// Serialize both datasets as pretty-printed JSON.
pub fn to_json(
    benchmark: Benchmark,
    one_bank: &ResultDataset,
    all_banks: &ResultDataset,
) -> Result<String> {
    let snapshot = Snapshot {
        benchmark: benchmark.name(),
        configurations: vec![
            configuration_snapshot(Configuration::OneBank, one_bank),
            configuration_snapshot(Configuration::AllBanks, all_banks),
        ],
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Write both datasets as a JSON snapshot to `path`.
pub fn save_json(
    path: &Path,
    benchmark: Benchmark,
    one_bank: &ResultDataset,
    all_banks: &ResultDataset,
) -> Result<()> {
    let json = to_json(benchmark, one_bank, all_banks)?;
    std::fs::write(path, json)?;
    Ok(())
}
