//! Result collection from a configuration's directory tree.
//!
//! The collector probes a fixed key space rather than scanning the tree, so
//! two configurations collected with the same key space produce comparable
//! datasets even when either is missing cases. Layout under a root:
//!
//! ```text
//! <root>/<case dir>/victim_solo.log
//!                  /victim_with_3_write_attackers.log
//!                  /log-attack-core{1,2,3}.log
//! ```

use std::path::{Path, PathBuf};

use crate::config::{ExperimentConfig, LogLayout, MatmultSpace, SdvbsSpace};
use crate::dataset::{Benchmark, ResultDataset, TestCaseKey};
use crate::error::{AnalysisError, Result};
use crate::metrics::TestCaseMetrics;
use crate::parse::{self, LogKind};

/// Outcome of one collection pass.
#[derive(Debug, Default)]
pub struct Collection {
    /// Metrics for every test case whose directory exists.
    pub dataset: ResultDataset,
    /// Keys skipped because their directory does not exist.
    pub missing_cases: Vec<TestCaseKey>,
    /// Logs that exist but could not be read, with the error message. Their
    /// measurements are treated as absent.
    pub unreadable_logs: Vec<(PathBuf, String)>,
}

/// Fail with [`AnalysisError::MissingRoot`] unless `root` exists.
///
/// Callers check both roots before collecting anything.
pub fn ensure_root(root: &Path) -> Result<()> {
    if root.exists() {
        Ok(())
    } else {
        Err(AnalysisError::MissingRoot(root.to_path_buf()))
    }
}

/// Collect `benchmark` results under `root` using the configured key space.
pub fn collect(root: &Path, benchmark: Benchmark, config: &ExperimentConfig) -> Collection {
    collect_cases(
        root,
        &config.key_space(benchmark),
        benchmark.victim_kind(),
        &config.layout,
    )
}

/// Collect matrix-multiplication results under `root`.
pub fn collect_matmult(root: &Path, space: &MatmultSpace, layout: &LogLayout) -> Collection {
    collect_cases(root, &space.keys(), LogKind::MatmultVictim, layout)
}

/// Collect SD-VBS results under `root`.
pub fn collect_sdvbs(root: &Path, space: &SdvbsSpace, layout: &LogLayout) -> Collection {
    collect_cases(root, &space.keys(), LogKind::SdvbsVictim, layout)
}

/// Probe each key's directory under `root` and collect the ones present.
pub fn collect_cases(
    root: &Path,
    keys: &[TestCaseKey],
    victim: LogKind,
    layout: &LogLayout,
) -> Collection {
    let mut missing_cases = Vec::new();
    let mut unreadable_logs = Vec::new();
    let mut entries = Vec::with_capacity(keys.len());

    for key in keys {
        let case_dir = root.join(key.dir_name());
        if !case_dir.is_dir() {
            missing_cases.push(key.clone());
            continue;
        }
        let metrics = collect_case(&case_dir, victim, layout, &mut unreadable_logs);
        entries.push((key.clone(), metrics));
    }

    Collection {
        dataset: entries.into_iter().collect(),
        missing_cases,
        unreadable_logs,
    }
}

/// Parse one test case directory into metrics.
fn collect_case(
    case_dir: &Path,
    victim: LogKind,
    layout: &LogLayout,
    unreadable: &mut Vec<(PathBuf, String)>,
) -> TestCaseMetrics {
    let mut read = |name: &str, kind: LogKind| {
        let path = case_dir.join(name);
        match parse::read_measurement(&path, kind) {
            Ok(value) => value,
            Err(e) => {
                unreadable.push((path, e.to_string()));
                None
            }
        }
    };

    let solo = read(&layout.solo_log, victim);
    let interfered = read(&layout.interfered_log, victim);
    let bandwidths: Vec<Option<f64>> = (1..=layout.attacker_cores)
        .map(|core| read(&layout.attacker_log(core), LogKind::AttackerBandwidth))
        .collect();

    TestCaseMetrics::new(solo, interfered, &bandwidths)
}
