//! Experiment layout and chart configuration.
//!
//! Deserialized from `bankplot.toml`. Every field has a default matching
//! the standard experiment scripts, so an empty file (or no file) describes
//! the stock two-dimension, five-algorithm, five-workload layout.

use std::path::Path;

use serde::Deserialize;

use crate::dataset::{Benchmark, TestCaseKey};
use crate::error::{AnalysisError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// `[matmult]` key space.
    pub matmult: MatmultSpace,
    /// `[sdvbs]` key space.
    pub sdvbs: SdvbsSpace,
    /// `[layout]` log file naming inside each test case directory.
    pub layout: LogLayout,
    /// `[chart]` figure size, axis limits and colours.
    pub chart: ChartConfig,
}

impl ExperimentConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
            .map_err(|e| AnalysisError::Config(format!("{}: {e}", path.display())))
    }

    /// Keys probed for `benchmark`, in report order.
    pub fn key_space(&self, benchmark: Benchmark) -> Vec<TestCaseKey> {
        match benchmark {
            Benchmark::Matmult => self.matmult.keys(),
            Benchmark::Sdvbs => self.sdvbs.keys(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.layout.attacker_cores == 0 {
            return Err(AnalysisError::Config(
                "layout.attacker-cores must be at least 1".into(),
            ));
        }
        if !(self.chart.slowdown_max > 0.0 && self.chart.bandwidth_max > 0.0) {
            return Err(AnalysisError::Config(
                "chart axis limits must be positive".into(),
            ));
        }
        if self.chart.width == 0 || self.chart.row_height == 0 {
            return Err(AnalysisError::Config("chart size must be non-zero".into()));
        }
        Ok(())
    }
}

/// `[matmult]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatmultSpace {
    /// Matrix side lengths.
    pub dimensions: Vec<u32>,
    /// Algorithm variant indices.
    pub algorithms: Vec<u32>,
}

impl Default for MatmultSpace {
    fn default() -> Self {
        Self {
            dimensions: vec![1024, 2048],
            algorithms: vec![0, 1, 2, 3, 4],
        }
    }
}

impl MatmultSpace {
    /// Dimension-major cross product of dimensions and algorithms.
    pub fn keys(&self) -> Vec<TestCaseKey> {
        self.dimensions
            .iter()
            .flat_map(|&dimension| {
                self.algorithms.iter().map(move |&algorithm| TestCaseKey::Matmult {
                    dimension,
                    algorithm,
                })
            })
            .collect()
    }
}

/// `[sdvbs]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SdvbsSpace {
    /// Workload names, which are also the subdirectory names.
    pub workloads: Vec<String>,
}

impl Default for SdvbsSpace {
    fn default() -> Self {
        Self {
            workloads: ["disparity", "mser", "sift", "stitch", "tracking"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl SdvbsSpace {
    /// One key per workload, in configured order.
    pub fn keys(&self) -> Vec<TestCaseKey> {
        self.workloads
            .iter()
            .cloned()
            .map(TestCaseKey::Workload)
            .collect()
    }
}

/// `[layout]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct LogLayout {
    /// Victim log without attackers.
    pub solo_log: String,
    /// Victim log with attackers running.
    pub interfered_log: String,
    /// Attacker log name prefix; the core index and `.log` are appended.
    pub attacker_log_prefix: String,
    /// Number of attacker cores, numbered from 1.
    pub attacker_cores: u32,
}

impl Default for LogLayout {
    fn default() -> Self {
        Self {
            solo_log: "victim_solo.log".into(),
            interfered_log: "victim_with_3_write_attackers.log".into(),
            attacker_log_prefix: "log-attack-core".into(),
            attacker_cores: 3,
        }
    }
}

impl LogLayout {
    /// File name of the attacker log for `core` (1-based).
    pub fn attacker_log(&self, core: u32) -> String {
        format!("{}{core}.log", self.attacker_log_prefix)
    }
}

/// `[chart]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ChartConfig {
    /// Figure width in pixels.
    pub width: u32,
    /// Height of one panel row in pixels.
    pub row_height: u32,
    /// Upper limit of the slowdown axis.
    pub slowdown_max: f64,
    /// Upper limit of the aggregate bandwidth axis in MB/s.
    pub bandwidth_max: f64,
    /// Bar colour for the one-bank configuration, as `#RRGGBB`.
    pub one_bank_color: String,
    /// Bar colour for the all-banks configuration, as `#RRGGBB`.
    pub all_banks_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1400,
            row_height: 500,
            slowdown_max: 120.0,
            bandwidth_max: 7000.0,
            one_bank_color: "#1B9E77".into(),
            all_banks_color: "#D95F02".into(),
        }
    }
}
