//! Test case keys and the per-configuration result dataset.

use std::fmt;

use crate::metrics::TestCaseMetrics;
use crate::parse::LogKind;

/// Benchmark family a result tree belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Benchmark {
    /// Matrix multiplication, keyed by (dimension, algorithm).
    Matmult,
    /// SD-VBS vision suite, keyed by workload name.
    Sdvbs,
}

impl Benchmark {
    /// Name used on the command line and in default output paths.
    pub fn name(self) -> &'static str {
        match self {
            Self::Matmult => "matmult",
            Self::Sdvbs => "sdvbs",
        }
    }

    /// Human-readable family name used for the chart title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Matmult => "Matrix Multiplication",
            Self::Sdvbs => "SD-VBS",
        }
    }

    /// Log kind of this family's victim logs.
    pub fn victim_kind(self) -> LogKind {
        match self {
            Self::Matmult => LogKind::MatmultVictim,
            Self::Sdvbs => LogKind::SdvbsVictim,
        }
    }

    /// Default chart path when none is given.
    pub fn default_output(self) -> String {
        format!("memory_interference_{}.png", self.name())
    }
}

/// Which memory-bank configuration a dataset was collected under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Configuration {
    /// Attackers confined to the victim's bank.
    OneBank,
    /// Attackers spread over all banks.
    AllBanks,
}

impl Configuration {
    /// Display label used in tables and chart legends.
    pub fn label(self) -> &'static str {
        match self {
            Self::OneBank => "One Bank",
            Self::AllBanks => "All Banks",
        }
    }

    /// Identifier used in snapshots.
    pub fn id(self) -> &'static str {
        match self {
            Self::OneBank => "one_bank",
            Self::AllBanks => "all_banks",
        }
    }
}

/// Identifies one experiment instance within a result tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestCaseKey {
    /// Matrix multiplication with square matrices of `dimension`.
    Matmult {
        /// Matrix side length.
        dimension: u32,
        /// Algorithm variant index.
        algorithm: u32,
    },
    /// Named SD-VBS workload.
    Workload(String),
}

impl TestCaseKey {
    /// Name of the test case's subdirectory under a configuration root.
    pub fn dir_name(&self) -> String {
        match self {
            Self::Matmult {
                dimension,
                algorithm,
            } => format!("dim{dimension}_algo{algorithm}"),
            Self::Workload(name) => name.clone(),
        }
    }

    /// Row label within a group: the algorithm index or workload name.
    pub fn label(&self) -> String {
        match self {
            Self::Matmult { algorithm, .. } => algorithm.to_string(),
            Self::Workload(name) => name.clone(),
        }
    }

    /// Matrix dimension, for keys that group by one.
    pub fn dimension(&self) -> Option<u32> {
        match self {
            Self::Matmult { dimension, .. } => Some(*dimension),
            Self::Workload(_) => None,
        }
    }
}

impl fmt::Display for TestCaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dir_name())
    }
}

/// Metrics for every collected test case of one configuration.
///
/// Built in one pass (via [`FromIterator`]) and read-only afterwards.
/// Iteration follows insertion order. A key inserted twice keeps its first
/// position and its last metrics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultDataset {
    entries: Vec<(TestCaseKey, TestCaseMetrics)>,
}

impl ResultDataset {
    /// Metrics for `key`, if that test case was collected.
    pub fn get(&self, key: &TestCaseKey) -> Option<&TestCaseMetrics> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, m)| m)
    }

    /// Returns `true` if `key` was collected.
    pub fn contains_key(&self, key: &TestCaseKey) -> bool {
        self.get(key).is_some()
    }

    /// Collected keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &TestCaseKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Collected entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&TestCaseKey, &TestCaseMetrics)> {
        self.entries.iter().map(|(k, m)| (k, m))
    }

    /// Number of collected test cases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no test case was collected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(TestCaseKey, TestCaseMetrics)> for ResultDataset {
    fn from_iter<I: IntoIterator<Item = (TestCaseKey, TestCaseMetrics)>>(iter: I) -> Self {
        let mut entries: Vec<(TestCaseKey, TestCaseMetrics)> = Vec::new();
        for (key, metrics) in iter {
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = metrics,
                None => entries.push((key, metrics)),
            }
        }
        Self { entries }
    }
}
