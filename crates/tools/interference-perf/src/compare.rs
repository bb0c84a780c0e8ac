//! Side-by-side comparison of the one-bank and all-banks datasets.
//!
//! This is the presentation boundary: absent values become `0.0` here, so a
//! key collected in only one configuration still gets a row, with zeros on
//! the other side. The datasets themselves are only borrowed.

use crate::dataset::{Configuration, ResultDataset, TestCaseKey};
use crate::metrics::TestCaseMetrics;

/// Display values for one configuration of one test case.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayMetrics {
    /// Slowdown, or `0.0` when unmeasured.
    pub slowdown: f64,
    /// Aggregate attacker bandwidth in MB/s, or `0.0` when unmeasured.
    pub aggregate_bandwidth: f64,
}

impl DisplayMetrics {
    /// Substitute zero for every absent field. A missing entry is treated as
    /// all fields absent.
    pub fn from_metrics(metrics: Option<&TestCaseMetrics>) -> Self {
        metrics.map_or_else(Self::default, |m| Self {
            slowdown: m.slowdown().unwrap_or(0.0),
            aggregate_bandwidth: m.aggregate_bandwidth().unwrap_or(0.0),
        })
    }
}

/// One test case across both configurations.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// Test case.
    pub key: TestCaseKey,
    /// One-bank values.
    pub one_bank: DisplayMetrics,
    /// All-banks values.
    pub all_banks: DisplayMetrics,
}

impl ComparisonRow {
    /// Values for one configuration.
    pub fn side(&self, configuration: Configuration) -> &DisplayMetrics {
        match configuration {
            Configuration::OneBank => &self.one_bank,
            Configuration::AllBanks => &self.all_banks,
        }
    }
}

/// Rows sharing one chart row / table section.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonGroup {
    /// Matrix dimension for matrix-multiplication groups.
    pub dimension: Option<u32>,
    /// Rows in display order.
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonGroup {
    /// Section heading, e.g. `Matrix Dimension 1024×1024`.
    pub fn title(&self) -> String {
        match self.dimension {
            Some(dim) => format!("Matrix Dimension {dim}×{dim}"),
            None => "SD-VBS Workloads".into(),
        }
    }

    /// Axis / key column label.
    pub fn axis_label(&self) -> &'static str {
        if self.dimension.is_some() {
            "Algorithm"
        } else {
            "Workload"
        }
    }
}

/// Comparison of two datasets over the union of their keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    rows: Vec<ComparisonRow>,
}

impl Comparison {
    /// Compare two datasets.
    ///
    /// Every key present in either dataset gets exactly one row. Rows follow
    /// `key_order`; keys not listed there come after, sorted.
    pub fn new(
        one_bank: &ResultDataset,
        all_banks: &ResultDataset,
        key_order: &[TestCaseKey],
    ) -> Self {
        let present = |key: &TestCaseKey| one_bank.contains_key(key) || all_banks.contains_key(key);

        let mut keys: Vec<TestCaseKey> = Vec::new();
        for key in key_order {
            if present(key) && !keys.contains(key) {
                keys.push(key.clone());
            }
        }
        let mut extra: Vec<TestCaseKey> = one_bank
            .keys()
            .chain(all_banks.keys())
            .filter(|key| !keys.contains(*key))
            .cloned()
            .collect();
        extra.sort();
        extra.dedup();
        keys.extend(extra);

        let rows = keys
            .into_iter()
            .map(|key| ComparisonRow {
                one_bank: DisplayMetrics::from_metrics(one_bank.get(&key)),
                all_banks: DisplayMetrics::from_metrics(all_banks.get(&key)),
                key,
            })
            .collect();
        Self { rows }
    }

    /// All rows in display order.
    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    /// Returns `true` if neither dataset had any test case.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows grouped by matrix dimension; workloads form a single group.
    /// Groups appear in order of their first row.
    pub fn groups(&self) -> Vec<ComparisonGroup> {
        let mut groups: Vec<ComparisonGroup> = Vec::new();
        for row in &self.rows {
            let dimension = row.key.dimension();
            match groups.iter_mut().find(|g| g.dimension == dimension) {
                Some(group) => group.rows.push(row.clone()),
                None => groups.push(ComparisonGroup {
                    dimension,
                    rows: vec![row.clone()],
                }),
            }
        }
        groups
    }
}
