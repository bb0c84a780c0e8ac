//! Terminal summary tables for comparison results.

use crate::compare::{Comparison, ComparisonGroup, ComparisonRow};
use crate::dataset::{Benchmark, Configuration};

/// Width of the banner and separator rules.
const RULE_WIDTH: usize = 80;

/// Render the summary table for `benchmark` as text.
pub fn format_summary(benchmark: Benchmark, comparison: &Comparison) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let title = match benchmark {
        Benchmark::Matmult => "MATRIX MULTIPLICATION RESULTS",
        Benchmark::Sdvbs => "SD-VBS BENCHMARK RESULTS",
    };

    let mut lines = vec![String::new(), rule.clone(), title.to_string(), rule.clone()];

    let groups = comparison.groups();
    if groups.is_empty() {
        lines.push(String::new());
        lines.push("  No results to display.".into());
    }
    for group in &groups {
        lines.extend(format_group(group));
    }

    lines.push(rule);
    lines.push(String::new());
    lines.join("\n") + "\n"
}

/// Print the summary table for `benchmark` to stdout.
pub fn print_summary(benchmark: Benchmark, comparison: &Comparison) {
    print!("{}", format_summary(benchmark, comparison));
}

fn format_group(group: &ComparisonGroup) -> Vec<String> {
    let separator = "-".repeat(RULE_WIDTH);
    let (key_header, key_width) = match group.dimension {
        Some(_) => ("Algo", 8),
        None => ("Workload", 15),
    };

    let mut lines = vec![String::new()];
    if let Some(dim) = group.dimension {
        let heading = format!("Matrix Dimension: {dim}×{dim}");
        lines.push(format!("{heading:^RULE_WIDTH$}"));
        lines.push(separator.clone());
    }
    lines.push(format!(
        "{key_header:<key_width$} {:<30} {:<30}",
        Configuration::OneBank.label(),
        Configuration::AllBanks.label(),
    ));
    lines.push(format!(
        "{:>key_width$} {:<15} {:<15} {:<15} {:<15}",
        "", "Slowdown", "Agg. BW (MB/s)", "Slowdown", "Agg. BW (MB/s)",
    ));
    lines.push(separator);
    lines.extend(group.rows.iter().map(|row| format_row(row, key_width)));
    lines
}

fn format_row(row: &ComparisonRow, key_width: usize) -> String {
    format!(
        "{:<key_width$} {:>10.2}x     {:>10.1}      {:>10.2}x     {:>10.1}",
        row.key.label(),
        row.one_bank.slowdown,
        row.one_bank.aggregate_bandwidth,
        row.all_banks.slowdown,
        row.all_banks.aggregate_bandwidth,
    )
}
