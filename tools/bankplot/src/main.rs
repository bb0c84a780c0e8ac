//! Memory-bank interference result plotter.
//!
//! Collects victim slowdown and attacker bandwidth from two result trees
//! (attackers on one bank vs. all banks), prints a side-by-side summary
//! table and renders a comparison chart.
//!
//! Pipeline: check roots → collect one-bank → collect all-banks →
//!           summary table → optional JSON snapshot → chart.

mod cli;
mod config;
mod verbose;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use interference_perf::collect::{self, Collection};
use interference_perf::compare::Comparison;
use interference_perf::config::ExperimentConfig;
use interference_perf::dataset::{Benchmark, Configuration, ResultDataset};
use interference_perf::{chart, output, snapshot};

use crate::verbose::{Timer, dprintln, vprintln};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    verbose::init(cli.quiet, cli.verbose);

    let benchmark = Benchmark::from(cli.benchmark);
    let config = config::load(cli.config.as_deref())?;

    // Both roots are checked before anything is collected.
    collect::ensure_root(&cli.one_bank_dir)?;
    collect::ensure_root(&cli.all_banks_dir)?;

    let one_bank = collect_configuration(
        Configuration::OneBank,
        &cli.one_bank_dir,
        benchmark,
        &config,
    );
    let all_banks = collect_configuration(
        Configuration::AllBanks,
        &cli.all_banks_dir,
        benchmark,
        &config,
    );

    let comparison = Comparison::new(&one_bank, &all_banks, &config.key_space(benchmark));
    output::print_summary(benchmark, &comparison);

    if let Some(ref path) = cli.save_json {
        snapshot::save_json(path, benchmark, &one_bank, &all_banks)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
        dprintln!("Snapshot saved as '{}'", path.display());
    }

    if cli.no_chart {
        return Ok(());
    }
    if comparison.is_empty() {
        dprintln!("No {} results found!", benchmark.title());
        return Ok(());
    }

    let output_path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(benchmark.default_output()));
    dprintln!("Generating plots...");
    {
        let _t = Timer::start("chart rendering");
        chart::render_chart(&output_path, benchmark, &comparison, &config.chart)
            .with_context(|| format!("rendering chart to {}", output_path.display()))?;
    }
    dprintln!("Plot saved as '{}'", output_path.display());

    Ok(())
}

/// Collect one configuration's tree and report what was skipped.
fn collect_configuration(
    configuration: Configuration,
    root: &Path,
    benchmark: Benchmark,
    config: &ExperimentConfig,
) -> ResultDataset {
    dprintln!(
        "Collecting {} results from {} ({})...",
        benchmark.title(),
        root.display(),
        configuration.label(),
    );

    let Collection {
        dataset,
        missing_cases,
        unreadable_logs,
    } = {
        let _t = Timer::start(format!("{} collection", configuration.id()));
        collect::collect(root, benchmark, config)
    };

    if !missing_cases.is_empty() {
        dprintln!(
            "  {} of {} test cases not present",
            missing_cases.len(),
            missing_cases.len() + dataset.len()
        );
    }
    for key in &missing_cases {
        vprintln!("  skipped {key}: no directory {}", root.join(key.dir_name()).display());
    }
    for (path, err) in &unreadable_logs {
        vprintln!("  unreadable log {}: {err}", path.display());
    }
    for (key, metrics) in dataset.iter() {
        if metrics.slowdown().is_none() {
            vprintln!("  {key}: slowdown not measured");
        }
        if metrics.aggregate_bandwidth().is_none() {
            vprintln!("  {key}: no attacker bandwidth reported");
        }
    }

    dataset
}
