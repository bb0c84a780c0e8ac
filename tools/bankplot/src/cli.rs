//! Command-line interface definitions for bankplot.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use interference_perf::dataset::Benchmark;

/// Compare one-bank and all-banks memory interference results.
#[derive(Parser)]
#[command(name = "bankplot", version, about)]
pub struct Cli {
    /// Benchmark family the result trees belong to.
    #[arg(long, value_enum)]
    pub benchmark: BenchmarkArg,

    /// Result tree collected with attackers confined to one bank.
    #[arg(long, default_value = "one-bank-results")]
    pub one_bank_dir: PathBuf,

    /// Result tree collected with attackers spread over all banks.
    #[arg(long, default_value = "all-banks-results")]
    pub all_banks_dir: PathBuf,

    /// Chart output path (default: memory_interference_<benchmark>.png).
    /// A `.svg` extension renders SVG instead of PNG.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Experiment configuration file (default: ./bankplot.toml if present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also write both datasets as a JSON snapshot.
    #[arg(long)]
    pub save_json: Option<PathBuf>,

    /// Print the summary table only; do not render a chart.
    #[arg(long)]
    pub no_chart: bool,

    /// Show only errors and the summary table.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show skipped test cases, unreadable logs and timings.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// `--benchmark` values.
#[derive(Clone, Copy, ValueEnum)]
pub enum BenchmarkArg {
    /// Matrix multiplication (dim<N>_algo<M> case directories).
    Matmult,
    /// SD-VBS vision suite (one directory per workload).
    Sdvbs,
}

impl From<BenchmarkArg> for Benchmark {
    fn from(arg: BenchmarkArg) -> Self {
        match arg {
            BenchmarkArg::Matmult => Benchmark::Matmult,
            BenchmarkArg::Sdvbs => Benchmark::Sdvbs,
        }
    }
}
