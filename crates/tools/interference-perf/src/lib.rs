//! Result extraction and comparison for memory-bank interference experiments.
//!
//! Parses victim and attacker logs from a result directory tree into typed
//! measurements, derives slowdown and aggregate attacker bandwidth per test
//! case, and compares a one-bank run against an all-banks run as a text
//! table, a bar chart, or a JSON snapshot.
//!
//! Pipeline: result tree → [`parse`] (per log) → [`collect`] (per test case,
//! via [`metrics`]) → [`dataset::ResultDataset`] → [`compare`] →
//! [`output`] / [`chart`] / [`snapshot`].

pub mod chart;
pub mod collect;
pub mod compare;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod output;
pub mod parse;
pub mod snapshot;

pub use error::{AnalysisError, Result};
