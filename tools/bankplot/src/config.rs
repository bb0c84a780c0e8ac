//! Locating and loading the experiment configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use interference_perf::config::ExperimentConfig;

use crate::verbose::vprintln;

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "bankplot.toml";

/// Load the configuration.
///
/// An explicit path must be readable. Without one, `bankplot.toml` in the
/// working directory is used if it exists, otherwise the built-in layout.
pub fn load(explicit: Option<&Path>) -> Result<ExperimentConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                vprintln!("No {DEFAULT_CONFIG_FILE} found, using built-in experiment layout");
                return Ok(ExperimentConfig::default());
            }
            candidate
        }
    };

    vprintln!("Loading {}...", path.display());
    ExperimentConfig::load(&path)
        .with_context(|| format!("failed to load config '{}'", path.display()))
}
