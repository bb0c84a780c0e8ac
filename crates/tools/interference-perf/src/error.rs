//! Error types for result analysis.
//!
//! Only conditions that stop a run are errors. A log that is missing or does
//! not contain its measurement is an absent value, not an error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while collecting, reporting or rendering results.
#[derive(Debug)]
pub enum AnalysisError {
    /// A configuration root directory does not exist.
    MissingRoot(PathBuf),
    /// I/O error reading a config file or writing an output file.
    Io(io::Error),
    /// The experiment configuration could not be parsed or is invalid.
    Config(String),
    /// The chart backend failed to draw or encode the figure.
    Render(String),
    /// A dataset snapshot could not be serialized.
    Serialize(serde_json::Error),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRoot(path) => write!(f, "directory '{}' not found", path.display()),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Render(msg) => write!(f, "chart rendering failed: {msg}"),
            Self::Serialize(e) => write!(f, "snapshot serialization failed: {e}"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for AnalysisError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e)
    }
}

impl From<toml::de::Error> for AnalysisError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnalysisError>;
