//! Output verbosity for collection diagnostics.
//!
//! - **Quiet** (`-q`): errors and the summary table only
//! - **Default**: progress lines, skipped-case counts, the table
//! - **Verbose** (`-v`): also each skipped case, unreadable logs, timings

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

/// Output verbosity level, selected by `-q` / `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// The summary table and errors; no progress lines.
    Quiet = 0,
    /// Progress lines and per-configuration counts of missing cases.
    Default = 1,
    /// Every skipped case, unmeasured field and unreadable log, plus step
    /// timings.
    Verbose = 2,
}

impl Verbosity {
    /// Level for the `-q` / `-v` flags. Quiet wins; clap rejects both.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Default,
        }
    }

    fn from_u8(level: u8) -> Self {
        match level {
            0 => Self::Quiet,
            2 => Self::Verbose,
            _ => Self::Default,
        }
    }
}

/// Global verbosity level, set once at startup.
static VERBOSITY: AtomicU8 = AtomicU8::new(Verbosity::Default as u8);

/// Set the verbosity level for the process.
pub fn init(quiet: bool, verbose: bool) {
    VERBOSITY.store(Verbosity::from_flags(quiet, verbose) as u8, Ordering::Relaxed);
}

/// Returns the current verbosity level.
pub fn verbosity() -> Verbosity {
    Verbosity::from_u8(VERBOSITY.load(Ordering::Relaxed))
}

/// Returns `true` if verbose mode is active.
pub fn is_verbose() -> bool {
    verbosity() == Verbosity::Verbose
}

/// Returns `true` if quiet mode is active.
pub fn is_quiet() -> bool {
    verbosity() == Verbosity::Quiet
}

/// Print a message only when verbose mode is enabled.
macro_rules! vprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            println!($($arg)*);
        }
    };
}

pub(crate) use vprintln;

/// Print a message unless quiet mode is enabled.
macro_rules! dprintln {
    ($($arg:tt)*) => {
        if !$crate::verbose::is_quiet() {
            println!($($arg)*);
        }
    };
}

pub(crate) use dprintln;

/// Prints how long a collection or rendering step took, on drop, in verbose
/// mode.
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    /// Begin timing a labeled step.
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if is_verbose() {
            println!("  {}: {:.1?}", self.label, self.start.elapsed());
        }
    }
}
