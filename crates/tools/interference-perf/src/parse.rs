//! Measurement extraction from victim and attacker log files.
//!
//! Each log kind carries exactly one measurement in free text. A log that
//! does not exist, or whose text does not contain the measurement, yields
//! `None`. Zero is a real measurement and is never used to mean "missing".

use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// `matmult_opt1  7.998469  chsum: 19043.350654`
static MATMULT_ELAPSED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+_opt\d+\s+([\d.]+)\s+chsum:").expect("matmult pattern is valid")
});

/// `Cycles elapsed          - 123383523`
static SDVBS_CYCLES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Cycles elapsed\s+-\s+(\d+)").expect("sdvbs pattern is valid")
});

/// `bandwidth 433.77 MB/s`
static ATTACKER_BANDWIDTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"bandwidth\s+([\d.]+)\s+MB/s").expect("bandwidth pattern is valid")
});

/// The kind of log being parsed, which selects the extraction pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Matrix-multiplication victim: elapsed seconds, first report wins.
    MatmultVictim,
    /// SD-VBS victim: cycle count, last report wins.
    SdvbsVictim,
    /// Attacker: measured bandwidth in MB/s, first report wins.
    AttackerBandwidth,
}

impl LogKind {
    /// Short name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::MatmultVictim => "matmult_victim",
            Self::SdvbsVictim => "sdvbs_victim",
            Self::AttackerBandwidth => "attacker_bandwidth",
        }
    }
}

/// Extract the measurement for `kind` from log text.
///
/// A capture that matches the pattern but is not a valid number (e.g.
/// `1.2.3`) is treated as absent.
pub fn parse_text(text: &str, kind: LogKind) -> Option<f64> {
    let capture = match kind {
        LogKind::MatmultVictim => MATMULT_ELAPSED.captures(text),
        // Logs may accumulate several runs; the last report is the most recent.
        LogKind::SdvbsVictim => SDVBS_CYCLES.captures_iter(text).last(),
        LogKind::AttackerBandwidth => ATTACKER_BANDWIDTH.captures(text),
    }?;
    capture.get(1)?.as_str().parse::<f64>().ok()
}

/// Read a log file and extract its measurement.
///
/// A missing file is `Ok(None)`. Other I/O failures are returned so the
/// caller can report them; they are not fatal to collection.
pub fn read_measurement(path: &Path, kind: LogKind) -> io::Result<Option<f64>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    Ok(parse_text(&String::from_utf8_lossy(&bytes), kind))
}
