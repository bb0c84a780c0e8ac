//! Per-test-case metrics: aggregate attacker bandwidth and victim slowdown.

use serde::Serialize;

/// Combine per-core attacker bandwidth readings into one aggregate.
///
/// Absent readings are dropped, not counted as zero. Returns `None` when no
/// core produced a reading.
pub fn aggregate_bandwidth(readings: &[Option<f64>]) -> Option<f64> {
    let mut present = readings.iter().flatten().peekable();
    present.peek()?;
    Some(present.sum())
}

/// Victim slowdown under interference: `interfered / solo`.
///
/// `None` when either side is absent or `solo` is not positive. Ratios
/// below 1.0 are returned as-is.
pub fn slowdown(solo: Option<f64>, interfered: Option<f64>) -> Option<f64> {
    match (solo, interfered) {
        (Some(solo), Some(interfered)) if solo > 0.0 => Some(interfered / solo),
        _ => None,
    }
}

/// Metrics collected for one test case.
///
/// The derived fields are computed at construction, so `aggregate_bandwidth`
/// is present exactly when `attacker_bandwidths` is non-empty, and
/// `slowdown` exactly when both victim runs were measured with `solo > 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCaseMetrics {
    solo: Option<f64>,
    interfered: Option<f64>,
    attacker_bandwidths: Vec<f64>,
    aggregate_bandwidth: Option<f64>,
    slowdown: Option<f64>,
}

impl TestCaseMetrics {
    /// Build metrics from the raw victim measurements and one bandwidth
    /// reading slot per attacker core.
    pub fn new(solo: Option<f64>, interfered: Option<f64>, readings: &[Option<f64>]) -> Self {
        Self {
            solo,
            interfered,
            attacker_bandwidths: readings.iter().flatten().copied().collect(),
            aggregate_bandwidth: aggregate_bandwidth(readings),
            slowdown: slowdown(solo, interfered),
        }
    }

    /// Victim measurement without attackers.
    pub fn solo(&self) -> Option<f64> {
        self.solo
    }

    /// Victim measurement with attackers running.
    pub fn interfered(&self) -> Option<f64> {
        self.interfered
    }

    /// Bandwidth of each attacker core that reported one, in core order.
    pub fn attacker_bandwidths(&self) -> &[f64] {
        &self.attacker_bandwidths
    }

    /// Sum of the reported attacker bandwidths in MB/s.
    pub fn aggregate_bandwidth(&self) -> Option<f64> {
        self.aggregate_bandwidth
    }

    /// `interfered / solo`.
    pub fn slowdown(&self) -> Option<f64> {
        self.slowdown
    }
}
