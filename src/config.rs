//! Configuration for wafer analysis.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_OUTLIER_SIGMA, DEFAULT_WAFER_DIAMETER, FAILED_READ_MARKER};

/// Configuration options for `WaferAnalyzer`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Half-width of the pad dimension acceptance window, in standard
    /// deviations (default: 4.0).
    pub outlier_sigma: f64,

    /// Measured value that marks a failed instrument read (default: 9999.9999).
    pub failed_read_marker: f64,

    /// Wafer diameter in microns (default: 300,000).
    ///
    /// Only bounds the reference span reported alongside the regressions;
    /// the fits themselves do not depend on it.
    pub wafer_diameter: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            outlier_sigma: DEFAULT_OUTLIER_SIGMA,
            failed_read_marker: FAILED_READ_MARKER,
            wafer_diameter: DEFAULT_WAFER_DIAMETER,
        }
    }
}

impl Config {
    /// Span of reference positions covered by the wafer, `(-d/2, d/2)`.
    pub fn reference_span(&self) -> (f64, f64) {
        let half = self.wafer_diameter / 2.0;
        (-half, half)
    }
}
