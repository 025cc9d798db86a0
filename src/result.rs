//! Report types produced by the analysis entry points.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::dimensions::DimensionSummary;
use crate::positional::{AxisRegressions, ErrorField, PrincipalAxes};
use crate::profile::{Extrema, ReconstructedProfile, Slopes};
use crate::screening::AcceptanceWindow;
use crate::types::PadMeasurements;

/// Complete result of one wafer analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaferReport {
    /// Pads analyzed after screening.
    pub pad_count: usize,

    /// Pads dropped because the instrument could not read them.
    pub failed_count: usize,

    /// Pads dropped by the dimension outlier test.
    pub rejected_count: usize,

    /// Nominal X location of every failed pad.
    pub failed_nominal_x: Vec<f64>,

    /// Nominal Y location of every failed pad.
    pub failed_nominal_y: Vec<f64>,

    /// Full rows of the pads rejected as outliers.
    pub rejected: PadMeasurements,

    /// Acceptance windows used for X and Y widths.
    pub acceptance: (AcceptanceWindow, AcceptanceWindow),

    /// Positional error vectors of the accepted pads.
    pub field: ErrorField,

    /// Principal axes of the raw field.
    pub axes: PrincipalAxes,

    /// Principal axes of the mean-centred field.
    pub centered_axes: PrincipalAxes,

    /// Centred positional error against nominal position.
    pub positional: AxisRegressions,

    /// Pad width statistics.
    pub dimensions: DimensionSummary,

    /// Pad width error (`nominal - measured`) against nominal position.
    pub dimensional: AxisRegressions,

    /// Reference positions spanned by the wafer, `(-d/2, d/2)`.
    pub reference_span: (f64, f64),

    /// Settings the analysis ran with.
    pub config: Config,
}

impl WaferReport {
    /// Fraction of input pads that survived screening.
    pub fn yield_fraction(&self) -> f64 {
        let total = self.pad_count + self.failed_count + self.rejected_count;
        if total == 0 {
            return 0.0;
        }
        self.pad_count as f64 / total as f64
    }
}

/// Result of a single-scan analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    /// The scan after trimming and interpolation.
    pub profile: ReconstructedProfile,

    /// Selected local minima and maxima.
    pub extrema: Extrema,

    /// Discrete slopes with the steepest picks.
    pub slopes: Slopes,
}

/// Result of a multi-scan analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSetReport {
    /// Coordinates of the common window.
    pub coordinates: Vec<f64>,

    /// Elementwise mean of the aligned scans.
    pub average: Vec<f64>,

    /// Cosine similarity of each scan with the average, in input order.
    pub correlations: Vec<f64>,

    /// First principal component of the scans, when requested.
    pub direction: Option<Vec<f64>>,
}

impl ProfileSetReport {
    /// Index and value of the scan least similar to the average.
    pub fn weakest(&self) -> Option<(usize, f64)> {
        self.correlations
            .iter()
            .copied()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}
