//! Dimension-based outlier rejection.
//!
//! The instrument's field of view bounds every position it reports, so a
//! grossly wrong position never shows up. A distorted feature or an edge pad
//! is instead recognised by an implausible *width*. Rejection therefore
//! looks only at the X and Y dimensions, but once a pad is rejected its whole
//! row (dimensions, positions, nominals) moves to the rejected group.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AnalysisError;
use crate::statistics::{mean, population_std};
use crate::types::PadMeasurements;

/// Open interval `(lower, upper)` of accepted dimensions on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceWindow {
    /// Sample mean of the dimension.
    pub mean: f64,
    /// Population standard deviation of the dimension.
    pub std_dev: f64,
    /// Exclusive lower bound.
    pub lower: f64,
    /// Exclusive upper bound.
    pub upper: f64,
}

impl AcceptanceWindow {
    /// Window of `sigma` standard deviations around the mean of `dims`.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::EmptyInput`] if `dims` is empty.
    /// - [`AnalysisError::DegenerateInput`] if every dimension is identical.
    /// - [`AnalysisError::InvalidSample`] naming the first NaN or infinite
    ///   dimension.
    pub fn around(dims: &[f64], sigma: f64) -> crate::Result<Self> {
        AnalysisError::check_finite(dims)?;
        let m = mean(dims).ok_or(AnalysisError::EmptyInput("pad dimensions"))?;
        let sd = population_std(dims).ok_or(AnalysisError::EmptyInput("pad dimensions"))?;
        if sd == 0.0 {
            return Err(AnalysisError::DegenerateInput("pad dimensions have zero variance"));
        }
        Ok(Self {
            mean: m,
            std_dev: sd,
            lower: m - sigma * sd,
            upper: m + sigma * sd,
        })
    }

    /// Strictly inside the window.
    pub fn contains(&self, x: f64) -> bool {
        self.lower < x && x < self.upper
    }
}

/// Pads split by the dimension acceptance test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierPartition {
    /// Pads whose X and Y widths both lie inside their windows.
    pub accepted: PadMeasurements,
    /// Every other pad, in input order.
    pub rejected: PadMeasurements,
    /// Window applied to X widths.
    pub window_x: AcceptanceWindow,
    /// Window applied to Y widths.
    pub window_y: AcceptanceWindow,
}

impl OutlierPartition {
    /// Number of rejected pads.
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Split pads into accepted and rejected groups.
///
/// Each axis gets its own window of `sigma` population standard deviations
/// around its mean. A pad is accepted only if both widths fall strictly
/// inside; a pad failing either axis is rejected. Input order is preserved
/// within each group.
///
/// # Errors
///
/// See [`AcceptanceWindow::around`].
pub fn reject(measurements: &PadMeasurements, sigma: f64) -> crate::Result<OutlierPartition> {
    let window_x = AcceptanceWindow::around(measurements.dims_x(), sigma)?;
    let window_y = AcceptanceWindow::around(measurements.dims_y(), sigma)?;

    let mut accepted = PadMeasurements::default();
    let mut rejected = PadMeasurements::default();
    for pad in measurements.records() {
        if window_x.contains(pad.dim_x) && window_y.contains(pad.dim_y) {
            accepted.push(pad);
        } else {
            rejected.push(pad);
        }
    }

    info!(
        "{} outlying measurements removed (> {} std dev)",
        rejected.len(),
        sigma
    );

    Ok(OutlierPartition {
        accepted,
        rejected,
        window_x,
        window_y,
    })
}
