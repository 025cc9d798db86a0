//! Pad width statistics against the nominal pad size.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::statistics::{mean, population_std};

/// Width statistics for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDimensions {
    /// Nominal pad width.
    pub nominal: f64,
    /// Mean measured width.
    pub average: f64,
    /// Population standard deviation of the measured widths.
    pub std_dev: f64,
}

impl AxisDimensions {
    fn compute(nominal: f64, dims: &[f64]) -> crate::Result<Self> {
        let average = mean(dims).ok_or(AnalysisError::EmptyInput("pad dimensions"))?;
        let std_dev = population_std(dims).ok_or(AnalysisError::EmptyInput("pad dimensions"))?;
        Ok(Self {
            nominal,
            average,
            std_dev,
        })
    }

    /// Mean measured width minus nominal width.
    pub fn bias(&self) -> f64 {
        self.average - self.nominal
    }

    /// The one-sigma band `(average - std, average + std)`.
    pub fn one_sigma(&self) -> (f64, f64) {
        (self.average - self.std_dev, self.average + self.std_dev)
    }
}

/// Width statistics for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionSummary {
    /// X widths.
    pub x: AxisDimensions,
    /// Y widths.
    pub y: AxisDimensions,
}

impl DimensionSummary {
    /// Summarize measured widths against the nominal pad size.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::EmptyInput`] if either width list is empty.
    pub fn compute(
        nominal_x: f64,
        nominal_y: f64,
        dims_x: &[f64],
        dims_y: &[f64],
    ) -> crate::Result<Self> {
        Ok(Self {
            x: AxisDimensions::compute(nominal_x, dims_x)?,
            y: AxisDimensions::compute(nominal_y, dims_y)?,
        })
    }
}

/// Width error per pad, `nominal - measured`.
///
/// Positive values mean the pad came out narrower than drawn.
pub fn dimensional_errors(nominal: f64, dims: &[f64]) -> Vec<f64> {
    dims.iter().map(|d| nominal - d).collect()
}
