//! First-degree least-squares line fitting.

use serde::{Deserialize, Serialize};

use crate::constants::PPM;
use crate::error::AnalysisError;

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Change in y per unit x.
    pub slope: f64,
    /// Value of y at x = 0.
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Slope in parts per million.
    pub fn slope_ppm(&self) -> f64 {
        self.slope * PPM
    }
}

/// Fit `y` against `x` by ordinary least squares.
///
/// # Formula
///
/// ```text
/// slope     = sum((x - x̄)(y - ȳ)) / sum((x - x̄)^2)
/// intercept = ȳ - slope * x̄
/// ```
///
/// # Errors
///
/// - [`AnalysisError::LengthMismatch`] if the slices differ in length.
/// - [`AnalysisError::InsufficientSamples`] for fewer than two points.
/// - [`AnalysisError::DegenerateInput`] if every `x` is identical.
pub fn fit_line(x: &[f64], y: &[f64]) -> crate::Result<LinearFit> {
    AnalysisError::check_len("regression response", x.len(), y.len())?;
    let n = x.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientSamples {
            needed: 2,
            available: n,
        });
    }

    let x_mean = x.iter().sum::<f64>() / n as f64;
    let y_mean = y.iter().sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        sxx += dx * dx;
        sxy += dx * (yi - y_mean);
    }

    if sxx == 0.0 {
        return Err(AnalysisError::DegenerateInput("regression reference has no spread"));
    }

    let slope = sxy / sxx;
    Ok(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}
