//! Error-versus-reference line fits in all four axis pairings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;
use crate::statistics::{fit_line, LinearFit};

/// Four independent least-squares fits of error against reference position.
///
/// The same fits serve both positional errors (pad centre offsets) and
/// dimensional errors (pad width offsets). A same-axis slope measures scale
/// error; a cross-axis slope measures rotation or shear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRegressions {
    /// X error against X reference.
    pub x_vs_x: LinearFit,
    /// Y error against Y reference.
    pub y_vs_y: LinearFit,
    /// X error against Y reference.
    pub x_vs_y: LinearFit,
    /// Y error against X reference.
    pub y_vs_x: LinearFit,
}

impl AxisRegressions {
    /// Slopes in ppm, ordered `[x_vs_x, y_vs_y, x_vs_y, y_vs_x]`.
    pub fn slopes_ppm(&self) -> [f64; 4] {
        [
            self.x_vs_x.slope_ppm(),
            self.y_vs_y.slope_ppm(),
            self.x_vs_y.slope_ppm(),
            self.y_vs_x.slope_ppm(),
        ]
    }

    /// Each fit evaluated at the two ends of `span`, as drawn across a wafer.
    pub fn endpoints(&self, span: (f64, f64)) -> [[f64; 2]; 4] {
        let ends = |fit: &LinearFit| [fit.predict(span.0), fit.predict(span.1)];
        [
            ends(&self.x_vs_x),
            ends(&self.y_vs_y),
            ends(&self.x_vs_y),
            ends(&self.y_vs_x),
        ]
    }
}

/// Fit X and Y errors against X and Y reference positions.
///
/// # Errors
///
/// - [`AnalysisError::LengthMismatch`] if the four inputs differ in length.
/// - [`AnalysisError::InsufficientSamples`] for fewer than two pads.
/// - [`AnalysisError::DegenerateInput`] if a reference axis is constant.
pub fn axis_regressions(
    errors_x: &[f64],
    errors_y: &[f64],
    nominal_x: &[f64],
    nominal_y: &[f64],
) -> crate::Result<AxisRegressions> {
    let n = nominal_x.len();
    AnalysisError::check_len("nominal Y positions", n, nominal_y.len())?;
    AnalysisError::check_len("X errors", n, errors_x.len())?;
    AnalysisError::check_len("Y errors", n, errors_y.len())?;

    let fits = AxisRegressions {
        x_vs_x: fit_line(nominal_x, errors_x)?,
        y_vs_y: fit_line(nominal_y, errors_y)?,
        x_vs_y: fit_line(nominal_y, errors_x)?,
        y_vs_x: fit_line(nominal_x, errors_y)?,
    };
    debug!("axis regression slopes (ppm): {:?}", fits.slopes_ppm());
    Ok(fits)
}
