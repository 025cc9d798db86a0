//! Principal axes of an error field.
//!
//! Every error vector enters the fit together with an origin point `(0, 0)`.
//! Anchoring each sample to the origin means a uniform translation of the
//! whole field still shows up as a principal direction, instead of being
//! centred away.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;
use crate::statistics;
use crate::types::{Matrix2, Vector2};

/// Dominant and secondary error directions of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrincipalAxes {
    /// Unit axes `[x, y]`, dominant first.
    pub components: [[f64; 2]; 2],
    /// Singular value of each axis; larger means more systematic error.
    pub magnitudes: [f64; 2],
}

impl PrincipalAxes {
    /// Axis `i` as a vector (0 = dominant).
    pub fn axis(&self, i: usize) -> Vector2 {
        Vector2::new(self.components[i][0], self.components[i][1])
    }

    /// Both axes as the rows of a matrix.
    pub fn as_matrix(&self) -> Matrix2 {
        Matrix2::new(
            self.components[0][0],
            self.components[0][1],
            self.components[1][0],
            self.components[1][1],
        )
    }

    /// Axis `i` scaled by its singular value.
    pub fn weighted_axis(&self, i: usize) -> Vector2 {
        self.axis(i) * self.magnitudes[i]
    }

    /// Ratio of secondary to dominant magnitude, in `[0, 1]`.
    pub fn anisotropy(&self) -> f64 {
        if self.magnitudes[0] == 0.0 {
            return 0.0;
        }
        self.magnitudes[1] / self.magnitudes[0]
    }
}

/// Fit both principal axes of the field `(u[i], v[i])`.
///
/// # Errors
///
/// - [`AnalysisError::LengthMismatch`] if `u` and `v` differ in length.
/// - [`AnalysisError::EmptyInput`] if they are empty.
/// - [`AnalysisError::DegenerateInput`] if every error vector is zero.
/// - [`AnalysisError::InvalidSample`] naming the first pad whose error is NaN
///   or infinite.
pub fn principal_components(u: &[f64], v: &[f64]) -> crate::Result<PrincipalAxes> {
    AnalysisError::check_len("Y error components", u.len(), v.len())?;
    if u.is_empty() {
        return Err(AnalysisError::EmptyInput("error field"));
    }
    if let Some(index) = u.iter().zip(v).position(|(a, b)| !(a.is_finite() && b.is_finite())) {
        return Err(AnalysisError::InvalidSample { index });
    }

    // Row 2i is pad i, row 2i + 1 is the origin.
    let data = DMatrix::from_fn(2 * u.len(), 2, |row, col| {
        if row % 2 == 1 {
            0.0
        } else if col == 0 {
            u[row / 2]
        } else {
            v[row / 2]
        }
    });

    let fit = statistics::principal_components(&data, 2)?;
    let axis = |i: usize| -> [f64; 2] {
        fit.components
            .get(i)
            .map(|c| [c[0], c[1]])
            .unwrap_or_default()
    };
    let axes = PrincipalAxes {
        components: [axis(0), axis(1)],
        magnitudes: [
            fit.singular_values.first().copied().unwrap_or(0.0),
            fit.singular_values.get(1).copied().unwrap_or(0.0),
        ],
    };
    debug!(
        "principal axes {:?} with magnitudes {:?}",
        axes.components, axes.magnitudes
    );
    Ok(axes)
}
