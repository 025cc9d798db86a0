//! Per-pad positional error vectors.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::statistics::{centered, mean};

/// Error vectors `measured - nominal`, raw and mean-centred.
///
/// The centred field has the average translation removed, leaving rotation,
/// scale and other position-dependent distortion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorField {
    /// X error per pad.
    pub u: Vec<f64>,
    /// Y error per pad.
    pub v: Vec<f64>,
    /// `u` minus its mean.
    pub u_centered: Vec<f64>,
    /// `v` minus its mean.
    pub v_centered: Vec<f64>,
}

impl ErrorField {
    /// Number of pads in the field.
    pub fn len(&self) -> usize {
        self.u.len()
    }

    /// True if the field holds no pads.
    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }

    /// Mean translation `(mean(u), mean(v))` removed by centring.
    pub fn mean_offset(&self) -> (f64, f64) {
        (
            mean(&self.u).unwrap_or(0.0),
            mean(&self.v).unwrap_or(0.0),
        )
    }
}

/// Compute the error field of one wafer.
///
/// # Errors
///
/// - [`AnalysisError::LengthMismatch`] if the four inputs differ in length.
/// - [`AnalysisError::EmptyInput`] if they are empty.
/// - [`AnalysisError::InvalidSample`] naming the first pad with a NaN or
///   infinite coordinate.
pub fn error_vectors(
    nom_x: &[f64],
    nom_y: &[f64],
    meas_x: &[f64],
    meas_y: &[f64],
) -> crate::Result<ErrorField> {
    let n = nom_x.len();
    AnalysisError::check_len("nominal Y positions", n, nom_y.len())?;
    AnalysisError::check_len("measured X positions", n, meas_x.len())?;
    AnalysisError::check_len("measured Y positions", n, meas_y.len())?;
    if n == 0 {
        return Err(AnalysisError::EmptyInput("error field"));
    }
    let first_bad = [nom_x, nom_y, meas_x, meas_y]
        .iter()
        .filter_map(|column| column.iter().position(|x| !x.is_finite()))
        .min();
    if let Some(index) = first_bad {
        return Err(AnalysisError::InvalidSample { index });
    }

    let u: Vec<f64> = meas_x.iter().zip(nom_x).map(|(m, p)| m - p).collect();
    let v: Vec<f64> = meas_y.iter().zip(nom_y).map(|(m, p)| m - p).collect();
    let u_centered = centered(&u);
    let v_centered = centered(&v);

    Ok(ErrorField {
        u,
        v,
        u_centered,
        v_centered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pad() {
        let field = error_vectors(&[0.0], &[0.0], &[5.0], &[5.0]).unwrap();
        assert_eq!(field.u, vec![5.0]);
        assert_eq!(field.v, vec![5.0]);
        assert_eq!(field.u_centered, vec![0.0]);
        assert_eq!(field.v_centered, vec![0.0]);
        assert_eq!(field.mean_offset(), (5.0, 5.0));
    }

    #[test]
    fn test_centred_field_has_zero_mean() {
        let field = error_vectors(
            &[0.0, 10.0, 20.0],
            &[0.0, -10.0, 5.0],
            &[1.0, 12.0, 20.5],
            &[0.5, -10.0, 4.0],
        )
        .unwrap();
        assert_eq!(field.u, vec![1.0, 2.0, 0.5]);
        assert_eq!(field.v, vec![0.5, 0.0, -1.0]);
        assert!(field.u_centered.iter().sum::<f64>().abs() < 1e-12);
        assert!(field.v_centered.iter().sum::<f64>().abs() < 1e-12);
        let (du, dv) = field.mean_offset();
        assert!((du - 3.5 / 3.0).abs() < 1e-12);
        assert!((dv + 0.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_preconditions() {
        assert!(matches!(
            error_vectors(&[0.0, 1.0], &[0.0, 1.0], &[0.0], &[0.0, 1.0]),
            Err(AnalysisError::LengthMismatch { found: 1, .. })
        ));
        assert_eq!(
            error_vectors(&[], &[], &[], &[]),
            Err(AnalysisError::EmptyInput("error field"))
        );
    }

    #[test]
    fn test_non_finite_coordinates() {
        let nom = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(
            error_vectors(&nom, &nom, &[0.0, 1.0, f64::INFINITY, 3.0], &nom),
            Err(AnalysisError::InvalidSample { index: 2 })
        );
        assert_eq!(
            error_vectors(&nom, &[0.0, f64::NAN, 2.0, 3.0], &nom, &[0.0, 1.0, 2.0, f64::NEG_INFINITY]),
            Err(AnalysisError::InvalidSample { index: 1 })
        );
    }
}
