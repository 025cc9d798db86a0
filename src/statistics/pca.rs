//! Principal component analysis via singular value decomposition.
//!
//! Observations are the rows of the input matrix. The data are mean-centred
//! per column before decomposition, so the returned axes describe variance
//! about the centroid. Axes come back as unit vectors ordered by descending
//! singular value.

use nalgebra::DMatrix;

use crate::constants::RANK_TOLERANCE;
use crate::error::AnalysisError;

/// Result of a principal component fit.
#[derive(Debug, Clone, PartialEq)]
pub struct PcaFit {
    /// Unit principal axes, strongest first. Each has one entry per column
    /// of the input.
    pub components: Vec<Vec<f64>>,

    /// Singular value paired with each axis.
    pub singular_values: Vec<f64>,
}

/// Fit the first `k` principal components of `data`.
///
/// Signs are normalized so that the largest-magnitude entry of every axis is
/// positive; the decomposition itself leaves the sign arbitrary.
///
/// # Errors
///
/// - [`AnalysisError::EmptyInput`] if `data` has no rows or no columns.
/// - [`AnalysisError::InsufficientSamples`] if `k` exceeds `min(rows, cols)`.
/// - [`AnalysisError::InvalidSample`] naming the first row holding a NaN or
///   infinite entry.
/// - [`AnalysisError::DegenerateInput`] if the centred data is all zero.
/// - [`AnalysisError::Decomposition`] if the SVD yields no right factor.
pub fn principal_components(data: &DMatrix<f64>, k: usize) -> crate::Result<PcaFit> {
    let (n, p) = data.shape();
    if n == 0 || p == 0 {
        return Err(AnalysisError::EmptyInput("principal component data"));
    }
    let rank_bound = n.min(p);
    if k > rank_bound {
        return Err(AnalysisError::InsufficientSamples {
            needed: k,
            available: rank_bound,
        });
    }

    if let Some(row) = (0..n).find(|&i| data.row(i).iter().any(|x| !x.is_finite())) {
        return Err(AnalysisError::InvalidSample { index: row });
    }

    let column_means: Vec<f64> = (0..p).map(|j| data.column(j).mean()).collect();
    let centered = DMatrix::from_fn(n, p, |i, j| data[(i, j)] - column_means[j]);
    let scale = centered.norm();

    let svd = centered
        .try_svd(false, true, f64::EPSILON, 0)
        .ok_or(AnalysisError::Decomposition)?;
    let v_t = svd.v_t.ok_or(AnalysisError::Decomposition)?;
    let singular = svd.singular_values;

    let mut order: Vec<usize> = (0..singular.len()).collect();
    order.sort_by(|&a, &b| singular[b].total_cmp(&singular[a]).then(a.cmp(&b)));

    let leading = order.first().map(|&i| singular[i]).unwrap_or(0.0);
    if scale == 0.0 || leading <= RANK_TOLERANCE * scale {
        return Err(AnalysisError::DegenerateInput("data has no variance to decompose"));
    }

    let mut components = Vec::with_capacity(k);
    let mut singular_values = Vec::with_capacity(k);
    for &idx in order.iter().take(k) {
        let mut axis: Vec<f64> = v_t.row(idx).iter().copied().collect();
        normalize_sign(&mut axis);
        components.push(axis);
        singular_values.push(singular[idx]);
    }

    Ok(PcaFit {
        components,
        singular_values,
    })
}

/// Flip `axis` so its largest-magnitude entry is positive.
fn normalize_sign(axis: &mut [f64]) {
    let pivot = axis
        .iter()
        .copied()
        .fold(0.0_f64, |best, x| if x.abs() > best.abs() { x } else { best });
    if pivot < 0.0 {
        axis.iter_mut().for_each(|x| *x = -*x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_on_a_line() {
        // Points along y = 2x: the only direction of variance is (1, 2)/sqrt(5).
        let data = DMatrix::from_row_slice(4, 2, &[0.0, 0.0, 1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
        let fit = principal_components(&data, 2).unwrap();

        let inv = 1.0 / 5.0_f64.sqrt();
        assert!((fit.components[0][0] - inv).abs() < 1e-10);
        assert!((fit.components[0][1] - 2.0 * inv).abs() < 1e-10);
        assert!(fit.singular_values[0] > 1.0);
        assert!(fit.singular_values[1].abs() < 1e-10);
    }

    #[test]
    fn test_axes_are_orthonormal() {
        let data = DMatrix::from_row_slice(
            5,
            3,
            &[
                1.0, 0.2, -0.5, //
                -0.3, 2.0, 0.1, //
                0.7, -1.1, 0.9, //
                2.2, 0.4, -1.3, //
                -1.5, 0.0, 0.6,
            ],
        );
        let fit = principal_components(&data, 3).unwrap();
        for a in 0..3 {
            for b in 0..3 {
                let dot: f64 = fit.components[a]
                    .iter()
                    .zip(&fit.components[b])
                    .map(|(x, y)| x * y)
                    .sum();
                let expected = if a == b { 1.0 } else { 0.0 };
                assert!((dot - expected).abs() < 1e-9, "axes {} and {}: {}", a, b, dot);
            }
        }
        assert!(fit.singular_values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_sign_normalization() {
        let data = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, -3.0, -1.0]);
        let fit = principal_components(&data, 1).unwrap();
        assert!(fit.components[0][0] > 0.0);
    }

    #[test]
    fn test_degenerate_and_bounds() {
        let flat = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        assert!(matches!(
            principal_components(&flat, 1),
            Err(AnalysisError::DegenerateInput(_))
        ));

        let small = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        assert!(matches!(
            principal_components(&small, 3),
            Err(AnalysisError::InsufficientSamples { needed: 3, available: 2 })
        ));
    }

    #[test]
    fn test_non_finite_rows_rejected() {
        let data = DMatrix::from_row_slice(3, 2, &[0.0, 1.0, 2.0, f64::NAN, 1.0, 3.0]);
        assert_eq!(
            principal_components(&data, 1),
            Err(AnalysisError::InvalidSample { index: 1 })
        );
        let data = DMatrix::from_row_slice(2, 2, &[f64::INFINITY, 0.0, 1.0, 1.0]);
        assert_eq!(
            principal_components(&data, 1),
            Err(AnalysisError::InvalidSample { index: 0 })
        );
    }
}
