//! Alignment and comparison of a set of profiles.
//!
//! Profiles captured across several cursors share one coordinate axis but
//! lose different amounts of data at their edges. Alignment trims the whole
//! set to one common window; patching then fills the interior gaps of each
//! profile. The aligned set is compared against its own average profile.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::AnalysisError;
use crate::statistics::principal_components;
use crate::thread_pool;
use crate::types::Sample;

use super::vector::{interpolate, trim_leading_gap, trim_trailing_gap, validate_raw};

/// Trim every profile and the shared coordinates to one common window.
///
/// The window drops as many points from the front as the profile with the
/// longest leading gap needs, and likewise at the back. Profiles that needed
/// less trimming lose valid points; in exchange all outputs share a length.
///
/// # Errors
///
/// - [`AnalysisError::EmptyInput`] if `vectors` is empty.
/// - [`AnalysisError::LengthMismatch`] if a profile's length differs from
///   the coordinates'.
/// - [`AnalysisError::InvalidSample`] if a profile holds a non-finite value.
pub fn align(
    coordinates: &[f64],
    vectors: &[Vec<Sample>],
) -> crate::Result<(Vec<f64>, Vec<Vec<Sample>>)> {
    if vectors.is_empty() {
        return Err(AnalysisError::EmptyInput("profile set"));
    }

    let len = coordinates.len();
    let mut trims = Vec::with_capacity(vectors.len());
    let mut max_front = 0;
    let mut max_back = 0;
    for vector in vectors {
        AnalysisError::check_len("profile in set", len, vector.len())?;
        if !validate_raw(vector) {
            let index = vector
                .iter()
                .position(|s| matches!(*s, Sample::Value(x) if !x.is_finite()))
                .unwrap_or(0);
            return Err(AnalysisError::InvalidSample { index });
        }
        let (front, _) = trim_leading_gap(vector);
        let (back, _) = trim_trailing_gap(vector);
        trims.push((front, back));
        max_front = max_front.max(front);
        max_back = max_back.max(back);
    }

    let start = max_front.min(len);
    let end = len.saturating_sub(max_back).max(start);
    debug!("aligned window [{}, {}) of {} points", start, end, len);
    if start == end && len > 0 {
        warn!("alignment window is empty; every profile was trimmed away");
    }
    let over_trimmed = trims
        .iter()
        .filter(|&&(front, back)| front < max_front || back < max_back)
        .count();
    if over_trimmed > 0 {
        warn!(
            "common window drops measured samples from {} of {} profiles",
            over_trimmed,
            vectors.len()
        );
    }

    let aligned = vectors.iter().map(|v| v[start..end].to_vec()).collect();
    Ok((coordinates[start..end].to_vec(), aligned))
}

/// Fill the interior gaps of every profile.
///
/// # Errors
///
/// Returns [`AnalysisError::UntrimmedGap`] naming the first profile that
/// still has a gap at its edge (possible when the common window cuts into
/// an interior gap).
pub fn patch_all(vectors: &[Vec<Sample>]) -> crate::Result<Vec<Vec<f64>>> {
    let patch = |(index, vector): (usize, &Vec<Sample>)| -> crate::Result<Vec<f64>> {
        let filled = interpolate(vector).map_err(|err| match err {
            AnalysisError::UntrimmedGap { .. } => AnalysisError::UntrimmedGap { vector: index },
            other => other,
        })?;
        Ok(filled.iter().filter_map(Sample::value).collect())
    };

    #[cfg(feature = "parallel")]
    let patched: crate::Result<Vec<Vec<f64>>> =
        thread_pool::install(|| vectors.par_iter().enumerate().map(patch).collect());

    #[cfg(not(feature = "parallel"))]
    let patched: crate::Result<Vec<Vec<f64>>> =
        thread_pool::install(|| vectors.iter().enumerate().map(patch).collect());

    patched
}

/// Elementwise mean of equally long profiles.
///
/// # Errors
///
/// - [`AnalysisError::EmptyInput`] if `vectors` is empty.
/// - [`AnalysisError::LengthMismatch`] if the lengths differ.
pub fn average(vectors: &[Vec<f64>]) -> crate::Result<Vec<f64>> {
    let first = vectors
        .first()
        .ok_or(AnalysisError::EmptyInput("profile set"))?;
    for v in vectors {
        AnalysisError::check_len("profile in set", first.len(), v.len())?;
    }

    let count = vectors.len() as f64;
    Ok((0..first.len())
        .map(|i| vectors.iter().map(|v| v[i]).sum::<f64>() / count)
        .collect())
}

/// Cosine similarity of each profile with the average profile.
///
/// Both sides are scaled to unit length before the dot product, so every
/// coefficient lies in [-1, 1].
///
/// # Errors
///
/// - Errors of [`average`].
/// - [`AnalysisError::ZeroMagnitude`] if a profile, or the average, has zero
///   norm. The average is reported with index `vectors.len()`.
pub fn correlations(vectors: &[Vec<f64>]) -> crate::Result<Vec<f64>> {
    let avg = average(vectors)?;
    let avg_unit = unit(&avg).ok_or(AnalysisError::ZeroMagnitude {
        index: vectors.len(),
    })?;

    let correlate = |(index, v): (usize, &Vec<f64>)| -> crate::Result<f64> {
        let v_unit = unit(v).ok_or(AnalysisError::ZeroMagnitude { index })?;
        Ok(v_unit.iter().zip(&avg_unit).map(|(a, b)| a * b).sum())
    };

    #[cfg(feature = "parallel")]
    let coefficients = thread_pool::install(|| {
        vectors
            .par_iter()
            .enumerate()
            .map(correlate)
            .collect::<crate::Result<Vec<f64>>>()
    })?;

    #[cfg(not(feature = "parallel"))]
    let coefficients = thread_pool::install(|| {
        vectors
            .iter()
            .enumerate()
            .map(correlate)
            .collect::<crate::Result<Vec<f64>>>()
    })?;

    for (i, c) in coefficients.iter().enumerate() {
        debug!("correlation of profile {}: {}", i + 1, c);
    }
    Ok(coefficients)
}

/// First principal component of the profiles taken as points in R^L.
///
/// Describes the shape along which the profiles vary most; used as a
/// visual overlay next to the average.
///
/// # Errors
///
/// - Errors of [`average`].
/// - [`AnalysisError::DegenerateInput`] if the profiles are all identical.
pub fn dominant_direction(vectors: &[Vec<f64>]) -> crate::Result<Vec<f64>> {
    let width = average(vectors)?.len();
    let data = DMatrix::from_fn(vectors.len(), width, |i, j| vectors[i][j]);
    let fit = principal_components(&data, 1)?;
    Ok(fit.components.into_iter().next().unwrap_or_default())
}

fn unit(v: &[f64]) -> Option<Vec<f64>> {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    Some(v.iter().map(|x| x / norm).collect())
}

/// An aligned and patched set of profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSet {
    coordinates: Vec<f64>,
    vectors: Vec<Vec<f64>>,
}

impl ProfileSet {
    /// Align the raw profiles to a common window and patch their gaps.
    pub fn new(coordinates: &[f64], vectors: &[Vec<Sample>]) -> crate::Result<Self> {
        let (coordinates, aligned) = align(coordinates, vectors)?;
        let vectors = patch_all(&aligned)?;
        Ok(Self {
            coordinates,
            vectors,
        })
    }

    /// Shared coordinates after alignment.
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Patched profiles, in input order.
    pub fn vectors(&self) -> &[Vec<f64>] {
        &self.vectors
    }

    /// See [`average`].
    pub fn average(&self) -> crate::Result<Vec<f64>> {
        average(&self.vectors)
    }

    /// See [`correlations`].
    pub fn correlations(&self) -> crate::Result<Vec<f64>> {
        correlations(&self.vectors)
    }

    /// See [`dominant_direction`].
    pub fn dominant_direction(&self) -> crate::Result<Vec<f64>> {
        dominant_direction(&self.vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    const M: Sample = Sample::Missing;

    fn v(xs: &[f64]) -> Vec<Sample> {
        Sample::from_readings(xs)
    }

    #[test]
    fn test_align_uses_widest_trims() {
        let coords = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let nan = f64::NAN;
        let vectors = vec![
            v(&[nan, 1.0, 2.0, 3.0, 4.0, 5.0]),
            v(&[0.0, 1.0, 2.0, 3.0, nan, nan]),
        ];
        let (x, aligned) = align(&coords, &vectors).unwrap();
        assert_eq!(x, vec![1.0, 2.0, 3.0]);
        assert_eq!(aligned[0], v(&[1.0, 2.0, 3.0]));
        assert_eq!(aligned[1], v(&[1.0, 2.0, 3.0]));
    }

    #[derive(Clone, Default)]
    struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogCapture {
        type Writer = LogCapture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn warnings_of<T>(f: impl FnOnce() -> T) -> (T, String) {
        let capture = LogCapture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        (out, logs)
    }

    #[test]
    fn test_align_warns_when_window_drops_samples() {
        let coords = [0.0, 1.0, 2.0, 3.0];
        let vectors = vec![
            v(&[f64::NAN, 1.0, 2.0, 3.0]),
            v(&[0.0, 1.0, 2.0, 3.0]),
            v(&[f64::NAN, 1.0, 2.0, 3.0]),
        ];
        let (aligned, logs) = warnings_of(|| align(&coords, &vectors));
        assert_eq!(aligned.unwrap().0, vec![1.0, 2.0, 3.0]);
        assert!(
            logs.contains("common window drops measured samples from 1 of 3 profiles"),
            "{}",
            logs
        );

        let (_, logs) = warnings_of(|| align(&coords, &vectors[..1]));
        assert!(logs.is_empty(), "{}", logs);
    }

    #[test]
    fn test_align_rejects_bad_sets() {
        assert_eq!(
            align(&[0.0], &[]),
            Err(AnalysisError::EmptyInput("profile set"))
        );
        assert!(matches!(
            align(&[0.0, 1.0], &[v(&[1.0])]),
            Err(AnalysisError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_align_all_missing_empties_set() {
        let coords = [0.0, 1.0, 2.0];
        let vectors = vec![v(&[1.0, 2.0, 3.0]), vec![M, M, M]];
        let (x, aligned) = align(&coords, &vectors).unwrap();
        assert!(x.is_empty());
        assert!(aligned.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_patch_all_names_offending_vector() {
        let vectors = vec![v(&[1.0, f64::NAN, 3.0]), v(&[f64::NAN, 2.0, 3.0])];
        assert_eq!(
            patch_all(&vectors),
            Err(AnalysisError::UntrimmedGap { vector: 1 })
        );
    }

    #[test]
    fn test_round_trip_lengths_match() {
        let coords: Vec<f64> = (0..8).map(|i| i as f64 * 0.5).collect();
        let nan = f64::NAN;
        let vectors = vec![
            v(&[nan, nan, 1.0, 2.0, nan, 4.0, 5.0, 6.0]),
            v(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, nan, nan]),
            v(&[nan, 1.0, 2.0, nan, nan, 5.0, 6.0, nan]),
        ];
        let set = ProfileSet::new(&coords, &vectors).unwrap();
        assert_eq!(set.coordinates(), &[1.0, 1.5, 2.0, 2.5]);
        assert!(set.vectors().iter().all(|p| p.len() == 4));
        assert_eq!(set.vectors()[0], vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(set.vectors()[2], vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_average() {
        let avg = average(&[vec![1.0, 2.0], vec![3.0, 6.0]]).unwrap();
        assert_eq!(avg, vec![2.0, 4.0]);
        assert!(average(&[vec![1.0], vec![1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_identical_vectors_correlate_perfectly() {
        let p = vec![0.3, -1.2, 2.5, 0.7];
        let c = correlations(&[p.clone(), p.clone(), p]).unwrap();
        assert!(c.iter().all(|x| (x - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_correlation_is_scale_invariant_and_signed() {
        let c = correlations(&[vec![1.0, 0.0], vec![2.0, 0.0], vec![0.0, 1.0]]).unwrap();
        // Average is (1, 1/3).
        let expected = 1.0 / (1.0_f64 + 1.0 / 9.0).sqrt();
        assert!((c[0] - expected).abs() < 1e-12);
        assert!((c[1] - expected).abs() < 1e-12);
        assert!(c[2] > 0.0 && c[2] < c[0]);
    }

    #[test]
    fn test_zero_vector_is_rejected() {
        assert_eq!(
            correlations(&[vec![1.0, 1.0], vec![0.0, 0.0]]),
            Err(AnalysisError::ZeroMagnitude { index: 1 })
        );
    }

    #[test]
    fn test_dominant_direction() {
        // Profiles differ only by how much of the shape (1, 0, -1) they carry.
        let shape = [1.0, 0.0, -1.0];
        let vectors: Vec<Vec<f64>> = [0.0, 1.0, 2.0, 3.0]
            .iter()
            .map(|k| shape.iter().map(|s| 5.0 + k * s).collect())
            .collect();
        let d = dominant_direction(&vectors).unwrap();
        let inv = 1.0 / 2.0_f64.sqrt();
        assert!((d[0].abs() - inv).abs() < 1e-10);
        assert!(d[1].abs() < 1e-10);
        assert!((d[0] + d[2]).abs() < 1e-10);

        assert!(dominant_direction(&[vec![1.0, 2.0], vec![1.0, 2.0]]).is_err());
    }
}
