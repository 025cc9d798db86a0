//! Gap handling for a single 1-D profile.
//!
//! Reconstruction of a raw scan proceeds in four steps:
//! 1. Check every element is a finite value or an explicit gap
//! 2. Trim the gap run at the start, then at the end
//! 3. Fill interior gaps by linear interpolation between the neighbours
//! 4. Check nothing but finite values remain
//!
//! Coordinates are trimmed by the same counts as the samples so the two
//! stay index-aligned.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::Sample;

/// A scan with every gap resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructedProfile {
    /// Coordinates of the retained points.
    pub coordinates: Vec<f64>,
    /// Heights at the retained points, gaps filled.
    pub values: Vec<f64>,
    /// Points removed from the start of the scan.
    pub trimmed_front: usize,
    /// Points removed from the end of the scan.
    pub trimmed_back: usize,
}

/// True iff every element is a finite value or an explicit gap.
pub fn validate_raw(seq: &[Sample]) -> bool {
    seq.iter().all(|s| match *s {
        Sample::Value(x) => x.is_finite(),
        Sample::Missing => true,
    })
}

/// True iff every element is a finite value.
pub fn validate_post(seq: &[Sample]) -> bool {
    seq.iter()
        .all(|s| matches!(*s, Sample::Value(x) if x.is_finite()))
}

/// Remove the run of gaps at the start of `seq`.
///
/// Returns the number of elements removed and the remaining slice.
pub fn trim_leading_gap(seq: &[Sample]) -> (usize, &[Sample]) {
    let count = seq.iter().take_while(|s| s.is_missing()).count();
    (count, &seq[count..])
}

/// Remove the run of gaps at the end of `seq`.
///
/// Returns the number of elements removed and the remaining slice.
pub fn trim_trailing_gap(seq: &[Sample]) -> (usize, &[Sample]) {
    let count = seq.iter().rev().take_while(|s| s.is_missing()).count();
    (count, &seq[..seq.len() - count])
}

/// Fill interior gaps by linear interpolation.
///
/// A run of `k` gaps between values `a` and `b` is filled with
/// `a + i * (b - a) / (k + 1)` for `i = 1..=k`. Sequences without gaps are
/// returned unchanged.
///
/// # Errors
///
/// Returns [`AnalysisError::UntrimmedGap`] if a gap touches either end; trim
/// with [`trim_leading_gap`] and [`trim_trailing_gap`] first.
pub fn interpolate(seq: &[Sample]) -> crate::Result<Vec<Sample>> {
    if seq.first().map_or(false, Sample::is_missing) || seq.last().map_or(false, Sample::is_missing)
    {
        return Err(AnalysisError::UntrimmedGap { vector: 0 });
    }

    let mut out = seq.to_vec();
    let mut i = 0;
    while i < out.len() {
        if !out[i].is_missing() {
            i += 1;
            continue;
        }

        // out[i - 1] is a value: edges were checked above and every earlier
        // gap has already been filled.
        let start = i;
        while out[i].is_missing() {
            i += 1;
        }
        let (a, b) = match (out[start - 1].value(), out[i].value()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(AnalysisError::UntrimmedGap { vector: 0 }),
        };

        let k = i - start;
        let step = (b - a) / (k + 1) as f64;
        for (offset, slot) in out[start..i].iter_mut().enumerate() {
            *slot = Sample::Value(a + (offset + 1) as f64 * step);
        }
    }

    Ok(out)
}

/// Run the full reconstruction pipeline on a raw scan.
///
/// # Errors
///
/// - [`AnalysisError::LengthMismatch`] if the sequences differ in length.
/// - [`AnalysisError::InvalidSample`] if a sample holds a non-finite value.
pub fn reconstruct(coordinates: &[f64], samples: &[Sample]) -> crate::Result<ReconstructedProfile> {
    AnalysisError::check_len("profile samples", coordinates.len(), samples.len())?;
    if !validate_raw(samples) {
        return Err(AnalysisError::InvalidSample {
            index: first_invalid(samples),
        });
    }

    let (trimmed_front, rest) = trim_leading_gap(samples);
    let (trimmed_back, core) = trim_trailing_gap(rest);
    let filled = interpolate(core)?;

    if !validate_post(&filled) {
        return Err(AnalysisError::InvalidSample {
            index: trimmed_front + first_invalid(&filled),
        });
    }

    let values = filled.iter().filter_map(Sample::value).collect();
    let end = coordinates.len() - trimmed_back;
    Ok(ReconstructedProfile {
        coordinates: coordinates[trimmed_front..end].to_vec(),
        values,
        trimmed_front,
        trimmed_back,
    })
}

fn first_invalid(seq: &[Sample]) -> usize {
    seq.iter()
        .position(|s| !matches!(*s, Sample::Value(x) if x.is_finite()) && !s.is_missing())
        .or_else(|| seq.iter().position(Sample::is_missing))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: Sample = Sample::Missing;

    fn v(x: f64) -> Sample {
        Sample::Value(x)
    }

    fn values(xs: &[f64]) -> Vec<Sample> {
        xs.iter().copied().map(Sample::Value).collect()
    }

    #[test]
    fn test_validate_raw() {
        assert!(validate_raw(&[M, M, v(1.0), v(2.0), M, v(5.0), M]));
        assert!(!validate_raw(&[v(1.0), v(f64::NAN)]));
        assert!(!validate_raw(&[v(f64::INFINITY)]));
        assert!(validate_raw(&[]));
    }

    #[test]
    fn test_trim_trailing_gap() {
        let seq = [v(1.0), v(2.0), v(3.0), M, M];
        let (count, rest) = trim_trailing_gap(&seq);
        assert_eq!(count, 2);
        assert_eq!(rest, values(&[1.0, 2.0, 3.0]).as_slice());

        let seq = [M, M, v(1.0), v(2.0)];
        let (count, rest) = trim_trailing_gap(&seq);
        assert_eq!(count, 0);
        assert_eq!(rest, &seq[..]);
    }

    #[test]
    fn test_trim_leading_gap() {
        let seq = [M, M, v(1.0), v(2.0), v(3.0)];
        let (count, rest) = trim_leading_gap(&seq);
        assert_eq!(count, 2);
        assert_eq!(rest, values(&[1.0, 2.0, 3.0]).as_slice());

        let (count, rest) = trim_leading_gap(&[]);
        assert_eq!(count, 0);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_all_missing_trims_to_empty() {
        let seq = [M, M, M];
        let (front, rest) = trim_leading_gap(&seq);
        let (back, rest) = trim_trailing_gap(rest);
        assert_eq!((front, back), (3, 0));
        assert!(interpolate(rest).unwrap().is_empty());
    }

    #[test]
    fn test_interpolate_interior_run() {
        let seq = [v(1.0), v(2.0), v(3.0), M, M, M, v(4.0), v(5.0)];
        let out = interpolate(&seq).unwrap();
        assert_eq!(out, values(&[1.0, 2.0, 3.0, 3.25, 3.5, 3.75, 4.0, 5.0]));
    }

    #[test]
    fn test_interpolate_without_gaps_is_identity() {
        let seq = values(&[0.0, 1.0, 1.1, 2.0, -2.2]);
        assert_eq!(interpolate(&seq).unwrap(), seq);
    }

    #[test]
    fn test_interpolate_rejects_edge_gaps() {
        assert_eq!(
            interpolate(&[M, v(1.0)]),
            Err(AnalysisError::UntrimmedGap { vector: 0 })
        );
        assert_eq!(
            interpolate(&[v(1.0), M]),
            Err(AnalysisError::UntrimmedGap { vector: 0 })
        );
    }

    #[test]
    fn test_validate_post() {
        assert!(!validate_post(&[M, v(1.0), v(2.0)]));
        assert!(validate_post(&values(&[0.0, 1.0, 1.1, 2.0, 2.2, 3.0, 3.3])));
    }

    #[test]
    fn test_reconstruct_full_pipeline() {
        let samples = [
            M, M, M, v(1.0), v(2.0), M, v(4.0), M, M, v(7.0), v(8.0), v(9.0), M,
        ];
        let coords: Vec<f64> = (0..samples.len()).map(|i| i as f64).collect();
        let rec = reconstruct(&coords, &samples).unwrap();

        assert_eq!(rec.values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(rec.coordinates, (3..12).map(|i| i as f64).collect::<Vec<_>>());
        assert_eq!((rec.trimmed_front, rec.trimmed_back), (3, 1));
    }

    #[test]
    fn test_reconstruct_reports_invalid_sample() {
        let err = reconstruct(&[0.0, 1.0, 2.0], &[v(1.0), v(f64::NAN), v(2.0)]).unwrap_err();
        assert_eq!(err, AnalysisError::InvalidSample { index: 1 });
    }
}
