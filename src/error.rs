//! Error type shared by every analysis stage.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failures raised by the analysis pipeline.
///
/// Every variant describes a violated precondition or a degenerate dataset.
/// Data-quality findings such as rejected pads are never reported through
/// this type; they are part of the regular results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Two sequences that must be index-aligned have different lengths.
    #[error("length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        /// Which sequence was checked.
        what: &'static str,
        /// Length of the reference sequence.
        expected: usize,
        /// Length actually supplied.
        found: usize,
    },

    /// A sample carried a non-finite value instead of an explicit gap.
    #[error("sample {index} is not a finite value or an explicit gap")]
    InvalidSample {
        /// Position of the offending element.
        index: usize,
    },

    /// An operation received no data.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Fewer samples than the requested operation needs.
    #[error("insufficient samples: needed {needed}, have {available}")]
    InsufficientSamples {
        /// Minimum number of samples required.
        needed: usize,
        /// Number of samples supplied.
        available: usize,
    },

    /// Interpolation met a gap touching the start or end of a vector.
    #[error("vector {vector} has a gap at its edge; trim before interpolating")]
    UntrimmedGap {
        /// Index of the vector within its collection (0 for a lone vector).
        vector: usize,
    },

    /// A vector with zero norm cannot be normalized.
    #[error("vector {index} has zero magnitude")]
    ZeroMagnitude {
        /// Index of the vector within its collection.
        index: usize,
    },

    /// The data carries no variation where some is required.
    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),

    /// The singular value decomposition did not produce its factors.
    #[error("singular value decomposition failed")]
    Decomposition,
}

impl AnalysisError {
    /// Check that `found` matches `expected`, naming the sequence on failure.
    pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> crate::Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::LengthMismatch {
                what,
                expected,
                found,
            })
        }
    }

    /// Check that every value is finite, naming the first offender.
    pub(crate) fn check_finite(values: &[f64]) -> crate::Result<()> {
        match values.iter().position(|x| !x.is_finite()) {
            Some(index) => Err(Self::InvalidSample { index }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_len() {
        assert!(AnalysisError::check_len("x", 3, 3).is_ok());
        let err = AnalysisError::check_len("measured x", 3, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "length mismatch for measured x: expected 3, found 2"
        );
    }

    #[test]
    fn test_check_finite() {
        assert!(AnalysisError::check_finite(&[0.0, -1.5, 1e300]).is_ok());
        assert_eq!(
            AnalysisError::check_finite(&[0.0, f64::INFINITY, f64::NAN]),
            Err(AnalysisError::InvalidSample { index: 1 })
        );
    }
}
