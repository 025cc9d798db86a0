//! Profile analysis for pad scrub-mark scans.
//!
//! This module provides:
//! - Gap trimming and linear-interpolation reconstruction of a raw scan
//! - Extremum and slope-weight detection on one reconstructed scan
//! - Alignment, averaging, and correlation of a set of scans

mod aligner;
mod extrema;
mod vector;

pub use aligner::{align, average, correlations, dominant_direction, patch_all, ProfileSet};
pub use extrema::{slope_weight, Extrema, ExtremaAnalyzer, Slopes};
pub use vector::{
    interpolate, reconstruct, trim_leading_gap, trim_trailing_gap, validate_post, validate_raw,
    ReconstructedProfile,
};
