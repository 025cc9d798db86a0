//! Numeric constants shared across the pipeline.

/// Width of the dimension acceptance window in standard deviations.
///
/// Wafers carry on the order of 10^3 pads; at 4σ the expected number of
/// well-behaved pads falling outside the window is effectively zero.
pub const DEFAULT_OUTLIER_SIGMA: f64 = 4.0;

/// Value the coordinate measuring machine writes for a failed read.
pub const FAILED_READ_MARKER: f64 = 9999.9999;

/// Default wafer diameter in microns (300 mm wafer).
pub const DEFAULT_WAFER_DIAMETER: f64 = 300_000.0;

/// Scale factor from a unitless slope to parts per million.
pub const PPM: f64 = 1.0e6;

/// Singular values below this fraction of the largest are treated as zero.
pub(crate) const RANK_TOLERANCE: f64 = 1e-12;
