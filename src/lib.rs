//! # pad-metrology
//!
//! Numeric analysis of bond pad metrology data.
//!
//! Two kinds of instrument data are handled:
//! - Pad tables from a coordinate measuring machine (pad widths and centres
//!   against their nominal values): failed reads and outliers are screened
//!   out, then the positional error field, its principal axes, and the
//!   error-versus-position regressions are computed
//! - Profilometer scans of scrub marks: gaps are trimmed and interpolated,
//!   extrema and steep slopes are picked out, and several scans can be
//!   aligned and compared against their average
//!
//! ## Quick Start
//!
//! ```ignore
//! use pad_metrology::{PadMeasurements, WaferAnalyzer};
//!
//! let pads = PadMeasurements::new(dims_x, dims_y, pos_x, pos_y, nom_x, nom_y)?;
//! let report = WaferAnalyzer::new().analyze(80.0, 80.0, &pads)?;
//!
//! println!("X scale error: {:.3} ppm", report.positional.x_vs_x.slope_ppm());
//! println!("{}", pad_metrology::output::format_wafer_report(&report));
//! ```
//!
//! Every stage is also available on its own through the [`profile`],
//! [`screening`], [`positional`] and [`statistics`] modules.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod analyzer;
mod config;
mod constants;
mod error;
mod result;
mod thread_pool;
mod types;

// Functional modules
pub mod dimensions;
pub mod output;
pub mod positional;
pub mod profile;
pub mod screening;
pub mod statistics;

// Re-exports for public API
pub use analyzer::WaferAnalyzer;
pub use config::Config;
pub use constants::{DEFAULT_OUTLIER_SIGMA, DEFAULT_WAFER_DIAMETER, FAILED_READ_MARKER, PPM};
pub use error::{AnalysisError, Result};
pub use result::{ProfileReport, ProfileSetReport, WaferReport};
pub use types::{Matrix2, PadMeasurements, PadRecord, ParseSampleError, Profile, Sample, Vector2};

/// Analyze one wafer with the default configuration.
///
/// Shorthand for `WaferAnalyzer::new().analyze(...)`.
pub fn analyze(
    nominal_pad_x: f64,
    nominal_pad_y: f64,
    measurements: &PadMeasurements,
) -> Result<WaferReport> {
    WaferAnalyzer::new().analyze(nominal_pad_x, nominal_pad_y, measurements)
}
