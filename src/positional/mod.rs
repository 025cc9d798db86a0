//! Positional error field of a wafer.
//!
//! This module provides:
//! - Error vectors between nominal and measured pad centres
//! - Principal axes of the field
//! - Error-versus-reference regressions in all four axis pairings

mod components;
mod field;
mod regression;

pub use components::{principal_components, PrincipalAxes};
pub use field::{error_vectors, ErrorField};
pub use regression::{axis_regressions, AxisRegressions};
