//! Rendering of analysis reports.

pub mod json;
pub mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{format_profile_report, format_profile_set_report, format_wafer_report};
