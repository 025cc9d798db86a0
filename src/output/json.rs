//! JSON serialization for analysis reports.

use serde::Serialize;

/// Serialize a report to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails. Report types only hold plain
/// numbers and sequences, but a non-finite float is written as `null`.
pub fn to_json<T: Serialize>(report: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize a report to a pretty-printed JSON string.
///
/// # Errors
///
/// See [`to_json`].
pub fn to_json_pretty<T: Serialize>(report: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
