//! Pad data screening ahead of positional analysis.
//!
//! Two passes, run in order:
//! - Failed reads: pads the instrument could not measure
//! - Outliers: pads whose width lies far outside the wafer's distribution

mod failed;
mod outlier;

pub use failed::{screen_failed_reads, FailedReadScreen};
pub use outlier::{reject, AcceptanceWindow, OutlierPartition};
