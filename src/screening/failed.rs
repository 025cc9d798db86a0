//! Failed-read screening.
//!
//! When the measuring machine cannot resolve a feature it writes a marker
//! value in place of the reading. Any pad with a marker (or NaN) in a
//! measured column is dropped before any statistics are computed.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{PadMeasurements, PadRecord};

/// Pads surviving the failed-read check, plus where the failures were.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedReadScreen {
    /// Pads whose every measured value was read.
    pub valid: PadMeasurements,
    /// Nominal X location of every failed pad.
    pub failed_nominal_x: Vec<f64>,
    /// Nominal Y location of every failed pad.
    pub failed_nominal_y: Vec<f64>,
}

impl FailedReadScreen {
    /// Number of pads dropped.
    pub fn failed_count(&self) -> usize {
        self.failed_nominal_x.len()
    }
}

fn is_failed(pad: &PadRecord, marker: f64) -> bool {
    [pad.dim_x, pad.dim_y, pad.pos_x, pad.pos_y]
        .iter()
        .any(|&x| x.is_nan() || x == marker)
}

/// Drop every pad whose measured dimension or position equals `marker` or
/// is NaN. Nominal columns are never tested.
pub fn screen_failed_reads(measurements: &PadMeasurements, marker: f64) -> FailedReadScreen {
    let mut valid = PadMeasurements::default();
    let mut failed_nominal_x = Vec::new();
    let mut failed_nominal_y = Vec::new();

    for pad in measurements.records() {
        if is_failed(&pad, marker) {
            failed_nominal_x.push(pad.nom_x);
            failed_nominal_y.push(pad.nom_y);
        } else {
            valid.push(pad);
        }
    }

    info!("{} failed measurements removed", failed_nominal_x.len());

    FailedReadScreen {
        valid,
        failed_nominal_x,
        failed_nominal_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FAILED_READ_MARKER;

    fn pad(dim_x: f64, pos_y: f64, nom: f64) -> PadRecord {
        PadRecord {
            dim_x,
            dim_y: 80.0,
            pos_x: nom + 0.1,
            pos_y,
            nom_x: nom,
            nom_y: -nom,
        }
    }

    #[test]
    fn test_marker_and_nan_rows_are_dropped() {
        let input: PadMeasurements = vec![
            pad(80.0, 1.0, 10.0),
            pad(FAILED_READ_MARKER, 1.0, 20.0),
            pad(80.0, f64::NAN, 30.0),
            pad(81.0, 2.0, 40.0),
        ]
        .into_iter()
        .collect();

        let screen = screen_failed_reads(&input, FAILED_READ_MARKER);
        assert_eq!(screen.failed_count(), 2);
        assert_eq!(screen.failed_nominal_x, vec![20.0, 30.0]);
        assert_eq!(screen.failed_nominal_y, vec![-20.0, -30.0]);
        assert_eq!(screen.valid.nom_x(), &[10.0, 40.0]);
    }

    #[test]
    fn test_nominal_equal_to_marker_is_kept() {
        let input: PadMeasurements = vec![pad(80.0, 1.0, FAILED_READ_MARKER)]
            .into_iter()
            .collect();
        let screen = screen_failed_reads(&input, FAILED_READ_MARKER);
        assert_eq!(screen.valid.len(), 1);
        assert_eq!(screen.failed_count(), 0);
    }

    #[test]
    fn test_custom_marker() {
        let input: PadMeasurements = vec![pad(-1.0, 1.0, 10.0), pad(80.0, 1.0, 20.0)]
            .into_iter()
            .collect();
        assert_eq!(screen_failed_reads(&input, -1.0).valid.len(), 1);
        assert_eq!(screen_failed_reads(&input, FAILED_READ_MARKER).valid.len(), 2);
    }
}
