//! Core data types: profile samples, profiles, and matrix aliases.

use std::fmt;
use std::str::FromStr;

use nalgebra::{SMatrix, SVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AnalysisError;

/// 2x2 matrix, used for the principal axes of an error field.
pub type Matrix2 = SMatrix<f64, 2, 2>;

/// 2-dimensional vector (an error vector or a principal axis).
pub type Vector2 = SVector<f64, 2>;

/// A single element of a raw profile.
///
/// Profilometers report unmeasured points explicitly; keeping them as a
/// separate variant means a gap can never be mistaken for a reading of zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sample {
    /// A measured height.
    Value(f64),
    /// No reading at this coordinate.
    Missing,
}

impl Sample {
    /// Convert an instrument reading, treating NaN as a gap.
    pub fn from_reading(x: f64) -> Self {
        if x.is_nan() {
            Sample::Missing
        } else {
            Sample::Value(x)
        }
    }

    /// Convert a slice of readings with [`Sample::from_reading`].
    pub fn from_readings(xs: &[f64]) -> Vec<Sample> {
        xs.iter().copied().map(Self::from_reading).collect()
    }

    /// True for the [`Sample::Missing`] variant.
    pub fn is_missing(&self) -> bool {
        matches!(self, Sample::Missing)
    }

    /// The measured value, if any.
    pub fn value(&self) -> Option<f64> {
        match *self {
            Sample::Value(x) => Some(x),
            Sample::Missing => None,
        }
    }
}

impl From<Option<f64>> for Sample {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Sample::Missing, Sample::Value)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sample::Value(x) => write!(f, "{}", x),
            Sample::Missing => f.write_str("---"),
        }
    }
}

/// Error returned when a cell is neither a number nor the gap marker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a profile sample: {0:?}")]
pub struct ParseSampleError(pub String);

impl FromStr for Sample {
    type Err = ParseSampleError;

    /// Parse a profilometer cell. `---` (with any surrounding whitespace)
    /// marks a gap.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cell = s.trim();
        if cell == "---" {
            return Ok(Sample::Missing);
        }
        cell.parse::<f64>()
            .ok()
            .filter(|x| !x.is_nan())
            .map(Sample::Value)
            .ok_or_else(|| ParseSampleError(s.to_string()))
    }
}

/// A raw scan: samples paired index-by-index with their coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    coordinates: Vec<f64>,
    samples: Vec<Sample>,
}

impl Profile {
    /// Pair coordinates with samples; both must have the same length.
    pub fn new(coordinates: Vec<f64>, samples: Vec<Sample>) -> crate::Result<Self> {
        AnalysisError::check_len("profile samples", coordinates.len(), samples.len())?;
        Ok(Self {
            coordinates,
            samples,
        })
    }

    /// Coordinates of the scan.
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Raw samples of the scan.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the scan has no points.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// One pad as read by the coordinate measuring machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PadRecord {
    /// Measured pad width along X.
    pub dim_x: f64,
    /// Measured pad width along Y.
    pub dim_y: f64,
    /// Measured pad centre, X.
    pub pos_x: f64,
    /// Measured pad centre, Y.
    pub pos_y: f64,
    /// Nominal pad centre, X.
    pub nom_x: f64,
    /// Nominal pad centre, Y.
    pub nom_y: f64,
}

/// Six index-aligned columns of pad readings.
///
/// Column `i` of every sequence belongs to the same pad; construction fails
/// if the columns differ in length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PadMeasurements {
    dims_x: Vec<f64>,
    dims_y: Vec<f64>,
    pos_x: Vec<f64>,
    pos_y: Vec<f64>,
    nom_x: Vec<f64>,
    nom_y: Vec<f64>,
}

impl PadMeasurements {
    /// Assemble the six columns, checking they share one length.
    pub fn new(
        dims_x: Vec<f64>,
        dims_y: Vec<f64>,
        pos_x: Vec<f64>,
        pos_y: Vec<f64>,
        nom_x: Vec<f64>,
        nom_y: Vec<f64>,
    ) -> crate::Result<Self> {
        let n = dims_x.len();
        AnalysisError::check_len("Y dimensions", n, dims_y.len())?;
        AnalysisError::check_len("measured X positions", n, pos_x.len())?;
        AnalysisError::check_len("measured Y positions", n, pos_y.len())?;
        AnalysisError::check_len("nominal X positions", n, nom_x.len())?;
        AnalysisError::check_len("nominal Y positions", n, nom_y.len())?;
        Ok(Self {
            dims_x,
            dims_y,
            pos_x,
            pos_y,
            nom_x,
            nom_y,
        })
    }

    /// Number of pads.
    pub fn len(&self) -> usize {
        self.dims_x.len()
    }

    /// True if there are no pads.
    pub fn is_empty(&self) -> bool {
        self.dims_x.is_empty()
    }

    /// Measured X widths.
    pub fn dims_x(&self) -> &[f64] {
        &self.dims_x
    }

    /// Measured Y widths.
    pub fn dims_y(&self) -> &[f64] {
        &self.dims_y
    }

    /// Measured X positions.
    pub fn pos_x(&self) -> &[f64] {
        &self.pos_x
    }

    /// Measured Y positions.
    pub fn pos_y(&self) -> &[f64] {
        &self.pos_y
    }

    /// Nominal X positions.
    pub fn nom_x(&self) -> &[f64] {
        &self.nom_x
    }

    /// Nominal Y positions.
    pub fn nom_y(&self) -> &[f64] {
        &self.nom_y
    }

    /// The pad at `index`, if any.
    pub fn record(&self, index: usize) -> Option<PadRecord> {
        (index < self.len()).then(|| PadRecord {
            dim_x: self.dims_x[index],
            dim_y: self.dims_y[index],
            pos_x: self.pos_x[index],
            pos_y: self.pos_y[index],
            nom_x: self.nom_x[index],
            nom_y: self.nom_y[index],
        })
    }

    /// Iterate over pads in order.
    pub fn records(&self) -> impl Iterator<Item = PadRecord> + '_ {
        (0..self.len()).filter_map(move |i| self.record(i))
    }

    /// Append one pad to every column.
    pub fn push(&mut self, record: PadRecord) {
        self.dims_x.push(record.dim_x);
        self.dims_y.push(record.dim_y);
        self.pos_x.push(record.pos_x);
        self.pos_y.push(record.pos_y);
        self.nom_x.push(record.nom_x);
        self.nom_y.push(record.nom_y);
    }
}

impl FromIterator<PadRecord> for PadMeasurements {
    fn from_iter<I: IntoIterator<Item = PadRecord>>(iter: I) -> Self {
        let mut out = Self::default();
        for record in iter {
            out.push(record);
        }
        out
    }
}
