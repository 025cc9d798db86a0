//! Main `WaferAnalyzer` entry point and builder.

use tracing::info;

use crate::config::Config;
use crate::dimensions::{dimensional_errors, DimensionSummary};
use crate::positional::{axis_regressions, error_vectors, principal_components};
use crate::profile::{ExtremaAnalyzer, ProfileSet};
use crate::result::{ProfileReport, ProfileSetReport, WaferReport};
use crate::screening::{reject, screen_failed_reads};
use crate::types::{PadMeasurements, Sample};

/// Main entry point for pad metrology analysis.
///
/// Use the builder pattern to configure the screening thresholds, then run
/// one of the analyses.
///
/// # Example
///
/// ```ignore
/// use pad_metrology::{PadMeasurements, WaferAnalyzer};
///
/// let pads = PadMeasurements::new(dims_x, dims_y, pos_x, pos_y, nom_x, nom_y)?;
/// let report = WaferAnalyzer::new()
///     .outlier_sigma(4.0)
///     .analyze(80.0, 80.0, &pads)?;
/// println!("{:.3} ppm", report.positional.x_vs_x.slope_ppm());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaferAnalyzer {
    config: Config,
}

impl Default for WaferAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl WaferAnalyzer {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create with a tighter 3σ outlier window.
    ///
    /// Suited to small wafers or coupons where a few hundred pads make a 4σ
    /// excursion unreachable.
    pub fn strict() -> Self {
        Self {
            config: Config {
                outlier_sigma: 3.0,
                ..Config::default()
            },
        }
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the outlier window half-width in standard deviations.
    pub fn outlier_sigma(mut self, sigma: f64) -> Self {
        self.config.outlier_sigma = sigma;
        self
    }

    /// Set the value the instrument writes for a failed read.
    pub fn failed_read_marker(mut self, marker: f64) -> Self {
        self.config.failed_read_marker = marker;
        self
    }

    /// Set the wafer diameter in microns.
    pub fn wafer_diameter(mut self, diameter: f64) -> Self {
        self.config.wafer_diameter = diameter;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze the pads of one wafer.
    ///
    /// Pipeline:
    /// 1. Drop failed reads
    /// 2. Reject pads with outlying widths
    /// 3. Error field and its principal axes (raw and centred)
    /// 4. Centred positional error against nominal position
    /// 5. Width statistics and width error against nominal position
    ///
    /// `nominal_pad_x` and `nominal_pad_y` are the drawn pad widths.
    ///
    /// # Errors
    ///
    /// Any error of the stages above. Failed and rejected pads are reported,
    /// not raised. A field with no variation left after screening (including
    /// a perfectly uniform translation, whose centred field is all zero) is
    /// [`AnalysisError::DegenerateInput`](crate::AnalysisError::DegenerateInput).
    pub fn analyze(
        &self,
        nominal_pad_x: f64,
        nominal_pad_y: f64,
        measurements: &PadMeasurements,
    ) -> crate::Result<WaferReport> {
        let screen = screen_failed_reads(measurements, self.config.failed_read_marker);
        let partition = reject(&screen.valid, self.config.outlier_sigma)?;
        let pads = &partition.accepted;

        let field = error_vectors(pads.nom_x(), pads.nom_y(), pads.pos_x(), pads.pos_y())?;
        let axes = principal_components(&field.u, &field.v)?;
        let centered_axes = principal_components(&field.u_centered, &field.v_centered)?;
        let positional = axis_regressions(
            &field.u_centered,
            &field.v_centered,
            pads.nom_x(),
            pads.nom_y(),
        )?;

        let dimensions =
            DimensionSummary::compute(nominal_pad_x, nominal_pad_y, pads.dims_x(), pads.dims_y())?;
        let dimensional = axis_regressions(
            &dimensional_errors(nominal_pad_x, pads.dims_x()),
            &dimensional_errors(nominal_pad_y, pads.dims_y()),
            pads.nom_x(),
            pads.nom_y(),
        )?;

        info!(
            "wafer analyzed: {} pads, {} failed, {} rejected",
            pads.len(),
            screen.failed_count(),
            partition.rejected_count()
        );

        Ok(WaferReport {
            pad_count: pads.len(),
            failed_count: screen.failed_count(),
            rejected_count: partition.rejected_count(),
            failed_nominal_x: screen.failed_nominal_x,
            failed_nominal_y: screen.failed_nominal_y,
            acceptance: (partition.window_x, partition.window_y),
            rejected: partition.rejected,
            field,
            axes,
            centered_axes,
            positional,
            dimensions,
            dimensional,
            reference_span: self.config.reference_span(),
            config: self.config,
        })
    }

    /// Analyze a single scan: reconstruct it, then pick `n_extrema` minima
    /// and maxima and the `n_slopes` steepest slopes each way.
    ///
    /// # Errors
    ///
    /// Errors of [`ExtremaAnalyzer::new`], [`ExtremaAnalyzer::find_extrema`]
    /// and [`ExtremaAnalyzer::find_slopes`].
    pub fn analyze_profile(
        &self,
        coordinates: &[f64],
        samples: &[Sample],
        n_extrema: usize,
        n_slopes: usize,
    ) -> crate::Result<ProfileReport> {
        let analyzer = ExtremaAnalyzer::new(coordinates, samples)?;
        let extrema = analyzer.find_extrema(n_extrema)?;
        let slopes = analyzer.find_slopes(n_slopes)?;
        Ok(ProfileReport {
            profile: analyzer.profile().clone(),
            extrema,
            slopes,
        })
    }

    /// Analyze several scans over one coordinate axis.
    ///
    /// The scans are aligned to a common window and patched, then compared
    /// with their average. The dominant direction is computed only when
    /// `with_direction` is set.
    ///
    /// # Errors
    ///
    /// Errors of [`ProfileSet::new`] and its comparison methods.
    pub fn analyze_profile_set(
        &self,
        coordinates: &[f64],
        vectors: &[Vec<Sample>],
        with_direction: bool,
    ) -> crate::Result<ProfileSetReport> {
        let set = ProfileSet::new(coordinates, vectors)?;
        let average = set.average()?;
        let correlations = set.correlations()?;
        let direction = if with_direction {
            Some(set.dominant_direction()?)
        } else {
            None
        };
        info!(
            "profile set analyzed: {} scans over {} points",
            set.vectors().len(),
            set.coordinates().len()
        );
        Ok(ProfileSetReport {
            coordinates: set.coordinates().to_vec(),
            average,
            correlations,
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FAILED_READ_MARKER;
    use crate::types::PadRecord;

    fn wafer() -> PadMeasurements {
        let mut pads = PadMeasurements::default();
        for i in -5..=5 {
            for j in -5..=5 {
                let x = i as f64 * 10_000.0;
                let y = j as f64 * 10_000.0;
                let wobble = ((i * 7 + j * 3) % 5) as f64 * 0.1;
                pads.push(PadRecord {
                    dim_x: 80.0 + wobble,
                    dim_y: 60.0 - wobble,
                    pos_x: x + 0.5 + 2.0e-6 * x,
                    pos_y: y - 0.25 + 1.0e-6 * y,
                    nom_x: x,
                    nom_y: y,
                });
            }
        }
        pads
    }

    #[test]
    fn test_builder() {
        let a = WaferAnalyzer::new()
            .outlier_sigma(5.0)
            .failed_read_marker(-1.0)
            .wafer_diameter(200_000.0);
        assert_eq!(a.config().outlier_sigma, 5.0);
        assert_eq!(a.config().failed_read_marker, -1.0);
        assert_eq!(a.config().reference_span(), (-100_000.0, 100_000.0));
        assert_eq!(WaferAnalyzer::strict().config().outlier_sigma, 3.0);
        assert_eq!(WaferAnalyzer::default(), WaferAnalyzer::new());
    }

    #[test]
    fn test_analyze_clean_wafer() {
        let report = WaferAnalyzer::new().analyze(80.0, 60.0, &wafer()).unwrap();
        assert_eq!(report.pad_count, 121);
        assert_eq!(report.failed_count, 0);
        assert_eq!(report.rejected_count, 0);
        assert!((report.positional.x_vs_x.slope_ppm() - 2.0).abs() < 1e-6);
        assert!((report.positional.y_vs_y.slope_ppm() - 1.0).abs() < 1e-6);
        assert!(report.positional.x_vs_y.slope_ppm().abs() < 1e-6);
        let (du, dv) = report.field.mean_offset();
        assert!((du - 0.5).abs() < 1e-9);
        assert!((dv + 0.25).abs() < 1e-9);
        assert_eq!(report.yield_fraction(), 1.0);
    }

    #[test]
    fn test_analyze_drops_failed_reads() {
        let mut pads = wafer();
        pads.push(PadRecord {
            dim_x: FAILED_READ_MARKER,
            dim_y: 60.0,
            pos_x: FAILED_READ_MARKER,
            pos_y: FAILED_READ_MARKER,
            nom_x: 123.0,
            nom_y: 456.0,
        });
        let report = WaferAnalyzer::new().analyze(80.0, 60.0, &pads).unwrap();
        assert_eq!(report.failed_count, 1);
        assert_eq!(report.failed_nominal_x, vec![123.0]);
        assert_eq!(report.failed_nominal_y, vec![456.0]);
        assert_eq!(report.pad_count, 121);
    }

    #[test]
    fn test_analyze_rejects_infinite_position() {
        let mut records: Vec<PadRecord> = wafer().records().take(30).collect();
        records[3].pos_x = f64::INFINITY;
        let pads: PadMeasurements = records.into_iter().collect();
        assert_eq!(
            WaferAnalyzer::new().analyze(80.0, 60.0, &pads),
            Err(crate::AnalysisError::InvalidSample { index: 3 })
        );
    }

    #[test]
    fn test_analyze_profile() {
        let coords = [0.0, 1.0, 2.0, 3.0, 4.0];
        let samples = Sample::from_readings(&[5.0, 1.0, 9.0, 2.0, 8.0]);
        let report = WaferAnalyzer::new()
            .analyze_profile(&coords, &samples, 1, 1)
            .unwrap();
        assert_eq!(report.extrema.min_values, vec![1.0]);
        assert_eq!(report.extrema.min_locations, vec![1.0]);
        assert_eq!(report.extrema.max_values, vec![9.0]);
        assert_eq!(report.extrema.max_locations, vec![2.0]);
        assert_eq!(report.slopes.slopes.len(), 4);
    }

    #[test]
    fn test_analyze_profile_set() {
        let coords = [0.0, 1.0, 2.0, 3.0];
        let vectors = vec![
            Sample::from_readings(&[1.0, 2.0, 3.0, 4.0]),
            Sample::from_readings(&[f64::NAN, 2.0, 3.0, 4.0]),
        ];
        let report = WaferAnalyzer::new()
            .analyze_profile_set(&coords, &vectors, false)
            .unwrap();
        assert_eq!(report.coordinates, vec![1.0, 2.0, 3.0]);
        assert_eq!(report.average, vec![2.0, 3.0, 4.0]);
        assert!(report.direction.is_none());
        assert!(report.correlations.iter().all(|c| (c - 1.0).abs() < 1e-12));
    }
}
