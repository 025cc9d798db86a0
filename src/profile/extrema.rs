//! Extreme heights and steepest slopes of a single profile.
//!
//! Scrub marks and probe damage show up as sharp dips and peaks on a pad
//! profile. This module reports the deepest minima and highest maxima, and
//! the steepest discrete slopes together with their *weight*: the length of
//! the same-signed slope run that contains them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;
use crate::statistics::mean_step;
use crate::types::{Profile, Sample};

use super::vector::{reconstruct, ReconstructedProfile};

/// Minima and maxima found by [`ExtremaAnalyzer::find_extrema`].
///
/// Entries are in candidate-slot order, not coordinate order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extrema {
    /// Coordinates of the retained minima.
    pub min_locations: Vec<f64>,
    /// Heights of the retained minima.
    pub min_values: Vec<f64>,
    /// Coordinates of the retained maxima.
    pub max_locations: Vec<f64>,
    /// Heights of the retained maxima.
    pub max_values: Vec<f64>,
}

/// Slopes found by [`ExtremaAnalyzer::find_slopes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slopes {
    /// Every discrete slope; entry `i` spans points `i` and `i + 1`.
    pub slopes: Vec<f64>,
    /// Coordinates of the most negative slopes.
    pub min_locations: Vec<f64>,
    /// The most negative slopes, steepest first.
    pub min_slopes: Vec<f64>,
    /// Run-length weight of each negative slope.
    pub min_weights: Vec<usize>,
    /// Coordinates of the most positive slopes.
    pub max_locations: Vec<f64>,
    /// The most positive slopes, steepest first.
    pub max_slopes: Vec<f64>,
    /// Run-length weight of each positive slope.
    pub max_weights: Vec<usize>,
}

/// Extremum and slope analysis over one reconstructed profile.
#[derive(Debug, Clone)]
pub struct ExtremaAnalyzer {
    profile: ReconstructedProfile,
}

impl ExtremaAnalyzer {
    /// Reconstruct the raw scan and prepare it for analysis.
    ///
    /// # Errors
    ///
    /// Fails if the scan cannot be reconstructed (length mismatch, malformed
    /// sample, or a gap that survives trimming); no partial analyzer is built.
    pub fn new(coordinates: &[f64], samples: &[Sample]) -> crate::Result<Self> {
        let profile = reconstruct(coordinates, samples)?;
        Ok(Self { profile })
    }

    /// Reconstruct a paired [`Profile`] and prepare it for analysis.
    pub fn from_profile(profile: &Profile) -> crate::Result<Self> {
        Self::new(profile.coordinates(), profile.samples())
    }

    /// Build from an already reconstructed profile.
    pub fn from_reconstructed(profile: ReconstructedProfile) -> Self {
        Self { profile }
    }

    /// The profile under analysis.
    pub fn profile(&self) -> &ReconstructedProfile {
        &self.profile
    }

    /// Find up to `n` local minima and `n` local maxima.
    ///
    /// Both candidate sets start with the first `n` points. A local minimum
    /// replaces the highest member of the min-set only if it is strictly
    /// lower; a local maximum replaces the lowest member of the max-set only
    /// if strictly higher. Ties never replace, and when several members share
    /// the worst value the first slot is replaced.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InsufficientSamples`] if `n` exceeds the profile length.
    pub fn find_extrema(&self, n: usize) -> crate::Result<Extrema> {
        let v = &self.profile.values;
        let x = &self.profile.coordinates;
        if n > v.len() {
            return Err(AnalysisError::InsufficientSamples {
                needed: n,
                available: v.len(),
            });
        }

        let mut min_values = v[..n].to_vec();
        let mut min_locations = x[..n].to_vec();
        let mut max_values = v[..n].to_vec();
        let mut max_locations = x[..n].to_vec();

        if n > 0 {
            for i in 0..v.len() {
                if is_local_minimum(v, i) {
                    let (slot, worst) = first_extreme(&min_values, |a, b| a > b);
                    if v[i] < worst {
                        min_values[slot] = v[i];
                        min_locations[slot] = x[i];
                    }
                } else if is_local_maximum(v, i) {
                    let (slot, worst) = first_extreme(&max_values, |a, b| a < b);
                    if v[i] > worst {
                        max_values[slot] = v[i];
                        max_locations[slot] = x[i];
                    }
                }
            }
        }

        for (loc, val) in min_locations.iter().zip(&min_values) {
            debug!("min of {} at {}", val, loc);
        }
        for (loc, val) in max_locations.iter().zip(&max_values) {
            debug!("max of {} at {}", val, loc);
        }

        Ok(Extrema {
            min_locations,
            min_values,
            max_locations,
            max_values,
        })
    }

    /// Find the `n` most negative and `n` most positive discrete slopes.
    ///
    /// Every slope is divided by the mean coordinate step, which assumes
    /// near-uniform sampling. Equal slopes are ranked by ascending index.
    /// If fewer than `n` slopes exist, all of them are returned.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InsufficientSamples`] for fewer than two points.
    /// - [`AnalysisError::DegenerateInput`] if the mean step is zero.
    pub fn find_slopes(&self, n: usize) -> crate::Result<Slopes> {
        let v = &self.profile.values;
        let x = &self.profile.coordinates;
        let step = mean_step(x).ok_or(AnalysisError::InsufficientSamples {
            needed: 2,
            available: v.len(),
        })?;
        if step == 0.0 {
            return Err(AnalysisError::DegenerateInput("profile coordinates do not advance"));
        }

        let slopes: Vec<f64> = v.windows(2).map(|w| (w[1] - w[0]) / step).collect();

        let mut ranked: Vec<(f64, usize)> = slopes.iter().copied().zip(0..).collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        let steepest_down: Vec<(f64, usize)> = ranked.iter().copied().take(n).collect();

        ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        let steepest_up: Vec<(f64, usize)> = ranked.iter().copied().take(n).collect();

        let (min_locations, min_slopes, min_weights) = self.describe(&slopes, &steepest_down);
        let (max_locations, max_slopes, max_weights) = self.describe(&slopes, &steepest_up);

        for ((loc, s), w) in min_locations.iter().zip(&min_slopes).zip(&min_weights) {
            debug!("min slope of {} at {} with weight {}", s, loc, w);
        }
        for ((loc, s), w) in max_locations.iter().zip(&max_slopes).zip(&max_weights) {
            debug!("max slope of {} at {} with weight {}", s, loc, w);
        }

        Ok(Slopes {
            slopes,
            min_locations,
            min_slopes,
            min_weights,
            max_locations,
            max_slopes,
            max_weights,
        })
    }

    fn describe(&self, slopes: &[f64], picks: &[(f64, usize)]) -> (Vec<f64>, Vec<f64>, Vec<usize>) {
        let locations = picks.iter().map(|&(_, i)| self.profile.coordinates[i]).collect();
        let values = picks.iter().map(|&(s, _)| s).collect();
        let weights = picks
            .iter()
            .map(|&(_, i)| slope_weight(slopes, i).unwrap_or(0))
            .collect();
        (locations, values, weights)
    }
}

/// Length of the same-signed run of slopes containing `index`.
///
/// Walks forward from `index` (inclusive) and backward from `index - 1`
/// while the sign holds. A positive slope counts positive neighbours; any
/// other slope counts negative ones, so a zero slope weighs only the
/// negative run immediately before it.
///
/// Returns `None` if `index` is outside `slopes`.
pub fn slope_weight(slopes: &[f64], index: usize) -> Option<usize> {
    let pivot = *slopes.get(index)?;
    let same_sign: fn(f64) -> bool = if pivot > 0.0 {
        |s| s > 0.0
    } else {
        |s| s < 0.0
    };

    let forward = slopes[index..].iter().take_while(|&&s| same_sign(s)).count();
    let backward = slopes[..index]
        .iter()
        .rev()
        .take_while(|&&s| same_sign(s))
        .count();
    Some(forward + backward)
}

/// Strictly below every existing neighbour.
fn is_local_minimum(v: &[f64], i: usize) -> bool {
    let left = i.checked_sub(1).map(|j| v[j]);
    let right = v.get(i + 1).copied();
    if left.is_none() && right.is_none() {
        return false;
    }
    left.map_or(true, |l| l > v[i]) && right.map_or(true, |r| r > v[i])
}

/// Strictly above every existing neighbour.
fn is_local_maximum(v: &[f64], i: usize) -> bool {
    let left = i.checked_sub(1).map(|j| v[j]);
    let right = v.get(i + 1).copied();
    if left.is_none() && right.is_none() {
        return false;
    }
    left.map_or(true, |l| l < v[i]) && right.map_or(true, |r| r < v[i])
}

/// Slot and value of the first element that no later element beats under
/// `better`. `values` must be non-empty.
fn first_extreme(values: &[f64], better: impl Fn(f64, f64) -> bool) -> (usize, f64) {
    let mut slot = 0;
    for (i, &x) in values.iter().enumerate().skip(1) {
        if better(x, values[slot]) {
            slot = i;
        }
    }
    (slot, values[slot])
}
