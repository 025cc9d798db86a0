//! Statistical primitives shared by the analysis stages.
//!
//! This module provides:
//! - Sample moments (mean, population standard deviation, centring)
//! - Principal component analysis via SVD
//! - First-degree least-squares fits

mod least_squares;
mod moments;
mod pca;

pub use least_squares::{fit_line, LinearFit};
pub use moments::{centered, mean, mean_step, population_std};
pub use pca::{principal_components, PcaFit};
