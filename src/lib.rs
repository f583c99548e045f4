//! Diagnostics for chi-squared image coaddition
//!
//! A chi-squared coadd stores, per pixel, the sum of `(counts / noise)^2`
//! over the combined exposures. When the input images contain pure noise,
//! that statistic follows a chi-squared distribution whose order equals the
//! number of combined images. This crate provides the pieces needed to
//! verify that visually:
//!
//! - **coadd**: accumulate exposures into a chi-squared coadd and weight map
//! - **io**: read the primary data plane of a coadd FITS file
//! - **algo**: clean the pixel samples, histogram them, and evaluate the
//!   theoretical chi-squared density at the histogram bins
//! - **plot**: overlay the empirical histogram and the theoretical curve on
//!   shared axes and render the comparison

pub mod algo;
pub mod coadd;
pub mod io;
pub mod plot;

// Re-exports for easier access
pub use algo::chi_squared::{chi_squared_kernel, reference_curve};
pub use algo::histogram::{Histogram, HistogramError, DEFAULT_N_BINS};
pub use algo::stats::{clip_outliers, reject_invalid, undo_normalization, MAX_CHISQ_VALUE};
pub use coadd::{add_to_coadd, CoaddError};
pub use io::fits::{load_primary_image, FitsError};
pub use plot::{render_comparison_plot, PlotBounds, PlotConfig, PlotError};
