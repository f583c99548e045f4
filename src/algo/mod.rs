//! Numeric pipeline for the coadd histogram diagnostic
//!
//! - **stats**: sample cleaning and robust outlier clipping
//! - **histogram**: equal-width relative-frequency histogram
//! - **chi_squared**: theoretical chi-squared density at the histogram bins

pub mod chi_squared;
pub mod histogram;
pub mod stats;
