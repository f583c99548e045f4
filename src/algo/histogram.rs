//! Equal-width relative-frequency histogram
//!
//! Bins a cleaned sample set into a fixed number of equal-width bins
//! spanning the sample range, then converts counts to relative frequencies
//! so the bins sum to one and can be compared directly against a normalized
//! reference curve.

use thiserror::Error;

/// Default number of histogram bins.
pub const DEFAULT_N_BINS: usize = 500;

/// Errors from histogram construction
#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("cannot build a histogram from an empty sample set")]
    EmptySamples,
    #[error("histogram bin count must be nonzero")]
    ZeroBins,
}

/// Relative-frequency histogram over equal-width bins.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Left edge of each bin, ascending.
    pub bin_edges: Vec<f64>,
    /// Relative frequency of each bin; sums to 1.
    pub frequencies: Vec<f64>,
}

impl Histogram {
    /// Bin `samples` into `n_bins` equal-width bins spanning their range.
    ///
    /// The maximum sample counts into the last bin. When every sample has
    /// the same value the span is degenerate; a unit bin width is used and
    /// all samples land in bin zero.
    pub fn from_samples(samples: &[f64], n_bins: usize) -> Result<Self, HistogramError> {
        if n_bins == 0 {
            return Err(HistogramError::ZeroBins);
        }
        if samples.is_empty() {
            return Err(HistogramError::EmptySamples);
        }

        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        let width = if span > 0.0 { span / n_bins as f64 } else { 1.0 };

        let mut counts = vec![0u64; n_bins];
        for &value in samples {
            let mut bin = ((value - min) / width) as usize;
            if bin >= n_bins {
                bin = n_bins - 1;
            }
            counts[bin] += 1;
        }

        let total = samples.len() as f64;
        let bin_edges = (0..n_bins).map(|i| min + i as f64 * width).collect();
        let frequencies = counts.iter().map(|&c| c as f64 / total).collect();

        Ok(Histogram {
            bin_edges,
            frequencies,
        })
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bin_edges.len()
    }

    /// True when the histogram has no bins (never produced by
    /// [`Histogram::from_samples`]).
    pub fn is_empty(&self) -> bool {
        self.bin_edges.is_empty()
    }
}
