//! Sample cleaning for the coadd histogram
//!
//! The coadd is stored divided by its chi-squared order, so the samples are
//! first rescaled to undo that, then stripped of values that would poison
//! the histogram: NaN/Inf pixels (masked or empty regions) and implausibly
//! large values. A separate robust outlier clip based on the interquartile
//! range is available for callers that want a distribution-aware filter.

/// Upper sanity bound on per-pixel chi-squared values; anything at or above
/// this after normalization is treated as junk.
pub const MAX_CHISQ_VALUE: f64 = 50.0;

/// Ratio converting an interquartile range into an estimated standard
/// deviation for a normal distribution.
pub const IQR_TO_SIGMA: f64 = 0.741;

/// Half-width of the outlier clip band, in estimated standard deviations.
pub const CLIP_WIDTH_SIGMA: f64 = 4.0;

/// Multiply every sample by the chi-squared order in place, reversing the
/// normalization applied when the coadd was written.
pub fn undo_normalization(samples: &mut [f64], order: f64) {
    for value in samples.iter_mut() {
        *value *= order;
    }
}

/// Drop samples unsuitable for histogramming: non-finite values and values
/// at or above [`MAX_CHISQ_VALUE`].
pub fn reject_invalid(samples: &[f64]) -> Vec<f64> {
    samples
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v < MAX_CHISQ_VALUE)
        .collect()
}

/// Clip values more than four estimated standard deviations from the median,
/// where sigma is estimated as the interquartile range times 0.741.
///
/// Sorts the input destructively and indexes the quartiles with truncating
/// integer division, so for lengths not divisible by four the quartile
/// positions are off by up to one sample from an interpolated percentile.
/// That approximation is part of the contract; see DESIGN.md.
///
/// Returns the surviving values in ascending order. An empty input returns
/// an empty result.
pub fn clip_outliers(mut values: Vec<f64>) -> Vec<f64> {
    if values.is_empty() {
        return values;
    }
    values.sort_by(f64::total_cmp);

    let n = values.len();
    let iqr = values[n * 3 / 4] - values[n / 4];
    let band = CLIP_WIDTH_SIGMA * IQR_TO_SIGMA * iqr;
    let median = values[n / 2];
    let min_good = median - band;
    let max_good = median + band;

    values.retain(|&v| v >= min_good && v <= max_good);
    values
}
