//! Theoretical chi-squared density for the reference overlay
//!
//! Evaluates the unnormalized chi-squared density kernel at the histogram
//! bin edges and normalizes the result to sum to one, putting the curve on
//! the same scale as the relative-frequency histogram. This is a visual
//! reference, not a calibrated density: it samples the kernel at bin left
//! edges rather than integrating over bins.

/// Unnormalized chi-squared density kernel `x^(k/2 - 1) * exp(-x / 2)`.
///
/// The kernel's support is `x >= 0`; negative `x` evaluates to zero. At
/// `x = 0` the plain formula diverges when the order is below 2, so that
/// case is also defined as zero to keep the normalization finite.
pub fn chi_squared_kernel(x: f64, order: f64) -> f64 {
    let exponent = order / 2.0 - 1.0;
    if x < 0.0 || (x == 0.0 && exponent < 0.0) {
        return 0.0;
    }
    x.powf(exponent) * (-x / 2.0).exp()
}

/// Evaluate the chi-squared kernel of the given order at each x coordinate
/// and normalize the results to sum to one.
///
/// If the kernel is zero everywhere (every coordinate outside the support)
/// the zeros are returned unnormalized rather than dividing by zero.
pub fn reference_curve(xs: &[f64], order: f64) -> Vec<f64> {
    let mut curve: Vec<f64> = xs.iter().map(|&x| chi_squared_kernel(x, order)).collect();
    let total: f64 = curve.iter().sum();
    if total > 0.0 && total.is_finite() {
        for value in curve.iter_mut() {
            *value /= total;
        }
    }
    curve
}
