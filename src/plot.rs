//! Rendering of the histogram / reference-curve comparison
//!
//! Applies the display transforms (optional log10 frequency axis, optional
//! square-root value axis), derives axis bounds from the transformed
//! histogram, and draws both series on shared axes with plotters. The
//! histogram is drawn as a step series over its bin edges, the reference
//! curve as a smooth line.

use plotters::prelude::*;
use thiserror::Error;

use crate::algo::histogram::{Histogram, DEFAULT_N_BINS};

/// Plot configuration.
///
/// The defaults reproduce the reference behavior: 500 bins, log10
/// frequencies on a linear value axis.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Plot log10 of the frequencies instead of the frequencies themselves.
    pub log_y: bool,
    /// Plot the square root of the bin values on the x axis.
    pub sqrt_x: bool,
    /// Number of histogram bins.
    pub n_bins: usize,
    /// Output file for the rendered plot.
    pub output: String,
    /// Plot width in pixels.
    pub width: u32,
    /// Plot height in pixels.
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            log_y: true,
            sqrt_x: false,
            n_bins: DEFAULT_N_BINS,
            output: "chisq_histogram.png".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

/// Errors from plot rendering
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("no finite histogram values to derive plot bounds from")]
    NoFiniteValues,
    #[error("failed to render plot: {0}")]
    Backend(String),
}

/// Axis bounds derived from the transformed histogram series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    /// Upper x bound; the lower bound is always 0.
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Both series after the display transforms, sharing one set of x
/// coordinates.
#[derive(Debug, Clone)]
pub struct TransformedSeries {
    pub xs: Vec<f64>,
    pub hist_y: Vec<f64>,
    pub curve_y: Vec<f64>,
}

/// Apply the configured display transforms to the histogram and the
/// reference curve.
///
/// With `log_y` set, zero-frequency bins transform to negative infinity;
/// such points are excluded from bounds computation and skipped when
/// drawing, but kept in the returned series.
pub fn transform_series(hist: &Histogram, curve: &[f64], config: &PlotConfig) -> TransformedSeries {
    let map_x = |x: f64| if config.sqrt_x { x.sqrt() } else { x };
    let map_y = |y: f64| if config.log_y { y.log10() } else { y };

    TransformedSeries {
        xs: hist.bin_edges.iter().map(|&x| map_x(x)).collect(),
        hist_y: hist.frequencies.iter().map(|&y| map_y(y)).collect(),
        curve_y: curve.iter().map(|&y| map_y(y)).collect(),
    }
}

/// Derive axis bounds from the finite points of the transformed histogram.
///
/// The x axis runs from 0 to the first point after the histogram's peak
/// whose value decays below 1% of the y range above the minimum. This
/// assumes a unimodal series that decays after its peak; if no such point
/// exists the bound falls back to the last finite x (the full range). The
/// y axis runs from the minimum to the maximum plus a 5% margin.
pub fn compute_bounds(xs: &[f64], hist_y: &[f64]) -> Result<PlotBounds, PlotError> {
    let finite: Vec<(f64, f64)> = xs
        .iter()
        .zip(hist_y.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();
    if finite.is_empty() {
        return Err(PlotError::NoFiniteValues);
    }

    let mut peak = 0;
    for (i, &(_, y)) in finite.iter().enumerate() {
        if y > finite[peak].1 {
            peak = i;
        }
    }
    let max_y = finite[peak].1;
    let min_y = finite.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
    let y_range = max_y - min_y;

    let threshold = min_y + 0.01 * y_range;
    let last_x = finite[finite.len() - 1].0;
    let x_max = finite[peak..]
        .iter()
        .find(|&&(_, y)| y < threshold)
        .map(|&(x, _)| x)
        .unwrap_or(last_x);

    // A flat series gives a zero y range; pad it so the axes stay usable.
    let y_max = if y_range > 0.0 { max_y + 0.05 * y_range } else { max_y + 1.0 };

    Ok(PlotBounds {
        x_max,
        y_min: min_y,
        y_max,
    })
}

/// Expand an edge/value series into the corner points of a step plot,
/// skipping non-finite values.
fn step_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(xs.len() * 2);
    let mut prev_y: Option<f64> = None;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        if !x.is_finite() || !y.is_finite() {
            prev_y = None;
            continue;
        }
        if let Some(py) = prev_y {
            points.push((x, py));
        }
        points.push((x, y));
        prev_y = Some(y);
    }
    points
}

fn backend_err<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Backend(err.to_string())
}

/// Render the histogram and the reference curve on shared axes.
///
/// Writes a PNG to `config.output` and returns the axis bounds used.
pub fn render_comparison_plot(
    hist: &Histogram,
    curve: &[f64],
    order: f64,
    config: &PlotConfig,
) -> Result<PlotBounds, PlotError> {
    let series = transform_series(hist, curve, config);
    let bounds = compute_bounds(&series.xs, &series.hist_y)?;

    let root = BitMapBackend::new(&config.output, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(backend_err)?;

    let title = format!("Chi-squared coadd histogram (order {order})");
    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..bounds.x_max, bounds.y_min..bounds.y_max)
        .map_err(backend_err)?;

    let y_desc = if config.log_y {
        "log10 frequency"
    } else {
        "frequency"
    };
    let x_desc = if config.sqrt_x {
        "sqrt of sum of (counts/noise)^2"
    } else {
        "sum of (counts/noise)^2"
    };
    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(backend_err)?;

    chart
        .draw_series(LineSeries::new(
            step_points(&series.xs, &series.hist_y),
            BLUE.stroke_width(2),
        ))
        .map_err(backend_err)?
        .label("coadd histogram")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    let curve_points: Vec<(f64, f64)> = series
        .xs
        .iter()
        .zip(series.curve_y.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();
    chart
        .draw_series(LineSeries::new(curve_points, RED.stroke_width(2)))
        .map_err(backend_err)?
        .label(format!("chi-squared, order {order}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(backend_err)?;

    root.present().map_err(backend_err)?;
    Ok(bounds)
}
