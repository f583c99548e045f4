//! Plot a histogram for a chi-squared coadd and overlay the theoretical
//! chi-squared distribution.
//!
//! Reads the coadd's primary data plane, undoes the order normalization
//! applied when the coadd was written, cleans the samples, and renders the
//! empirical frequency histogram against the chi-squared density of the
//! given order. A coadd of pure-noise images should track the curve.
//!
//! Usage:
//! ```
//! cargo run --release --bin plot_chisq_histogram -- coadd.fits 10
//! cargo run --release --bin plot_chisq_histogram -- coadd.fits 10 --sqrt-x --output check.png
//! ```

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use coadd_chisq::{
    load_primary_image, reference_curve, reject_invalid, undo_normalization, Histogram,
    PlotConfig, DEFAULT_N_BINS,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plot_chisq_histogram")]
#[command(about = "Plot a chi-squared coadd pixel histogram against the theoretical distribution")]
#[command(version)]
struct Args {
    /// Path of the chi-squared coadd FITS file
    coadd: PathBuf,

    /// Chi-squared order (degrees of freedom); typically the number of
    /// coadded images
    chi_sq_order: f64,

    /// Number of histogram bins
    #[arg(long, default_value_t = DEFAULT_N_BINS)]
    bins: usize,

    /// Plot frequencies on a linear axis instead of log10
    #[arg(long)]
    linear_y: bool,

    /// Plot the square root of the pixel values on the x axis
    #[arg(long)]
    sqrt_x: bool,

    /// Output file for the plot
    #[arg(long, default_value = "chisq_histogram.png")]
    output: String,
}

/// Outcome of argument parsing: either arguments to run with, or help text
/// to print before exiting cleanly.
enum ParsedArgs {
    Run(Box<Args>),
    Usage(String),
}

/// Parse the command line, mapping a wrong argument count (or an explicit
/// help request) to the usage text rather than a parse failure. Missing or
/// surplus positional arguments print usage and exit with status 0; a
/// malformed value for a recognized argument is still a hard error.
fn parse_args<I, T>(itr: I) -> ParsedArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Args::try_parse_from(itr) {
        Ok(args) => ParsedArgs::Run(Box::new(args)),
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::MissingRequiredArgument
                    | ErrorKind::UnknownArgument
                    | ErrorKind::TooManyValues
            ) =>
        {
            ParsedArgs::Usage(Args::command().render_help().to_string())
        }
        Err(err) => err.exit(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args(std::env::args_os()) {
        ParsedArgs::Run(args) => args,
        ParsedArgs::Usage(help) => {
            print!("{help}");
            return Ok(());
        }
    };

    if !(args.chi_sq_order > 0.0) {
        anyhow::bail!(
            "chi-squared order must be positive, got {}",
            args.chi_sq_order
        );
    }

    let image = load_primary_image(&args.coadd)
        .with_context(|| format!("reading coadd '{}'", args.coadd.display()))?;
    let mut samples: Vec<f64> = image.iter().copied().collect();
    let total = samples.len();

    undo_normalization(&mut samples, args.chi_sq_order);
    let samples = reject_invalid(&samples);
    println!(
        "Loaded {} pixels, kept {} after discarding non-finite and out-of-range values",
        total,
        samples.len()
    );

    let hist = Histogram::from_samples(&samples, args.bins)
        .context("histogramming the cleaned coadd samples")?;
    let curve = reference_curve(&hist.bin_edges, args.chi_sq_order);

    let config = PlotConfig {
        log_y: !args.linear_y,
        sqrt_x: args.sqrt_x,
        n_bins: args.bins,
        output: args.output,
        ..Default::default()
    };
    coadd_chisq::render_comparison_plot(&hist, &curve, args.chi_sq_order, &config)
        .context("rendering the comparison plot")?;
    println!("Plot saved to: {}", config.output);

    Ok(())
}
