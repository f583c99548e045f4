//! Chi-squared coadd accumulation
//!
//! Builds the statistic the plotting tool diagnoses: for each exposure,
//! every good pixel contributes `image^2 / variance` (its squared
//! signal-to-noise) to the coadd, and the exposure's weight to the weight
//! map. Pixels flagged by the bad-pixel mask, or with a non-positive or
//! non-finite variance, contribute nothing to either plane.

use ndarray::{Array2, ArrayView2, Zip};
use thiserror::Error;

/// Bit-plane mask pixel, matching the mask plane of a calibrated exposure.
pub type MaskPixel = u32;

/// Errors from coadd accumulation
#[derive(Error, Debug)]
pub enum CoaddError {
    #[error("exposure shape {exposure:?} does not match coadd shape {coadd:?}")]
    ShapeMismatch {
        coadd: (usize, usize),
        exposure: (usize, usize),
    },
}

/// Accumulate one exposure into a chi-squared coadd.
///
/// # Arguments
/// * `coadd` - Running sum of `image^2 / variance`, updated in place
/// * `weight_map` - Running sum of per-exposure weights, updated in place
/// * `image` - Exposure pixel values (counts)
/// * `variance` - Per-pixel noise variance of the exposure
/// * `mask` - Exposure bit-plane mask
/// * `bad_pixel_mask` - Mask bits that disqualify a pixel
/// * `weight` - Weight credited to the weight map for each good pixel
///
/// # Errors
/// * `CoaddError::ShapeMismatch` if any plane's shape differs from the coadd's
pub fn add_to_coadd(
    coadd: &mut Array2<f64>,
    weight_map: &mut Array2<f64>,
    image: ArrayView2<f64>,
    variance: ArrayView2<f64>,
    mask: ArrayView2<MaskPixel>,
    bad_pixel_mask: MaskPixel,
    weight: f64,
) -> Result<(), CoaddError> {
    let shape = coadd.dim();
    for other in [weight_map.dim(), image.dim(), variance.dim(), mask.dim()] {
        if other != shape {
            return Err(CoaddError::ShapeMismatch {
                coadd: shape,
                exposure: other,
            });
        }
    }

    Zip::from(coadd)
        .and(weight_map)
        .and(&image)
        .and(&variance)
        .and(&mask)
        .for_each(|sum, wt, &img, &var, &msk| {
            if msk & bad_pixel_mask == 0 && var.is_finite() && var > 0.0 && img.is_finite() {
                *sum += img * img / var;
                *wt += weight;
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    #[test]
    fn test_good_pixels_accumulate_squared_snr() {
        let mut coadd = Array2::<f64>::zeros((2, 2));
        let mut weight_map = Array2::<f64>::zeros((2, 2));
        let image = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let variance = Array2::from_elem((2, 2), 4.0);
        let mask = Array2::<MaskPixel>::zeros((2, 2));

        add_to_coadd(
            &mut coadd,
            &mut weight_map,
            image.view(),
            variance.view(),
            mask.view(),
            0x1,
            0.5,
        )
        .unwrap();

        assert_relative_eq!(coadd[[0, 0]], 0.25, epsilon = 1e-12);
        assert_relative_eq!(coadd[[0, 1]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(coadd[[1, 1]], 4.0, epsilon = 1e-12);
        for wt in weight_map.iter() {
            assert_relative_eq!(wt, &0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_bad_mask_bits_skip_both_planes() {
        let mut coadd = Array2::<f64>::zeros((1, 3));
        let mut weight_map = Array2::<f64>::zeros((1, 3));
        let image = Array2::from_elem((1, 3), 2.0);
        let variance = Array2::from_elem((1, 3), 1.0);
        let mask = Array2::from_shape_vec((1, 3), vec![0x0, 0x2, 0x4]).unwrap();

        // Bad-pixel mask flags bit 0x2; bit 0x4 is benign.
        add_to_coadd(
            &mut coadd,
            &mut weight_map,
            image.view(),
            variance.view(),
            mask.view(),
            0x2,
            1.0,
        )
        .unwrap();

        assert_relative_eq!(coadd[[0, 0]], 4.0, epsilon = 1e-12);
        assert_relative_eq!(coadd[[0, 1]], 0.0, epsilon = 1e-12);
        assert_relative_eq!(coadd[[0, 2]], 4.0, epsilon = 1e-12);
        assert_relative_eq!(weight_map[[0, 1]], 0.0, epsilon = 1e-12);
        assert_relative_eq!(weight_map[[0, 2]], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nonpositive_variance_pixels_are_skipped() {
        let mut coadd = Array2::<f64>::zeros((1, 3));
        let mut weight_map = Array2::<f64>::zeros((1, 3));
        let image = Array2::from_elem((1, 3), 1.0);
        let variance = Array2::from_shape_vec((1, 3), vec![0.0, -1.0, f64::NAN]).unwrap();
        let mask = Array2::<MaskPixel>::zeros((1, 3));

        add_to_coadd(
            &mut coadd,
            &mut weight_map,
            image.view(),
            variance.view(),
            mask.view(),
            0x1,
            1.0,
        )
        .unwrap();

        assert!(coadd.iter().all(|&v| v == 0.0));
        assert!(weight_map.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let mut coadd = Array2::<f64>::zeros((2, 2));
        let mut weight_map = Array2::<f64>::zeros((2, 2));
        let image = Array2::<f64>::zeros((2, 3));
        let variance = Array2::<f64>::zeros((2, 3));
        let mask = Array2::<MaskPixel>::zeros((2, 3));

        let err = add_to_coadd(
            &mut coadd,
            &mut weight_map,
            image.view(),
            variance.view(),
            mask.view(),
            0x1,
            1.0,
        )
        .unwrap_err();
        assert!(matches!(err, CoaddError::ShapeMismatch { .. }));
    }
}
