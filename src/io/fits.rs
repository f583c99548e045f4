//! FITS input for coadd diagnostics
//!
//! Reads the primary header-data-unit of a FITS (Flexible Image Transport
//! System) file into an ndarray array. Only the primary data plane is read;
//! extension HDUs are ignored.

use fitsio::hdu::HduInfo;
use fitsio::FitsFile;
use ndarray::ArrayD;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a coadd FITS file
#[derive(Error, Debug)]
pub enum FitsError {
    #[error("FITS I/O error: {0}")]
    FitsIo(#[from] fitsio::errors::Error),
    #[error("primary HDU of '{0}' has no image data plane")]
    NoDataPlane(String),
    #[error("primary HDU of '{0}' contains no data")]
    EmptyImage(String),
}

/// Read the primary data plane of a FITS file as `f64` samples.
///
/// The array keeps the on-disk dimensionality (typically 2-D for a coadd);
/// callers that only care about the value distribution can flatten it.
///
/// # Arguments
/// * `path` - Path of the FITS file
///
/// # Errors
/// * `FitsError::FitsIo` if the file is missing, unreadable, or corrupt
/// * `FitsError::NoDataPlane` if the primary HDU holds no image array
/// * `FitsError::EmptyImage` if the primary image has zero elements
pub fn load_primary_image<P: AsRef<Path>>(path: P) -> Result<ArrayD<f64>, FitsError> {
    let name = path.as_ref().display().to_string();
    let mut fptr = FitsFile::open(&path)?;
    let hdu = fptr.primary_hdu()?;

    match &hdu.info {
        HduInfo::ImageInfo { shape, .. } if !shape.is_empty() => {}
        _ => return Err(FitsError::NoDataPlane(name)),
    }

    let data: ArrayD<f64> = hdu.read_image(&mut fptr)?;
    if data.is_empty() {
        return Err(FitsError::EmptyImage(name));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fitsio::images::{ImageDescription, ImageType};
    use tempfile::tempdir;

    fn write_test_fits(path: &std::path::Path, dims: &[usize], data: &[f64]) {
        let description = ImageDescription {
            data_type: ImageType::Double,
            dimensions: dims,
        };
        let mut fptr = FitsFile::create(path)
            .with_custom_primary(&description)
            .open()
            .unwrap();
        let hdu = fptr.primary_hdu().unwrap();
        hdu.write_image(&mut fptr, data).unwrap();
    }

    #[test]
    fn test_load_primary_image_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coadd.fits");
        let data = vec![0.5, 1.5, 2.5, 3.5, 4.5, 5.5];
        write_test_fits(&path, &[2, 3], &data);

        let image = load_primary_image(&path).unwrap();
        assert_eq!(image.len(), 6);
        for (read, expected) in image.iter().zip(data.iter()) {
            assert_relative_eq!(read, expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does_not_exist.fits");
        let err = load_primary_image(&path).unwrap_err();
        assert!(matches!(err, FitsError::FitsIo(_)));
    }

    #[test]
    fn test_load_headerless_primary_is_no_data_plane() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.fits");
        // Default primary HDU has NAXIS = 0, so there is nothing to plot.
        FitsFile::create(&path).open().unwrap();

        let err = load_primary_image(&path).unwrap_err();
        assert!(matches!(err, FitsError::NoDataPlane(_)));
    }
}
