use crate::error::{DdsmError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageBuffer, Luma, Primitive};
use log::debug;
use ndarray::{Array2, ArrayView2};
use std::path::Path;

use super::raw::Dimensions;

/// Grayscale raster ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputImage {
    /// Byte-order corrected scan, written without remapping
    Gray16(Array2<u16>),
    /// Display rendering
    Gray8(Array2<u8>),
}

impl OutputImage {
    pub fn dimensions(&self) -> Dimensions {
        let (height, width) = match self {
            OutputImage::Gray16(a) => a.dim(),
            OutputImage::Gray8(a) => a.dim(),
        };
        Dimensions::new(width, height)
    }

    pub fn bit_depth(&self) -> u8 {
        match self {
            OutputImage::Gray16(_) => 16,
            OutputImage::Gray8(_) => 8,
        }
    }

    /// Pixel values as floating point
    pub fn to_values(&self) -> Array2<f64> {
        match self {
            OutputImage::Gray16(a) => a.mapv(f64::from),
            OutputImage::Gray8(a) => a.mapv(f64::from),
        }
    }

    /// Rescales both axes by `scale` with bilinear filtering
    ///
    /// New sizes are truncated, e.g. 3901 columns at 0.5 become 1950.
    pub fn resize(&self, scale: f64) -> Result<OutputImage> {
        let dims = self.dimensions();
        let width = (dims.width as f64 * scale) as u32;
        let height = (dims.height as f64 * scale) as u32;
        if !(scale.is_finite() && scale > 0.0) || width == 0 || height == 0 {
            return Err(DdsmError::InvalidValue(format!(
                "scale {} turns {} into an empty image",
                scale, dims
            )));
        }
        debug!("Resizing {} to {}x{}", dims, width, height);

        Ok(match self {
            OutputImage::Gray16(a) => OutputImage::Gray16(into_array(image::imageops::resize(
                &to_buffer(a)?,
                width,
                height,
                FilterType::Triangle,
            ))?),
            OutputImage::Gray8(a) => OutputImage::Gray8(into_array(image::imageops::resize(
                &to_buffer(a)?,
                width,
                height,
                FilterType::Triangle,
            ))?),
        })
    }

    /// Writes the image, format chosen from the file extension
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(
            "Writing {}-bit {} image to {}",
            self.bit_depth(),
            self.dimensions(),
            path.display()
        );
        self.to_dynamic()?.save(path)?;
        Ok(())
    }

    fn to_dynamic(&self) -> Result<DynamicImage> {
        Ok(match self {
            OutputImage::Gray16(a) => DynamicImage::ImageLuma16(to_buffer(a)?),
            OutputImage::Gray8(a) => DynamicImage::ImageLuma8(to_buffer(a)?),
        })
    }
}

fn to_buffer<T: Primitive + 'static>(a: &Array2<T>) -> Result<ImageBuffer<Luma<T>, Vec<T>>> {
    let (height, width) = a.dim();
    ImageBuffer::from_raw(width as u32, height as u32, a.iter().copied().collect()).ok_or_else(
        || DdsmError::ImageError(format!("cannot build {}x{} image buffer", width, height)),
    )
}

fn into_array<P>(buf: ImageBuffer<P, Vec<P::Subpixel>>) -> Result<Array2<P::Subpixel>>
where
    P: image::Pixel,
{
    let (width, height) = buf.dimensions();
    Ok(Array2::from_shape_vec(
        (height as usize, width as usize),
        buf.into_raw(),
    )?)
}

/// Re-reads a written file and checks it holds exactly `expected`
///
/// Returns `false` for any difference, including an 8-bit file.
pub fn verify_lossless(path: &Path, expected: ArrayView2<'_, u16>) -> Result<bool> {
    let image = image::open(path)?;
    let Some(buf) = image.as_luma16() else {
        debug!("{} is {:?}, not 16-bit grayscale", path.display(), image.color());
        return Ok(false);
    };

    let (width, height) = buf.dimensions();
    if (height as usize, width as usize) != expected.dim() {
        return Ok(false);
    }
    Ok(buf.as_raw().iter().eq(expected.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tempfile::TempDir;

    fn scan() -> Array2<u16> {
        array![[0u16, 1, 4095], [65535, 256, 12], [7, 8, 9], [1000, 2000, 3000]]
    }

    #[test]
    fn test_png_16bit_is_lossless() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.png");
        OutputImage::Gray16(scan()).save(&path).unwrap();
        assert!(verify_lossless(&path, scan().view()).unwrap());
    }

    #[test]
    fn test_tiff_16bit_is_lossless() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.tif");
        OutputImage::Gray16(scan()).save(&path).unwrap();
        assert!(verify_lossless(&path, scan().view()).unwrap());
    }

    #[test]
    fn test_verify_detects_difference() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.png");
        OutputImage::Gray16(scan()).save(&path).unwrap();

        let mut other = scan();
        other[[1, 1]] += 1;
        assert!(!verify_lossless(&path, other.view()).unwrap());
        assert!(!verify_lossless(&path, array![[0u16, 1, 4095]].view()).unwrap());
    }

    #[test]
    fn test_verify_rejects_8bit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("visual.png");
        OutputImage::Gray8(array![[0u8, 1], [2, 3]]).save(&path).unwrap();
        assert!(!verify_lossless(&path, array![[0u16, 1], [2, 3]].view()).unwrap());
    }

    #[test]
    fn test_resize() {
        let image = OutputImage::Gray8(Array2::from_elem((10, 20), 100u8));
        let resized = image.resize(0.5).unwrap();
        assert_eq!(resized.dimensions(), Dimensions::new(10, 5));
        assert_eq!(resized, OutputImage::Gray8(Array2::from_elem((5, 10), 100u8)));

        let resized = OutputImage::Gray16(scan()).resize(2.0).unwrap();
        assert_eq!(resized.dimensions(), Dimensions::new(6, 8));
        assert_eq!(resized.bit_depth(), 16);
    }

    #[test]
    fn test_resize_to_nothing() {
        let image = OutputImage::Gray8(Array2::from_elem((10, 20), 1u8));
        assert!(image.resize(0.01).is_err());
        assert!(image.resize(-1.0).is_err());
        assert!(image.resize(f64::NAN).is_err());
    }
}
