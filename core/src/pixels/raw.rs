use crate::error::{DdsmError, Result};
use byteorder::{ByteOrder, NativeEndian};
use log::{debug, warn};
use ndarray::{Array2, ArrayView2};
use std::fmt;
use std::path::Path;

use super::byte_order::reverse_bytes_in_place;

/// Image dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of samples (width * height), `None` if it overflows `usize`
    pub fn sample_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Byte-order corrected 16-bit scan, `height` rows by `width` columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    samples: Array2<u16>,
}

impl RawImage {
    pub fn new(samples: Array2<u16>) -> Self {
        Self { samples }
    }

    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    pub fn height(&self) -> usize {
        self.samples.nrows()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    pub fn samples(&self) -> ArrayView2<'_, u16> {
        self.samples.view()
    }

    pub fn into_samples(self) -> Array2<u16> {
        self.samples
    }

    /// Gray levels as floating point, input for optical density correction
    pub fn to_gray_levels(&self) -> Array2<f64> {
        self.samples.mapv(f64::from)
    }
}

/// Reads a decoder sample file and rebuilds the image
///
/// `declared` are the decoder's dimensions, `authoritative` the ICS geometry
/// of the same view when known. The sample file is removed once read.
///
/// # Errors
///
/// - `ShortRead` if the file holds fewer than the declared sample count, or
///   ends in half a sample
/// - `DimensionMismatch` if no known shape accounts for every sample, or a
///   sample count overflows
pub fn reconstruct(
    path: &Path,
    declared: Dimensions,
    authoritative: Option<Dimensions>,
) -> Result<RawImage> {
    let samples = read_samples(path)?;
    let count = samples.len();

    let mut shape = decoded_shape(path, count, declared, authoritative)?;

    if let Some(ics) = authoritative {
        if ics.width != shape.width {
            warn!(
                "reshape: {} decoded as {} but ICS declares {}",
                path.display(),
                shape,
                ics
            );
            if ics.sample_count() != Some(count) {
                return Err(DdsmError::DimensionMismatch(format!(
                    "ICS dimensions {} do not match the {} samples of {}",
                    ics,
                    count,
                    path.display()
                )));
            }
            shape = ics;
        }
    }

    let mut samples = Array2::from_shape_vec((shape.height, shape.width), samples)?;
    reverse_bytes_in_place(&mut samples);
    Ok(RawImage::new(samples))
}

/// Picks the shape the flat samples are laid out in
fn decoded_shape(
    path: &Path,
    count: usize,
    declared: Dimensions,
    authoritative: Option<Dimensions>,
) -> Result<Dimensions> {
    let expected = declared.sample_count().ok_or_else(|| {
        DdsmError::DimensionMismatch(format!("decoder dimensions {} overflow", declared))
    })?;
    if count < expected {
        return Err(DdsmError::ShortRead {
            path: path.to_path_buf(),
            expected,
            actual: count,
        });
    }
    if count == expected {
        return Ok(declared);
    }
    match authoritative {
        Some(ics) if ics.sample_count() == Some(count) => {
            warn!(
                "{}: {} samples do not fit decoder dimensions {}, using ICS {}",
                path.display(),
                count,
                declared,
                ics
            );
            Ok(ics)
        }
        _ => Err(DdsmError::DimensionMismatch(format!(
            "{} holds {} samples, decoder declared {}{}",
            path.display(),
            count,
            declared,
            authoritative
                .map(|ics| format!(" and ICS declared {}", ics))
                .unwrap_or_default()
        ))),
    }
}

/// Reads all host-order 16-bit samples of a transient sample file, then removes it
///
/// A file ending in half a sample is truncated and fails with `ShortRead`.
fn read_samples(path: &Path) -> Result<Vec<u16>> {
    let bytes = std::fs::read(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    if let Err(e) = std::fs::remove_file(path) {
        warn!("Failed to remove sample file {}: {}", path.display(), e);
    }

    if bytes.len() % 2 != 0 {
        return Err(DdsmError::ShortRead {
            path: path.to_path_buf(),
            expected: bytes.len() / 2 + 1,
            actual: bytes.len() / 2,
        });
    }
    let mut samples = vec![0u16; bytes.len() / 2];
    NativeEndian::read_u16_into(&bytes, &mut samples);
    Ok(samples)
}
