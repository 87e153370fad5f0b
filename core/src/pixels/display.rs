//! Lossy 8-bit renderings for visual inspection
//!
//! Nothing here is used on the lossless path.

use ndarray::{Array2, ArrayBase, Data, Ix2};

use super::optical_density::{MAX_OPTICAL_DENSITY, MIN_OPTICAL_DENSITY};

/// Optical density range rendered onto 0..=255, inverted
///
/// `low` maps to white (255) and `high` to black (0), so denser film is darker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityWindow {
    pub low: f64,
    pub high: f64,
}

impl Default for DensityWindow {
    fn default() -> Self {
        Self {
            low: MIN_OPTICAL_DENSITY,
            high: MAX_OPTICAL_DENSITY,
        }
    }
}

impl DensityWindow {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Maps one density value, values outside the window saturate
    #[inline]
    pub fn eval(&self, od: f64) -> u8 {
        let t = ((od - self.low) / (self.high - self.low)).clamp(0.0, 1.0);
        (255.0 * (1.0 - t)) as u8
    }

    /// Maps a density matrix to display gray levels
    pub fn apply<S>(&self, od: &ArrayBase<S, Ix2>) -> Array2<u8>
    where
        S: Data<Elem = f64>,
    {
        od.mapv(|v| self.eval(v))
    }
}

/// Stretches values linearly so the minimum becomes 0 and the maximum 255
///
/// A constant image maps to all zeros.
pub fn normalize_min_max<S>(values: &ArrayBase<S, Ix2>) -> Array2<u8>
where
    S: Data<Elem = f64>,
{
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let range = max - min;
    if !(range.is_finite() && range > f64::EPSILON) {
        return Array2::zeros(values.raw_dim());
    }

    let scale = 255.0 / range;
    values.mapv(|v| ((v - min) * scale).round().clamp(0.0, 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_density_window_inverted() {
        let window = DensityWindow::default();
        let od = array![[0.05, 3.0, 1.525, 0.0, 4.0]];
        let display = window.apply(&od);
        assert_eq!(display, array![[255u8, 0, 127, 255, 0]]);
    }

    #[test]
    fn test_density_window_monotonic() {
        let window = DensityWindow::new(0.0, 4.0);
        let mut previous = u8::MAX;
        for i in 0..=40 {
            let value = window.eval(i as f64 * 0.1);
            assert!(value <= previous);
            previous = value;
        }
        assert_eq!(window.eval(0.0), 255);
        assert_eq!(window.eval(4.0), 0);
    }

    #[test]
    fn test_normalize_min_max() {
        let values = array![[100.0, 200.0], [300.0, 150.0]];
        let out = normalize_min_max(&values);
        assert_eq!(out, array![[0u8, 128], [255, 64]]);
    }

    #[test]
    fn test_normalize_constant_image() {
        let values = Array2::from_elem((3, 4), 42.0);
        assert_eq!(normalize_min_max(&values), Array2::<u8>::zeros((3, 4)));
    }
}
