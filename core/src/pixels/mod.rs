//! Pixel data reconstruction and calibration
//!
//! - [`raw`]: rebuilds the 16-bit scan from the decoder's sample file
//! - [`byte_order`]: per-sample byte swap
//! - [`optical_density`]: scanner calibration to optical density
//! - [`display`]: lossy 8-bit renderings
//! - [`writer`]: raster persistence and lossless verification

pub mod byte_order;
pub mod display;
pub mod optical_density;
pub mod raw;
pub mod writer;

pub use byte_order::{reverse_bytes, reverse_bytes_in_place};
pub use display::{normalize_min_max, DensityWindow};
pub use optical_density::{
    clamp_density, od_correct, Calibration, MAX_OPTICAL_DENSITY, MIN_OPTICAL_DENSITY,
};
pub use raw::{reconstruct, Dimensions, RawImage};
pub use writer::{verify_lossless, OutputImage};
