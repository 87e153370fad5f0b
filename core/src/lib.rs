pub mod api;
pub mod cli;
pub mod decoder;
pub mod error;
pub mod extraction;
pub mod pixels;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use api::{convert_case, render, CaseFiles, ConversionReport, ConvertOptions, LjpegReader};
pub use cli::report::{AbnormalityReport, IcsReport};
pub use decoder::{Decoder, ExternalDecoder};
pub use error::{DdsmError, Result};
pub use extraction::{parse_decoder_output, parse_ics, parse_overlay, read_ics, read_overlay};
pub use pixels::{od_correct, reconstruct, reverse_bytes, Calibration, OutputImage, RawImage};
pub use types::*;
