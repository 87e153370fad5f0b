pub mod decoder_output;
pub mod ics;
pub mod overlay;
pub mod tokens;

pub use decoder_output::{parse_decoder_output, DecoderOutput};
pub use ics::{parse_ics, read_ics};
pub use overlay::{parse_overlay, read_overlay};
pub use tokens::TokenizedLines;
