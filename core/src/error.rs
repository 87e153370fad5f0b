use std::path::PathBuf;
use thiserror::Error;

/// Result type for DDSM case processing
pub type Result<T> = std::result::Result<T, DdsmError>;

/// Error types for DDSM case processing
///
/// Every variant is terminal for the case being processed; nothing is retried.
#[derive(Error, Debug)]
pub enum DdsmError {
    /// Decoder standard output did not contain a `C: N: W: H:` status line
    #[error("Malformed decoder output: {0}")]
    MalformedDecoderOutput(String),

    /// Decoder reported a channel count other than 1
    #[error("Unsupported channel count: {0} (only single-channel images are supported)")]
    UnsupportedChannelCount(u32),

    /// Raw sample file holds fewer samples than declared
    #[error("Short read from {}: expected {expected} samples, found {actual}", path.display())]
    ShortRead {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    /// Neither decoder nor ICS dimensions account for the sample count
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// `(letter, scanner type)` pair outside the fixed scanner table
    #[error("Unknown scanner combination: ({letter}, {scanner_type})")]
    UnknownScannerCombination { letter: char, scanner_type: String },

    /// Required ICS row (or view) not present
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// No calibration formula for the `(institution, scanner type)` pair
    #[error("Unknown calibration for ({institution}, {scanner_type})")]
    UnknownCalibration {
        institution: String,
        scanner_type: String,
    },

    /// Field present but not a usable value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// External decoder could not be run or exited with failure
    #[error("Decoder failed: {0}")]
    DecoderFailed(String),

    /// Path does not follow DDSM case naming
    #[error("Invalid case path: {0}")]
    InvalidPath(String),

    /// Image encoding/decoding error
    #[error("Image error: {0}")]
    ImageError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<image::ImageError> for DdsmError {
    fn from(e: image::ImageError) -> Self {
        DdsmError::ImageError(format!("{}", e))
    }
}

impl From<ndarray::ShapeError> for DdsmError {
    fn from(e: ndarray::ShapeError) -> Self {
        DdsmError::DimensionMismatch(format!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DdsmError::UnknownScannerCombination {
            letter: 'B',
            scanner_type: "HOWTEK".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown scanner combination: (B, HOWTEK)");

        let err = DdsmError::ShortRead {
            path: PathBuf::from("case.1"),
            expected: 12,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "Short read from case.1: expected 12 samples, found 4"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DdsmError = io.into();
        assert!(matches!(err, DdsmError::IoError(_)));
    }
}
