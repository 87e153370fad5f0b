//! Python exception types for ddsm
//!
//! This module defines Python exception classes that map to Rust error types.

// Suppress warnings from PyO3's create_exception! macro about gil-refs feature
#![allow(unexpected_cfgs)]

use pyo3::{create_exception, exceptions::PyException, prelude::*};

use crate::error::DdsmError;

// Base exception
create_exception!(_ddsm, PyDdsmError, PyException, "Base exception for all ddsm errors");

// Specific exceptions
create_exception!(
    _ddsm,
    PyDecoderError,
    PyDdsmError,
    "External decoder failed or produced unusable output"
);

create_exception!(
    _ddsm,
    PyPixelDataError,
    PyDdsmError,
    "Sample file does not match the declared image dimensions"
);

create_exception!(
    _ddsm,
    PyMetadataError,
    PyDdsmError,
    "ICS header is missing or has invalid required fields"
);

create_exception!(
    _ddsm,
    PyCalibrationError,
    PyDdsmError,
    "Scanner identity has no known institution or calibration"
);

/// Convert Rust DdsmError to appropriate Python exception
pub fn convert_error(err: DdsmError) -> PyErr {
    let msg = err.to_string();
    match err {
        DdsmError::MalformedDecoderOutput(_)
        | DdsmError::UnsupportedChannelCount(_)
        | DdsmError::DecoderFailed(_) => PyDecoderError::new_err(msg),
        DdsmError::ShortRead { .. } | DdsmError::DimensionMismatch(_) => {
            PyPixelDataError::new_err(msg)
        }
        DdsmError::MissingRequiredField(_) | DdsmError::InvalidValue(_) => {
            PyMetadataError::new_err(msg)
        }
        DdsmError::UnknownScannerCombination { .. } | DdsmError::UnknownCalibration { .. } => {
            PyCalibrationError::new_err(msg)
        }
        DdsmError::IoError(e) => pyo3::exceptions::PyIOError::new_err(e.to_string()),
        DdsmError::InvalidPath(_) | DdsmError::ImageError(_) => PyDdsmError::new_err(msg),
    }
}
