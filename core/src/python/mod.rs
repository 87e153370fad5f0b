//! Python bindings for ddsm
//!
//! This module provides PyO3 bindings for reading DDSM ICS headers and
//! overlay files and calibrating gray levels from Python.

// Suppress false positive warnings from PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod errors;
mod functions;
mod metadata;

pub use errors::*;
pub use functions::*;
pub use metadata::*;

/// Python module definition
#[pymodule]
fn _ddsm(py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Register exception classes
    m.add("DdsmError", py.get_type_bound::<errors::PyDdsmError>())?;
    m.add("DecoderError", py.get_type_bound::<errors::PyDecoderError>())?;
    m.add(
        "PixelDataError",
        py.get_type_bound::<errors::PyPixelDataError>(),
    )?;
    m.add("MetadataError", py.get_type_bound::<errors::PyMetadataError>())?;
    m.add(
        "CalibrationError",
        py.get_type_bound::<errors::PyCalibrationError>(),
    )?;

    // Register data structure classes
    m.add_class::<PyViewInfo>()?;
    m.add_class::<PyScanMetadata>()?;
    m.add_class::<PyAbnormalityRecord>()?;

    // Register functions
    m.add_function(wrap_pyfunction!(py_read_ics, m)?)?;
    m.add_function(wrap_pyfunction!(py_read_overlay, m)?)?;
    m.add_function(wrap_pyfunction!(py_od_correct, m)?)?;
    m.add_function(wrap_pyfunction!(py_reverse_bytes, m)?)?;

    // Add version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
