//! Module-level Python functions

use ndarray::Array2;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::path::PathBuf;

use super::errors::convert_error;
use super::metadata::{PyAbnormalityRecord, PyScanMetadata};
use crate::types::{ScanInstitution, ScannerType};

/// Parse an ICS header file
///
/// Args:
///     path: Path to the .ics file (str or pathlib.Path)
///
/// Returns:
///     ScanMetadata: Parsed header
///
/// Raises:
///     MetadataError: If filename or DIGITIZER rows are missing
///     CalibrationError: If the scanner letter and digitizer are unknown
#[pyfunction]
#[pyo3(name = "read_ics", signature = (path))]
pub fn py_read_ics(path: PathBuf) -> PyResult<PyScanMetadata> {
    crate::extraction::read_ics(&path)
        .map(Into::into)
        .map_err(convert_error)
}

/// List the abnormalities of an overlay file
///
/// Malformed overlays yield an empty list.
#[pyfunction]
#[pyo3(name = "read_overlay", signature = (path))]
pub fn py_read_overlay(path: PathBuf) -> PyResult<Vec<PyAbnormalityRecord>> {
    crate::extraction::read_overlay(&path)
        .map(|records| records.into_iter().map(Into::into).collect())
        .map_err(convert_error)
}

/// Map gray levels (list of rows) to clamped optical density
///
/// Raises:
///     ValueError: If rows are ragged or a name is unknown
///     CalibrationError: If the scanner has no calibration formula
///     MetadataError: If a gray level has no density (NaN, or below -1 for DBA)
///
/// Example:
///     >>> from _ddsm import od_correct
///     >>> od_correct([[0, 1000, 4095]], "MGH", "HOWTEK")
///     [[3.0, 2.84332, 0.05]]
#[pyfunction]
#[pyo3(name = "od_correct", signature = (image, scan_institution, scanner_type))]
pub fn py_od_correct(
    image: Vec<Vec<f64>>,
    scan_institution: &str,
    scanner_type: &str,
) -> PyResult<Vec<Vec<f64>>> {
    let institution: ScanInstitution = scan_institution.parse().map_err(PyValueError::new_err)?;
    let scanner: ScannerType = scanner_type.parse().map_err(PyValueError::new_err)?;

    let height = image.len();
    let width = image.first().map_or(0, Vec::len);
    if image.iter().any(|row| row.len() != width) {
        return Err(PyValueError::new_err("image rows must have equal length"));
    }
    let gray = Array2::from_shape_vec((height, width), image.into_iter().flatten().collect())
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let od = crate::pixels::od_correct(&gray, institution, scanner).map_err(convert_error)?;
    Ok(od.outer_iter().map(|row| row.to_vec()).collect())
}

/// Swap the two bytes of a 16-bit sample
#[pyfunction]
#[pyo3(name = "reverse_bytes", signature = (value))]
pub fn py_reverse_bytes(value: u16) -> u16 {
    crate::pixels::reverse_bytes(value)
}
