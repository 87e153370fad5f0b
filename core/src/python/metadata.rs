//! Python wrappers for ICS metadata and overlay records

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::types::{AbnormalityRecord, ScanMetadata, ViewInfo, ViewName};

/// Scan geometry of one acquired view
#[pyclass(name = "ViewInfo", module = "_ddsm", frozen)]
#[derive(Clone)]
pub struct PyViewInfo {
    pub(crate) inner: ViewInfo,
}

#[pymethods]
impl PyViewInfo {
    #[getter]
    fn height(&self) -> usize {
        self.inner.height
    }

    #[getter]
    fn width(&self) -> usize {
        self.inner.width
    }

    /// Bits per pixel of the original scan
    #[getter]
    fn bpp(&self) -> u32 {
        self.inner.bpp_original
    }

    /// Scan resolution in microns
    #[getter]
    fn resolution(&self) -> f64 {
        self.inner.resolution_microns
    }

    #[getter]
    fn has_overlay(&self) -> bool {
        self.inner.has_overlay
    }

    pub fn to_dict(&self, py: Python) -> PyResult<Py<PyDict>> {
        let dict = PyDict::new_bound(py);
        dict.set_item("height", self.inner.height)?;
        dict.set_item("width", self.inner.width)?;
        dict.set_item("bpp", self.inner.bpp_original)?;
        dict.set_item("resolution", self.inner.resolution_microns)?;
        Ok(dict.unbind())
    }

    fn __repr__(&self) -> String {
        format!(
            "ViewInfo(height={}, width={}, bpp={}, resolution={})",
            self.inner.height,
            self.inner.width,
            self.inner.bpp_original,
            self.inner.resolution_microns
        )
    }
}

/// Parsed ICS header of a case
#[pyclass(name = "ScanMetadata", module = "_ddsm", frozen)]
#[derive(Clone)]
pub struct PyScanMetadata {
    pub(crate) inner: ScanMetadata,
}

#[pymethods]
impl PyScanMetadata {
    #[getter]
    fn patient_id(&self) -> String {
        self.inner.patient_id.clone()
    }

    /// Raw PATIENT_AGE token, or None
    #[getter]
    fn age(&self) -> Option<String> {
        self.inner.age.clone()
    }

    /// DBA, HOWTEK or LUMISYS
    #[getter]
    fn scanner_type(&self) -> String {
        self.inner.scanner_type().to_string()
    }

    /// MGH, WFU or ISMD
    #[getter]
    fn scan_institution(&self) -> String {
        self.inner.scan_institution().to_string()
    }

    #[getter]
    fn density(&self) -> Option<String> {
        self.inner.density.clone()
    }

    /// Names of the acquired views in ICS order
    #[getter]
    fn views(&self) -> Vec<String> {
        self.inner.views.keys().map(|v| v.to_string()).collect()
    }

    /// Geometry of a view such as "LEFT_CC", or None if not acquired
    fn view(&self, name: &str) -> PyResult<Option<PyViewInfo>> {
        let view: ViewName = name
            .parse()
            .map_err(pyo3::exceptions::PyValueError::new_err)?;
        Ok(self
            .inner
            .view(view)
            .map(|info| PyViewInfo { inner: *info }))
    }

    /// Convert metadata to the dictionary layout of the ICS reader
    pub fn to_dict(&self, py: Python) -> PyResult<Py<PyDict>> {
        let dict = PyDict::new_bound(py);
        dict.set_item("patient_id", self.patient_id())?;
        dict.set_item("age", self.age())?;
        dict.set_item("scanner_type", self.scanner_type())?;
        dict.set_item("scan_institution", self.scan_institution())?;
        dict.set_item("density", self.density())?;
        for (name, info) in &self.inner.views {
            let view = PyViewInfo { inner: *info };
            dict.set_item(name.ics_key(), view.to_dict(py)?)?;
        }
        Ok(dict.unbind())
    }

    /// Serialize to a JSON string
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "ScanMetadata(patient_id={}, scanner={}, institution={}, views={})",
            self.inner.patient_id,
            self.inner.scanner_type(),
            self.inner.scan_institution(),
            self.inner.views.len()
        )
    }
}

impl From<ScanMetadata> for PyScanMetadata {
    fn from(inner: ScanMetadata) -> Self {
        Self { inner }
    }
}

/// One abnormality from an overlay file
#[pyclass(name = "AbnormalityRecord", module = "_ddsm", frozen)]
#[derive(Clone)]
pub struct PyAbnormalityRecord {
    pub(crate) inner: AbnormalityRecord,
}

#[pymethods]
impl PyAbnormalityRecord {
    #[getter]
    fn source_file(&self) -> String {
        self.inner.source_file.display().to_string()
    }

    /// Lower-cased lesion type
    #[getter]
    fn lesion_type(&self) -> String {
        self.inner.lesion_type.clone()
    }

    /// Tokenized lines of the abnormality, verbatim
    #[getter]
    fn raw_fields(&self) -> Vec<Vec<String>> {
        self.inner.raw_fields.clone()
    }

    /// Tokens after the key of the first line starting with `key`
    fn field(&self, key: &str) -> Option<Vec<String>> {
        self.inner.field(key).map(<[String]>::to_vec)
    }

    fn __repr__(&self) -> String {
        format!(
            "AbnormalityRecord(source_file={}, lesion_type={}, lines={})",
            self.source_file(),
            self.inner.lesion_type,
            self.inner.raw_fields.len()
        )
    }
}

impl From<AbnormalityRecord> for PyAbnormalityRecord {
    fn from(inner: AbnormalityRecord) -> Self {
        Self { inner }
    }
}
