use super::{ScanInstitution, ScannerId, ScannerType, ViewInfo, ViewName};
use std::collections::BTreeMap;

/// Structured contents of a case's ICS header
///
/// A view appears in `views` only if the ICS file has a row for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanMetadata {
    /// Case identifier from the `filename` row, e.g. `D-4606-1`
    pub patient_id: String,

    /// Raw `PATIENT_AGE` token, not every case carries a numeric age
    pub age: Option<String>,

    /// Validated digitizer identity
    pub scanner: ScannerId,

    /// Raw `DENSITY` token (ACR breast density)
    pub density: Option<String>,

    /// Acquired views keyed by name
    pub views: BTreeMap<ViewName, ViewInfo>,
}

impl ScanMetadata {
    pub fn scanner_type(&self) -> ScannerType {
        self.scanner.scanner_type()
    }

    pub fn scan_institution(&self) -> ScanInstitution {
        self.scanner.institution()
    }

    /// Returns geometry for a view, `None` if it was not acquired
    pub fn view(&self, view: ViewName) -> Option<&ViewInfo> {
        self.views.get(&view)
    }
}

#[cfg(feature = "json")]
impl serde::Serialize for ScanMetadata {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ScanMetadata", 6)?;
        state.serialize_field("patient_id", &self.patient_id)?;
        state.serialize_field("age", &self.age)?;
        state.serialize_field("scanner_type", &self.scanner_type())?;
        state.serialize_field("scan_institution", &self.scan_institution())?;
        state.serialize_field("density", &self.density)?;
        state.serialize_field("views", &self.views)?;
        state.end()
    }
}
