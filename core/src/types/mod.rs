//! Core type definitions for DDSM cases
//!
//! This module provides the value types produced by the parsers:
//! - [`ScannerType`] / [`ScanInstitution`]: Digitizer model and digitizing site
//! - [`ScannerId`]: Validated `(case letter, scanner type)` pair
//! - [`ViewName`] / [`ViewInfo`]: Standard views and their scan geometry
//! - [`ScanMetadata`]: Parsed ICS header
//! - [`AbnormalityRecord`]: One abnormality from an overlay file

mod abnormality;
mod enums;
mod metadata;
mod scanner;
mod view;

pub use abnormality::AbnormalityRecord;
pub use enums::{ScanInstitution, ScannerType};
pub use metadata::ScanMetadata;
pub use scanner::{lookup_institution, ScannerId, SCANNER_TABLE};
pub use view::{ViewInfo, ViewName, STANDARD_VIEWS};
