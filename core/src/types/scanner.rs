use super::{ScanInstitution, ScannerType};
use crate::error::{DdsmError, Result};
use std::fmt;

/// Fixed `(case letter, scanner type) -> institution` table
///
/// The case letter is the first character of the ICS file name
/// (`A-1234-1.ics`, `D_4606_1.ics`, ...).
pub const SCANNER_TABLE: [(char, ScannerType, ScanInstitution); 5] = [
    ('A', ScannerType::Dba, ScanInstitution::Mgh),
    ('A', ScannerType::Howtek, ScanInstitution::Mgh),
    ('B', ScannerType::Lumisys, ScanInstitution::Wfu),
    ('C', ScannerType::Lumisys, ScanInstitution::Wfu),
    ('D', ScannerType::Howtek, ScanInstitution::Ismd),
];

/// Looks up the scanning institution for a case letter and scanner type
///
/// # Errors
///
/// Returns `UnknownScannerCombination` for any pair outside [`SCANNER_TABLE`].
pub fn lookup_institution(letter: char, scanner_type: ScannerType) -> Result<ScanInstitution> {
    SCANNER_TABLE
        .iter()
        .find(|(l, s, _)| *l == letter && *s == scanner_type)
        .map(|(_, _, institution)| *institution)
        .ok_or_else(|| DdsmError::UnknownScannerCombination {
            letter,
            scanner_type: scanner_type.to_string(),
        })
}

/// Validated scanner identity of a case
///
/// Can only be built from a pair present in [`SCANNER_TABLE`]; the
/// institution is looked up once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScannerId {
    letter: char,
    scanner_type: ScannerType,
    institution: ScanInstitution,
}

impl ScannerId {
    /// Creates a scanner identity, validating it against the scanner table
    pub fn new(letter: char, scanner_type: ScannerType) -> Result<Self> {
        let institution = lookup_institution(letter, scanner_type)?;
        Ok(Self {
            letter,
            scanner_type,
            institution,
        })
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn scanner_type(&self) -> ScannerType {
        self.scanner_type
    }

    /// Institution that digitized the case
    pub fn institution(&self) -> ScanInstitution {
        self.institution
    }
}

impl fmt::Display for ScannerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.letter, self.scanner_type, self.institution())
    }
}
