use crate::error::{DdsmError, Result};
use crate::types::{ScanMetadata, ScannerId, ScannerType, ViewInfo, ViewName, STANDARD_VIEWS};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::Path;

use super::tokens::TokenizedLines;

// ICS row keys
pub const FILENAME: &str = "filename";
pub const PATIENT_AGE: &str = "PATIENT_AGE";
pub const DIGITIZER: &str = "DIGITIZER";
pub const DENSITY: &str = "DENSITY";

// Positional fields of a view row:
// LEFT_CC LINES 6841 PIXELS_PER_LINE 3901 BITS_PER_PIXEL 12 RESOLUTION 43.5 OVERLAY
const VIEW_HEIGHT: usize = 2;
const VIEW_WIDTH: usize = 4;
const VIEW_BPP: usize = 6;
const VIEW_RESOLUTION: usize = 8;
const VIEW_OVERLAY: usize = 9;

/// Bit depth every DDSM scan is expected to carry
pub const EXPECTED_BPP: u32 = 12;

/// Reads and parses an ICS file
///
/// The scanner letter is the first character of the file's base name.
///
/// # Errors
///
/// Returns an error if the file cannot be read or [`parse_ics`] fails.
pub fn read_ics(path: &Path) -> Result<ScanMetadata> {
    let letter = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.chars().next())
        .ok_or_else(|| {
            DdsmError::InvalidPath(format!("ICS path has no file name: {}", path.display()))
        })?;
    debug!("ICS {} has scanner letter {}", path.display(), letter);

    let text = std::fs::read_to_string(path)?;
    parse_ics(&text, letter)
}

/// Parses ICS text into [`ScanMetadata`]
///
/// # Errors
///
/// - `MissingRequiredField` if the `filename` or `DIGITIZER` rows are absent
/// - `UnknownScannerCombination` if `(letter, digitizer)` is not a known scanner
/// - `InvalidValue` if a present view row has unusable geometry
pub fn parse_ics(text: &str, letter: char) -> Result<ScanMetadata> {
    let lines = TokenizedLines::parse(text);

    let patient_id = required(&lines, FILENAME)?;
    let digitizer = required(&lines, DIGITIZER)?;
    let scanner_type: ScannerType =
        digitizer
            .parse()
            .map_err(|_| DdsmError::UnknownScannerCombination {
                letter,
                scanner_type: digitizer.to_string(),
            })?;
    let scanner = ScannerId::new(letter, scanner_type)?;

    let mut views = BTreeMap::new();
    for view in STANDARD_VIEWS {
        if lines.row(view.ics_key()).is_none() {
            continue;
        }
        let info = parse_view(&lines, view)?;
        if info.bpp_original != EXPECTED_BPP {
            warn!(
                "BPS != {} for {} {}: {}",
                EXPECTED_BPP, patient_id, view, info.bpp_original
            );
        }
        views.insert(view, info);
    }

    Ok(ScanMetadata {
        patient_id: patient_id.to_string(),
        age: optional(&lines, PATIENT_AGE),
        scanner,
        density: optional(&lines, DENSITY),
        views,
    })
}

fn required<'a>(lines: &'a TokenizedLines, key: &str) -> Result<&'a str> {
    lines
        .value(key, 1)
        .ok_or_else(|| DdsmError::MissingRequiredField(key.to_string()))
}

fn optional(lines: &TokenizedLines, key: &str) -> Option<String> {
    lines.value(key, 1).map(str::to_string)
}

fn parse_view(lines: &TokenizedLines, view: ViewName) -> Result<ViewInfo> {
    let key = view.ics_key();

    let height: usize = view_field(lines, key, VIEW_HEIGHT)?;
    let width: usize = view_field(lines, key, VIEW_WIDTH)?;
    let bpp_original: u32 = view_field(lines, key, VIEW_BPP)?;
    let resolution_microns: f64 = view_field(lines, key, VIEW_RESOLUTION)?;

    if height == 0 || width == 0 || height.checked_mul(width).is_none() {
        return Err(DdsmError::InvalidValue(format!(
            "{} has unusable geometry {}x{}",
            key, height, width
        )));
    }
    if !(resolution_microns.is_finite() && resolution_microns > 0.0) {
        return Err(DdsmError::InvalidValue(format!(
            "{} has non-positive resolution {}",
            key, resolution_microns
        )));
    }

    Ok(ViewInfo {
        height,
        width,
        bpp_original,
        resolution_microns,
        has_overlay: lines.value(key, VIEW_OVERLAY) == Some("OVERLAY"),
    })
}

fn view_field<T: std::str::FromStr>(lines: &TokenizedLines, key: &str, idx: usize) -> Result<T> {
    let raw = lines.value(key, idx).ok_or_else(|| {
        DdsmError::InvalidValue(format!("{} row has no field at position {}", key, idx))
    })?;
    raw.parse().map_err(|_| {
        DdsmError::InvalidValue(format!(
            "{} row field {} is not a number: '{}'",
            key, idx, raw
        ))
    })
}
