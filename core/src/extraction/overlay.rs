use crate::error::Result;
use crate::types::AbnormalityRecord;
use log::{debug, warn};
use std::path::Path;

use super::tokens::TokenizedLines;

/// First token of the line that opens an abnormality
pub const ABNORMALITY_MARKER: &str = "ABNORMALITY";

/// Reads the abnormalities listed in an overlay file
///
/// Overlay data is best-effort annotation: a zero, missing or non-integer
/// abnormality count, or a marker without a lesion line, yields an empty list.
///
/// # Errors
///
/// Only I/O errors reading the file are returned.
pub fn read_overlay(path: &Path) -> Result<Vec<AbnormalityRecord>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_overlay(&text, path))
}

/// Splits overlay text into one record per abnormality
///
/// The count comes from the second token of the first non-empty line; any
/// non-zero integer (negative or beyond `i64` included) enables the scan. Each
/// abnormality runs from its `ABNORMALITY` line up to the next marker (or the
/// end of file); its lesion type is the second token of the following line.
pub fn parse_overlay(text: &str, source_file: &Path) -> Vec<AbnormalityRecord> {
    let lines = TokenizedLines::parse(text);

    let declared = match declared_count(&lines) {
        Some(count) if count != 0 => count,
        _ => {
            debug!("{}: no abnormalities declared", source_file.display());
            return Vec::new();
        }
    };

    let mut boundaries: Vec<usize> = lines
        .lines()
        .iter()
        .enumerate()
        .filter(|(_, tokens)| tokens[0] == ABNORMALITY_MARKER)
        .map(|(idx, _)| idx)
        .collect();
    boundaries.push(lines.len());

    let mut records = Vec::with_capacity(boundaries.len() - 1);
    for window in boundaries.windows(2) {
        let slice = &lines.lines()[window[0]..window[1]];
        let Some(lesion_type) = slice.get(1).and_then(|line| line.get(1)) else {
            warn!(
                "{}: abnormality at line {} has no lesion type, ignoring overlay",
                source_file.display(),
                window[0]
            );
            return Vec::new();
        };

        records.push(AbnormalityRecord {
            source_file: source_file.to_path_buf(),
            lesion_type: lesion_type.to_lowercase(),
            raw_fields: slice.to_vec(),
        });
    }

    if usize::try_from(declared).ok() != Some(records.len()) {
        debug!(
            "{}: declared {} abnormalities, found {}",
            source_file.display(),
            declared,
            records.len()
        );
    }
    records
}

/// Integer count token of the first line, `None` if absent or not an integer
///
/// Counts outside `i64` saturate so they stay non-zero.
fn declared_count(lines: &TokenizedLines) -> Option<i64> {
    let token: &str = lines.lines().first()?.get(1)?;
    let digits = token
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(token.parse().unwrap_or(if token.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    const TWO_LESIONS: &str = "TOTAL_ABNORMALITIES 2
ABNORMALITY 1
LESION_TYPE MASS SHAPE IRREGULAR MARGINS SPICULATED
ASSESSMENT 5
SUBTLETY 4
PATHOLOGY MALIGNANT
TOTAL_OUTLINES 1
BOUNDARY
1726 2290 4 4 4 4 0 0 0 0 #

ABNORMALITY 2
LESION_TYPE CALCIFICATION TYPE PLEOMORPHIC DISTRIBUTION CLUSTERED
ASSESSMENT 4
SUBTLETY 2
PATHOLOGY BENIGN
TOTAL_OUTLINES 1
BOUNDARY
1510 2990 2 2 2 2 #
";

    fn source() -> PathBuf {
        PathBuf::from("A_1234_1.LEFT_CC.OVERLAY")
    }

    #[test]
    fn test_two_abnormalities() {
        let records = parse_overlay(TWO_LESIONS, &source());
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].lesion_type, "mass");
        assert_eq!(records[0].source_file, source());
        assert_eq!(records[0].raw_fields.len(), 8);
        assert_eq!(records[0].raw_fields[0], ["ABNORMALITY", "1"]);
        assert_eq!(records[0].field("PATHOLOGY").unwrap(), ["MALIGNANT"]);

        assert_eq!(records[1].lesion_type, "calcification");
        assert_eq!(records[1].raw_fields.len(), 8);
        assert_eq!(
            records[1].raw_fields.last().unwrap().last().unwrap(),
            "#"
        );
    }

    #[test]
    fn test_zero_count_is_empty() {
        for header in ["TOTAL_ABNORMALITIES 0", "TOTAL_ABNORMALITIES -0", "TOTAL_ABNORMALITIES 000"] {
            let text = TWO_LESIONS.replacen("TOTAL_ABNORMALITIES 2", header, 1);
            assert!(parse_overlay(&text, &source()).is_empty(), "{}", header);
        }
    }

    #[test]
    fn test_non_integer_count_is_empty() {
        for header in [
            "TOTAL_ABNORMALITIES two",
            "TOTAL_ABNORMALITIES",
            "TOTAL_ABNORMALITIES 1.5",
            "TOTAL_ABNORMALITIES -",
        ] {
            let text = TWO_LESIONS.replacen("TOTAL_ABNORMALITIES 2", header, 1);
            assert!(parse_overlay(&text, &source()).is_empty(), "{}", header);
        }
    }

    #[test]
    fn test_any_nonzero_integer_count_scans_markers() {
        for header in [
            "TOTAL_ABNORMALITIES -1",
            "TOTAL_ABNORMALITIES +2",
            "TOTAL_ABNORMALITIES 99999999999999999999999",
            "TOTAL_ABNORMALITIES -99999999999999999999999",
        ] {
            let text = TWO_LESIONS.replacen("TOTAL_ABNORMALITIES 2", header, 1);
            let records = parse_overlay(&text, &source());
            assert_eq!(records.len(), 2, "{}", header);
            assert_eq!(records[0].lesion_type, "mass");
        }

        let records = parse_overlay(
            "TOTAL_ABNORMALITIES -1\nABNORMALITY 1\nLESION_TYPE MASS\n",
            &source(),
        );
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_overlay("", &source()).is_empty());
        assert!(parse_overlay("\n\n   \n", &source()).is_empty());
    }

    #[test]
    fn test_marker_must_match_exactly() {
        let text = "TOTAL_ABNORMALITIES 1
ABNORMALITY 1
LESION_TYPE MASS
ABNORMALITY_NOTE see report
";
        let records = parse_overlay(text, &source());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].raw_fields.len(), 3);
    }

    #[test]
    fn test_marker_without_lesion_line() {
        let text = "TOTAL_ABNORMALITIES 2
ABNORMALITY 1
LESION_TYPE MASS
ABNORMALITY 2
";
        assert!(parse_overlay(text, &source()).is_empty());

        let text = "TOTAL_ABNORMALITIES 1
ABNORMALITY 1
LESION_TYPE
";
        assert!(parse_overlay(text, &source()).is_empty());
    }

    #[test]
    fn test_count_without_markers() {
        let text = "TOTAL_ABNORMALITIES 3\nNOTHING HERE\n";
        assert!(parse_overlay(text, &source()).is_empty());
    }

    #[test]
    fn test_read_overlay_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TWO_LESIONS.as_bytes()).unwrap();

        let records = read_overlay(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source_file, file.path());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(read_overlay(&dir.path().join("missing.OVERLAY")).is_err());
    }
}
