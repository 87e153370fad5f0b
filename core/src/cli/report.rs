use crate::api::ConversionReport;
use crate::types::{AbnormalityRecord, ScanMetadata};
use std::fmt;

/// Text report of a parsed ICS header
pub struct IcsReport<'a> {
    metadata: &'a ScanMetadata,
}

impl<'a> IcsReport<'a> {
    /// Creates a new ICS report
    pub fn new(metadata: &'a ScanMetadata) -> Self {
        Self { metadata }
    }
}

impl<'a> fmt::Display for IcsReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.metadata;
        writeln!(f, "Case {}", m.patient_id)?;
        writeln!(f, "==============")?;
        writeln!(f)?;
        writeln!(f, "Age:          {}", m.age.as_deref().unwrap_or("unknown"))?;
        writeln!(f, "Density:      {}", m.density.as_deref().unwrap_or("unknown"))?;
        writeln!(f, "Scanner:      {}", m.scanner_type())?;
        writeln!(f, "Institution:  {}", m.scan_institution())?;
        writeln!(f)?;

        writeln!(f, "Views")?;
        writeln!(f, "-----")?;
        if m.views.is_empty() {
            writeln!(f, "none")?;
        }
        for (name, view) in &m.views {
            writeln!(
                f,
                "{:<10} {}x{} px, {} bpp, {} um{}",
                name.ics_key(),
                view.width,
                view.height,
                view.bpp_original,
                view.resolution_microns,
                if view.has_overlay { ", overlay" } else { "" }
            )?;
        }

        Ok(())
    }
}

/// Text summary of a finished conversion
pub struct ConversionSummary<'a> {
    report: &'a ConversionReport,
}

impl<'a> ConversionSummary<'a> {
    pub fn new(report: &'a ConversionReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for ConversionSummary<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        writeln!(
            f,
            "{} {}: {} scan -> {} ({}, {}-bit)",
            r.metadata.patient_id,
            r.view,
            r.scan,
            r.output.display(),
            r.written,
            r.bit_depth
        )?;
        match r.verified {
            Some(true) => writeln!(f, "Verification successful, conversion is lossless")?,
            Some(false) => writeln!(f, "Verification failed")?,
            None => {}
        }
        Ok(())
    }
}

/// Text listing of overlay abnormalities
pub struct AbnormalityReport<'a> {
    records: &'a [AbnormalityRecord],
}

impl<'a> AbnormalityReport<'a> {
    pub fn new(records: &'a [AbnormalityRecord]) -> Self {
        Self { records }
    }
}

impl<'a> fmt::Display for AbnormalityReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Abnormalities: {}", self.records.len())?;
        for (idx, record) in self.records.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "#{} {}", idx + 1, record.lesion_type)?;
            for key in ["ASSESSMENT", "SUBTLETY", "PATHOLOGY"] {
                if let Some(values) = record.field(key) {
                    writeln!(f, "  {:<11} {}", key.to_lowercase(), values.join(" "))?;
                }
            }
            writeln!(f, "  lines       {}", record.raw_fields.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{parse_ics, parse_overlay};
    use std::path::Path;

    #[test]
    fn test_ics_report_format() {
        let text = "filename D-4606-1\nPATIENT_AGE 52\nDIGITIZER HOWTEK\n\
                    LEFT_CC LINES 6841 PIXELS_PER_LINE 3901 BITS_PER_PIXEL 12 RESOLUTION 43.5 OVERLAY\n";
        let metadata = parse_ics(text, 'D').unwrap();
        let output = IcsReport::new(&metadata).to_string();

        assert!(output.contains("Case D-4606-1"));
        assert!(output.contains("Age:          52"));
        assert!(output.contains("Density:      unknown"));
        assert!(output.contains("Scanner:      HOWTEK"));
        assert!(output.contains("Institution:  ISMD"));
        assert!(output.contains("LEFT_CC    3901x6841 px, 12 bpp, 43.5 um, overlay"));
    }

    #[test]
    fn test_abnormality_report_format() {
        let text = "TOTAL_ABNORMALITIES 1\nABNORMALITY 1\nLESION_TYPE MASS SHAPE OVAL\n\
                    ASSESSMENT 3\nPATHOLOGY BENIGN_WITHOUT_CALLBACK\n";
        let records = parse_overlay(text, Path::new("x.OVERLAY"));
        let output = AbnormalityReport::new(&records).to_string();

        assert!(output.contains("Abnormalities: 1"));
        assert!(output.contains("#1 mass"));
        assert!(output.contains("  assessment  3"));
        assert!(output.contains("  pathology   BENIGN_WITHOUT_CALLBACK"));
        assert!(!output.contains("subtlety"));
    }

    #[test]
    fn test_empty_abnormality_report() {
        let output = AbnormalityReport::new(&[]).to_string();
        assert_eq!(output, "Abnormalities: 0\n");
    }
}
