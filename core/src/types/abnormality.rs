use std::path::PathBuf;

/// One radiologist-marked abnormality from an overlay file
///
/// `raw_fields` keeps every tokenized line of the abnormality, starting with
/// its `ABNORMALITY` marker, for consumers that need fields not modeled here
/// (assessment, subtlety, pathology, outline chain codes).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct AbnormalityRecord {
    /// Overlay file the record was read from
    pub source_file: PathBuf,

    /// Lower-cased lesion type, e.g. `mass` or `calcification`
    pub lesion_type: String,

    /// Verbatim token lists of the abnormality's lines
    pub raw_fields: Vec<Vec<String>>,
}

impl AbnormalityRecord {
    /// Returns the tokens of the first line whose key matches `key`
    ///
    /// Keys are the first token of a line, e.g. `PATHOLOGY` or `ASSESSMENT`.
    pub fn field(&self, key: &str) -> Option<&[String]> {
        self.raw_fields
            .iter()
            .find(|line| line.first().map(String::as_str) == Some(key))
            .map(|line| &line[1..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_field_lookup() {
        let record = AbnormalityRecord {
            source_file: PathBuf::from("case.OVERLAY"),
            lesion_type: "mass".to_string(),
            raw_fields: vec![
                tokens("ABNORMALITY 1"),
                tokens("LESION_TYPE MASS SHAPE OVAL"),
                tokens("PATHOLOGY MALIGNANT"),
            ],
        };

        assert_eq!(record.field("PATHOLOGY").unwrap(), ["MALIGNANT"]);
        assert_eq!(record.field("LESION_TYPE").unwrap().len(), 3);
        assert!(record.field("SUBTLETY").is_none());
    }
}
