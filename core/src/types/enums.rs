use std::fmt;
use std::str::FromStr;

/// Film digitizer model recorded in the ICS `DIGITIZER` row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "UPPERCASE"))]
pub enum ScannerType {
    Dba,
    Howtek,
    Lumisys,
}

impl ScannerType {
    /// Returns the token used for this scanner in ICS files
    pub fn ics_token(&self) -> &'static str {
        match self {
            ScannerType::Dba => "DBA",
            ScannerType::Howtek => "HOWTEK",
            ScannerType::Lumisys => "LUMISYS",
        }
    }
}

impl FromStr for ScannerType {
    type Err = String;

    /// Exact, case-sensitive match on the ICS token
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DBA" => Ok(ScannerType::Dba),
            "HOWTEK" => Ok(ScannerType::Howtek),
            "LUMISYS" => Ok(ScannerType::Lumisys),
            other => Err(format!("Unknown digitizer '{}'", other)),
        }
    }
}

impl fmt::Display for ScannerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ics_token())
    }
}

/// Institution that digitized the films
///
/// - `Mgh`: Massachusetts General Hospital
/// - `Wfu`: Wake Forest University
/// - `Ismd`: Washington University School of Medicine (St. Louis)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "UPPERCASE"))]
pub enum ScanInstitution {
    Mgh,
    Wfu,
    Ismd,
}

impl ScanInstitution {
    /// Returns the short institution code
    pub fn code(&self) -> &'static str {
        match self {
            ScanInstitution::Mgh => "MGH",
            ScanInstitution::Wfu => "WFU",
            ScanInstitution::Ismd => "ISMD",
        }
    }
}

impl FromStr for ScanInstitution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MGH" => Ok(ScanInstitution::Mgh),
            "WFU" => Ok(ScanInstitution::Wfu),
            "ISMD" => Ok(ScanInstitution::Ismd),
            other => Err(format!("Unknown institution '{}'", other)),
        }
    }
}

impl fmt::Display for ScanInstitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_type_parse() {
        assert_eq!("DBA".parse::<ScannerType>(), Ok(ScannerType::Dba));
        assert_eq!("HOWTEK".parse::<ScannerType>(), Ok(ScannerType::Howtek));
        assert_eq!("LUMISYS".parse::<ScannerType>(), Ok(ScannerType::Lumisys));
        assert!("howtek".parse::<ScannerType>().is_err());
        assert!("".parse::<ScannerType>().is_err());
    }

    #[test]
    fn test_institution_parse() {
        assert_eq!("MGH".parse::<ScanInstitution>(), Ok(ScanInstitution::Mgh));
        assert_eq!("ISMD".parse::<ScanInstitution>(), Ok(ScanInstitution::Ismd));
        assert!("wfu".parse::<ScanInstitution>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ScannerType::Lumisys.to_string(), "LUMISYS");
        assert_eq!(ScanInstitution::Ismd.to_string(), "ISMD");
    }
}
