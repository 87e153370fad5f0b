use std::fmt;
use std::str::FromStr;

/// One of the four standard DDSM acquisition views
///
/// The ICS row key and the view component of an LJPEG file name are the
/// upper-case names, e.g. `LEFT_CC` in `A_1234_1.LEFT_CC.LJPEG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ViewName {
    LeftCc,
    RightCc,
    LeftMlo,
    RightMlo,
}

impl ViewName {
    /// Returns the ICS row key for this view
    pub fn ics_key(&self) -> &'static str {
        match self {
            ViewName::LeftCc => "LEFT_CC",
            ViewName::RightCc => "RIGHT_CC",
            ViewName::LeftMlo => "LEFT_MLO",
            ViewName::RightMlo => "RIGHT_MLO",
        }
    }
}

impl FromStr for ViewName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STANDARD_VIEWS
            .iter()
            .copied()
            .find(|view| view.ics_key() == s)
            .ok_or_else(|| format!("Unknown view name '{}'", s))
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ics_key())
    }
}

/// Standard views in ICS file order
pub const STANDARD_VIEWS: [ViewName; 4] = [
    ViewName::LeftCc,
    ViewName::RightCc,
    ViewName::LeftMlo,
    ViewName::RightMlo,
];

/// Scan geometry of a single acquired view
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ViewInfo {
    /// Number of lines (image rows)
    pub height: usize,

    /// Pixels per line (image columns)
    pub width: usize,

    /// Bits per pixel of the original scan, normally 12
    pub bpp_original: u32,

    /// Scan resolution in microns
    pub resolution_microns: f64,

    /// Whether the ICS marks this view as carrying an overlay file
    pub has_overlay: bool,
}

impl ViewInfo {
    /// Total number of pixels (height * width), `None` on overflow
    pub fn pixel_count(&self) -> Option<usize> {
        self.height.checked_mul(self.width)
    }
}
