use crate::error::{DdsmError, Result};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Parsed status line of the external LJPEG decoder
///
/// The decoder prints something like
///
/// ```text
/// > GW:1979  GH:4349  R:0
/// >> C:1  N:xx.ljpeg.1  W:1979  H:4349  hf:1  vf:1
/// ```
///
/// `N` names the raw sample file it wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderOutput {
    pub channels: u32,
    pub sample_file: PathBuf,
    pub width: usize,
    pub height: usize,
}

fn status_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\sC:(\d+)\s+N:(\S+)\s+W:(\d+)\s+H:(\d+)\s")
            .expect("Failed to compile regex")
    })
}

/// Parses decoder standard output
///
/// # Errors
///
/// - `MalformedDecoderOutput` if no status line is found
/// - `MalformedDecoderOutput` if `W*H` does not fit in `usize`
/// - `UnsupportedChannelCount` if the channel count is not 1
pub fn parse_decoder_output(stdout: &str) -> Result<DecoderOutput> {
    let caps = status_regex().captures(stdout).ok_or_else(|| {
        DdsmError::MalformedDecoderOutput(format!(
            "no 'C: N: W: H:' status line in {:?}",
            stdout.trim()
        ))
    })?;

    let channels: u32 = parse_number(&caps[1], "C")?;
    let sample_file = PathBuf::from(&caps[2]);
    let width: usize = parse_number(&caps[3], "W")?;
    let height: usize = parse_number(&caps[4], "H")?;

    if width.checked_mul(height).is_none() {
        return Err(DdsmError::MalformedDecoderOutput(format!(
            "{}x{} samples overflow",
            width, height
        )));
    }
    if channels != 1 {
        return Err(DdsmError::UnsupportedChannelCount(channels));
    }

    Ok(DecoderOutput {
        channels,
        sample_file,
        width,
        height,
    })
}

fn parse_number<T: std::str::FromStr>(digits: &str, field: &str) -> Result<T> {
    digits.parse().map_err(|_| {
        DdsmError::MalformedDecoderOutput(format!("{} value '{}' out of range", field, digits))
    })
}
