//! External LJPEG decoder
//!
//! The lossless-JPEG codec is not implemented here. A decoder binary (the
//! Stanford `jpeg` tool built with `-d -s` support) writes the raw samples to
//! disk and reports where on standard output.

use crate::error::{DdsmError, Result};
use crate::extraction::{parse_decoder_output, DecoderOutput};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default decoder executable, looked up on `PATH`
pub const DEFAULT_DECODER: &str = "jpeg";

/// Turns a compressed LJPEG file into a raw sample file
pub trait Decoder {
    /// Decodes `path`, returning the sample file location and its dimensions
    fn decode(&self, path: &Path) -> Result<DecoderOutput>;
}

/// Runs the decoder executable as a child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDecoder {
    binary: PathBuf,
}

impl ExternalDecoder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for ExternalDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_DECODER)
    }
}

impl Decoder for ExternalDecoder {
    fn decode(&self, path: &Path) -> Result<DecoderOutput> {
        debug!("Running {} -d -s {}", self.binary.display(), path.display());

        let output = Command::new(&self.binary)
            .arg("-d")
            .arg("-s")
            .arg(path)
            .output()
            .map_err(|e| {
                DdsmError::DecoderFailed(format!(
                    "cannot run {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("Decoder output: {}", stdout.trim());

        if !output.status.success() {
            return Err(DdsmError::DecoderFailed(format!(
                "{} exited with {} on {}: {}",
                self.binary.display(),
                output.status,
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_decoder_output(&stdout)
    }
}
