pub mod report;

use crate::api::ConvertOptions;
use crate::decoder::DEFAULT_DECODER;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for ddsm
#[derive(Parser, Debug)]
#[command(name = "ddsm")]
#[command(about = "Read and transform DDSM LJPEG mammograms")]
#[command(version)]
pub struct Cli {
    /// LJPEG file of one view, e.g. A_1234_1.LEFT_CC.LJPEG
    #[arg(value_name = "LJPEG")]
    pub ljpeg: PathBuf,

    /// Output image, format chosen by extension (.png, .tif)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Re-read the output and check the conversion is lossless
    #[arg(long)]
    pub verify: bool,

    /// Stretch to 8 bits for viewing (loses information)
    #[arg(long)]
    pub visual: bool,

    /// Rescale factor for the visual output
    #[arg(long, requires = "visual")]
    pub scale: Option<f64>,

    /// Print the parsed ICS header
    #[arg(long)]
    pub ics_info: bool,

    /// Map gray levels to optical density
    #[arg(long)]
    pub od_correct: bool,

    /// LJPEG decoder executable
    #[arg(long, env = "LJPEG_DECODER", default_value = DEFAULT_DECODER)]
    pub decoder: PathBuf,

    /// Output format for reports
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            verify: self.verify,
            visual: self.visual,
            od_correct: self.od_correct,
            scale: self.scale,
            ..Default::default()
        }
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Initialises env_logger; `RUST_LOG` still takes precedence
pub fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
