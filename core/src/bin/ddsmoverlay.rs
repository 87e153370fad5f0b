use clap::{ArgAction, Parser, ValueEnum};
use ddsm_core::cli::report::AbnormalityReport;
use ddsm_core::cli::setup_logging;
use ddsm_core::{read_overlay, AbnormalityRecord};
use log::info;
use std::path::PathBuf;
use std::process;

/// CLI tool for listing the abnormalities of a DDSM overlay file
#[derive(Parser, Debug)]
#[command(name = "ddsmoverlay")]
#[command(about = "List radiologist-marked abnormalities from a DDSM overlay file")]
#[command(version)]
struct Cli {
    /// Overlay file, e.g. A_1234_1.LEFT_CC.OVERLAY
    #[arg(value_name = "OVERLAY")]
    overlay: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Verbose logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
    /// Lesion types only (one per line)
    Types,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let records = match read_overlay(&cli.overlay) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error: Failed to read {}: {}", cli.overlay.display(), e);
            process::exit(1);
        }
    };
    info!(
        "{}: {} abnormalities",
        cli.overlay.display(),
        records.len()
    );

    output_records(&records, cli.format);
}

fn output_records(records: &[AbnormalityRecord], format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", AbnormalityReport::new(records)),
        OutputFormat::Types => {
            for record in records {
                println!("{}", record.lesion_type);
            }
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(records) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from(["ddsmoverlay", "a.OVERLAY", "-f", "types", "-v"]).unwrap();
        assert_eq!(cli.overlay, PathBuf::from("a.OVERLAY"));
        assert!(matches!(cli.format, OutputFormat::Types));
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_reject_unknown_format() {
        assert!(Cli::try_parse_from(["ddsmoverlay", "a.OVERLAY", "-f", "xml"]).is_err());
    }
}
