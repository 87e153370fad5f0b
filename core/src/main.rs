use clap::Parser;
use ddsm_core::cli::report::{ConversionSummary, IcsReport};
use ddsm_core::cli::{setup_logging, Cli, OutputFormat};
use ddsm_core::{convert_case, read_ics, CaseFiles, ExternalDecoder, LjpegReader};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let case = match CaseFiles::from_ljpeg(&cli.ljpeg) {
        Ok(case) => case,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    info!(
        "Processing {} ({}) with ICS {}",
        case.ljpeg.display(),
        case.view,
        case.ics.display()
    );

    if cli.ics_info {
        match read_ics(&case.ics) {
            Ok(metadata) => print_ics(&metadata, &cli.format),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }

    let reader = LjpegReader::new(ExternalDecoder::new(&cli.decoder));
    let report = match convert_case(&reader, &case, &cli.output, &cli.convert_options()) {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to convert {}: {}", case.ljpeg.display(), e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    print!("{}", ConversionSummary::new(&report));
    if report.verified == Some(false) {
        process::exit(2);
    }
}

fn print_ics(metadata: &ddsm_core::ScanMetadata, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", IcsReport::new(metadata)),
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(metadata) {
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
