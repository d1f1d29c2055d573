//! Infile Writer - convert JSON-lines records into a `LOAD DATA INFILE` file
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 3 | File I/O error |
//! | 4 | Data error (bad JSON, unsupported value) |

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use infile_writer::cli::Args;
use infile_writer::convert::convert;
use infile_writer::{InfileError, InfileWriter};

/// Exit code for success
const EXIT_SUCCESS: u8 = 0;
/// Exit code for configuration/argument errors
const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for file I/O errors
const EXIT_IO_ERROR: u8 = 3;
/// Exit code for malformed or unsupported input data
const EXIT_DATA_ERROR: u8 = 4;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = args.validate() {
        eprintln!("Error: Configuration error: {}", e);
        eprintln!("  Hint: Use --help for usage information");
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    match run(&args) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Logs go to stderr so stdout stays a clean data stream.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), InfileError> {
    let config = args.writer_config().map_err(|e| match e {
        InfileError::InvalidConfig(_) => e,
        other => InfileError::InvalidConfig(other.to_string()),
    })?;

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    let mut writer = InfileWriter::with_config(output, &config);
    let summary = convert(input, &mut writer)?;

    info!(
        records = summary.records_written,
        blank_lines = summary.blank_lines,
        "Wrote infile"
    );
    Ok(())
}

fn exit_code(error: &InfileError) -> u8 {
    match error.root() {
        InfileError::InvalidConfig(_) => EXIT_CONFIG_ERROR,
        InfileError::Io(_) => EXIT_IO_ERROR,
        _ => EXIT_DATA_ERROR,
    }
}
