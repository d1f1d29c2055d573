//! CLI argument parsing module
//!
//! Handles command-line argument parsing using `clap` derive macros and
//! merges the flags over an optional JSON configuration file.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::WriterConfig;
use crate::error::InfileError;
use crate::infile::Escaping;

/// Escape table selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EscapingArg {
    /// Backslash written as `\b`, quote character left as is
    Legacy,
    /// Backslash written as `\\`, quote character escaped
    Mysql,
}

impl From<EscapingArg> for Escaping {
    fn from(arg: EscapingArg) -> Self {
        match arg {
            EscapingArg::Legacy => Escaping::Legacy,
            EscapingArg::Mysql => Escaping::MySql,
        }
    }
}

/// Command-line arguments for the infile writer.
///
/// Reads newline-delimited JSON arrays and writes one `LOAD DATA INFILE`
/// record per array. Flags given on the command line override the values of
/// `--config`.
#[derive(Parser, Debug)]
#[command(name = "infile-writer")]
#[command(about = "Convert JSON-lines records into a LOAD DATA INFILE file")]
#[command(version)]
pub struct Args {
    /// Input file with one JSON array per line (default: stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file with writer settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Field delimiter (single character, `\t` accepted)
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Quote character (single character)
    #[arg(long)]
    pub quote: Option<String>,

    /// Line terminator (`\n`, `\r` and `\t` escapes accepted)
    #[arg(long)]
    pub line_end: Option<String>,

    /// Escape table for text fields
    #[arg(long, value_enum)]
    pub escaping: Option<EscapingArg>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Args {
    /// Validate argument combinations.
    ///
    /// - `--input` and `--output` must not name the same file
    /// - `--delimiter` and `--quote` must be exactly one character after
    ///   escape processing
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(input), Some(output)) = (&self.input, &self.output) {
            if input == output {
                return Err("--input and --output must be different files".to_string());
            }
        }

        if let Some(delimiter) = &self.delimiter {
            single_char("--delimiter", delimiter)?;
        }

        if let Some(quote) = &self.quote {
            single_char("--quote", quote)?;
        }

        Ok(())
    }

    /// Builds the writer settings: defaults, then `--config`, then flags.
    ///
    /// The result is validated.
    pub fn writer_config(&self) -> Result<WriterConfig, InfileError> {
        let mut config = match &self.config {
            Some(path) => WriterConfig::from_json_file(path)?,
            None => WriterConfig::default(),
        };

        if let Some(delimiter) = &self.delimiter {
            config.delimiter =
                single_char("--delimiter", delimiter).map_err(InfileError::InvalidConfig)?;
        }
        if let Some(quote) = &self.quote {
            config.quote = single_char("--quote", quote).map_err(InfileError::InvalidConfig)?;
        }
        if let Some(line_end) = &self.line_end {
            config.line_end = unescape_arg(line_end);
        }
        if let Some(escaping) = self.escaping {
            config.escaping = escaping.into();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Expands `\n`, `\r`, `\t` and `\\` in a command-line value.
///
/// Other backslash sequences are kept as written.
pub fn unescape_arg(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn single_char(flag: &str, value: &str) -> Result<char, String> {
    let expanded = unescape_arg(value);
    let mut chars = expanded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("{} must be a single character, got {:?}", flag, value)),
    }
}
