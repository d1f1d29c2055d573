//! Writer configuration module
//!
//! Holds the settings of an [`InfileWriter`](crate::InfileWriter) and loads
//! them from a JSON file.
//!
//! # File Format
//!
//! All keys are optional; missing keys keep their defaults.
//!
//! ```json
//! {
//!     "delimiter": "\t",
//!     "quote": "'",
//!     "line_end": "\r\n",
//!     "escaping": "mysql"
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InfileError;
use crate::infile::escape::{Escaping, ESCAPE_BYTE};

/// Settings for an [`InfileWriter`](crate::InfileWriter).
///
/// The defaults match what `LOAD DATA INFILE` expects with
/// `FIELDS TERMINATED BY ',' ENCLOSED BY '"' LINES TERMINATED BY '\n'`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    /// Field separator.
    pub delimiter: char,
    /// Character wrapped around every non-null field.
    pub quote: char,
    /// Record terminator.
    pub line_end: String,
    /// Escape table for text and byte fields.
    pub escaping: Escaping,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            line_end: "\n".to_string(),
            escaping: Escaping::Legacy,
        }
    }
}

impl WriterConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// The result is not validated; call [`WriterConfig::validate`] after any
    /// overrides are applied.
    pub fn from_json_file(path: &Path) -> Result<Self, InfileError> {
        let file = File::open(path)?;
        let config: WriterConfig = serde_json::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), ?config, "Loaded writer configuration");
        Ok(config)
    }

    /// Checks that the settings produce a file that can be split back into
    /// records and fields.
    ///
    /// Rejected combinations:
    /// - delimiter equal to the quote character
    /// - a backslash as delimiter or quote
    /// - an empty line terminator, or one containing the delimiter or quote
    /// - `mysql` escaping with a non-ASCII quote character, which cannot be
    ///   escaped byte-wise, an alphanumeric one, which collides with the
    ///   escape letters, or a control character, which has its own escape
    pub fn validate(&self) -> Result<(), InfileError> {
        let escape = char::from(ESCAPE_BYTE);

        if self.delimiter == self.quote {
            return Err(InfileError::InvalidConfig(format!(
                "delimiter and quote are both {:?}",
                self.delimiter
            )));
        }

        if self.delimiter == escape || self.quote == escape {
            return Err(InfileError::InvalidConfig(
                "backslash is reserved for escape sequences".to_string(),
            ));
        }

        if self.line_end.is_empty() {
            return Err(InfileError::InvalidConfig(
                "line terminator must not be empty".to_string(),
            ));
        }

        if self.line_end.contains(self.delimiter) || self.line_end.contains(self.quote) {
            return Err(InfileError::InvalidConfig(format!(
                "line terminator {:?} contains the delimiter or quote",
                self.line_end
            )));
        }

        if self.escaping == Escaping::MySql && !self.quote.is_ascii() {
            return Err(InfileError::InvalidConfig(format!(
                "mysql escaping needs an ASCII quote character, got {:?}",
                self.quote
            )));
        }

        if self.escaping == Escaping::MySql
            && (self.quote.is_ascii_alphanumeric() || self.quote.is_ascii_control())
        {
            return Err(InfileError::InvalidConfig(format!(
                "mysql escaping cannot escape the quote character {:?}",
                self.quote
            )));
        }

        Ok(())
    }
}
