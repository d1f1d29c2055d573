//! Error module
//!
//! Defines the error type shared by the writer, the configuration loader and
//! the conversion driver, using `thiserror`.

use thiserror::Error;

/// The main error type for infile writing.
///
/// # Error Categories
///
/// - **Data errors**: a field whose kind has no flat-file rendering, or a
///   malformed escape sequence handed to [`crate::infile::unescape`]
/// - **I/O errors**: the sink (or the conversion input) rejected an operation
/// - **Configuration errors**: invalid delimiter/quote/terminator settings or
///   an unreadable configuration file
///
/// None of these are retried internally. A failure in the middle of a record
/// leaves whatever bytes were already written in the sink.
///
/// # Example
///
/// ```rust
/// use infile_writer::{record, InfileWriter, InfileError};
///
/// fn dump(out: &mut Vec<u8>) -> Result<(), InfileError> {
///     let mut writer = InfileWriter::new(out);
///     writer.write(&record![1, "one", None::<i32>])?;
///     writer.flush()?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum InfileError {
    /// A field value has no defined text conversion.
    ///
    /// Raised for composite values (JSON arrays and objects) reaching the
    /// writer through [`crate::InfileWriter::write_json`] or
    /// `Field::try_from(&serde_json::Value)`.
    #[error("unsupported field type: {kind}")]
    UnsupportedType {
        /// Kind name of the rejected value, e.g. `"array"`.
        kind: &'static str,
    },

    /// The sink or the input stream failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error, for configuration files and JSON-lines input.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// An escape sequence that the escape table never produces.
    #[error("invalid escape sequence {sequence:?} at byte {offset}")]
    InvalidEscape {
        /// Byte offset of the backslash starting the sequence.
        offset: usize,
        /// The offending sequence, lossily decoded.
        sequence: String,
    },

    /// Writer settings that cannot produce a parseable file.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A record of the conversion input could not be written.
    ///
    /// Boxed so that `Result<_, InfileError>` stays small.
    #[error("line {line}: {source}")]
    Record {
        /// 1-based input line number.
        line: usize,
        #[source]
        source: Box<InfileError>,
    },
}

impl InfileError {
    /// Attaches an input line number to an error.
    pub(crate) fn at_line(self, line: usize) -> Self {
        InfileError::Record {
            line,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through [`InfileError::Record`].
    pub fn root(&self) -> &InfileError {
        match self {
            InfileError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}
