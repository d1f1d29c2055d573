use std::io::{BufWriter, Write};

use serde_json::Value;
use tracing::{debug, warn};

use super::escape::{EscapeTable, Escaping};
use super::field::Field;
use super::record::WriteStats;
use crate::config::WriterConfig;
use crate::error::InfileError;

/// Literal written for a null field, without quotes.
pub const NULL_MARKER: &[u8] = b"\\N";

/// Text written for [`Field::ZeroDateTime`].
pub const ZERO_DATETIME: &str = "0000-00-00 00:00:00";

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writer for flat files loadable with `LOAD DATA INFILE`.
///
/// Each call to [`InfileWriter::write`] appends one record: every field is
/// wrapped in the quote character, fields are separated by the delimiter and
/// the record ends with the line terminator. Null fields are written as a bare
/// `\N`. Text and byte fields go through the [`EscapeTable`] selected by
/// `escaping`; every other kind is written as its canonical text.
///
/// The settings are public fields and take effect on the next write.
///
/// Output is buffered. Call [`InfileWriter::flush`] after the last record;
/// records that were written but not flushed are lost if the writer is
/// leaked, and flush errors on drop are ignored.
///
/// # Example
///
/// ```
/// use infile_writer::{record, InfileWriter};
///
/// let mut out = Vec::new();
/// {
///     let mut writer = InfileWriter::new(&mut out);
///     writer.write(&record!["hallo", 1, true, None::<i32>]).unwrap();
///     writer.flush().unwrap();
/// }
/// assert_eq!(out, b"\"hallo\",\"1\",\"1\",\\N\n");
/// ```
pub struct InfileWriter<W: Write> {
    /// The buffered sink.
    writer: BufWriter<W>,
    /// Field separator.
    pub delimiter: char,
    /// Character wrapped around every non-null field.
    pub quote: char,
    /// Record terminator.
    pub line_end: String,
    /// Escape table applied to text and byte fields.
    pub escaping: Escaping,
    /// Statistics for written records.
    stats: WriteStats,
    /// Set once the embedded-quote warning has been logged.
    quote_warned: bool,
}

impl<W: Write> InfileWriter<W> {
    /// Creates a writer with delimiter `,`, quote `"`, line terminator `\n`
    /// and legacy escaping.
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, &WriterConfig::default())
    }

    /// Creates a writer with the given settings.
    ///
    /// The settings are copied as they are; call [`WriterConfig::validate`]
    /// first if they come from user input.
    pub fn with_config(inner: W, config: &WriterConfig) -> Self {
        Self {
            writer: BufWriter::new(inner),
            delimiter: config.delimiter,
            quote: config.quote,
            line_end: config.line_end.clone(),
            escaping: config.escaping,
            stats: WriteStats::default(),
            quote_warned: false,
        }
    }

    /// Writes one record.
    ///
    /// On an I/O error the rest of the record is abandoned; bytes already
    /// handed to the buffer stay there.
    pub fn write(&mut self, fields: &[Field<'_>]) -> Result<(), InfileError> {
        let table = EscapeTable::new(self.escaping, self.quote);

        for (n, field) in fields.iter().enumerate() {
            if n > 0 {
                self.write_char(self.delimiter)?;
            }
            self.write_field(field, &table)?;
        }

        self.end_record(fields.len())
    }

    /// Writes one record from JSON values.
    ///
    /// Each value is converted just before it is written, so an array or
    /// object fails with [`InfileError::UnsupportedType`] after the fields in
    /// front of it, and its delimiter, are already in the buffer.
    pub fn write_json(&mut self, values: &[Value]) -> Result<(), InfileError> {
        let table = EscapeTable::new(self.escaping, self.quote);

        for (n, value) in values.iter().enumerate() {
            if n > 0 {
                self.write_char(self.delimiter)?;
            }
            let field = Field::try_from(value)?;
            self.write_field(&field, &table)?;
        }

        self.end_record(values.len())
    }

    /// Flushes the buffer into the underlying sink and flushes the sink.
    pub fn flush(&mut self) -> Result<(), InfileError> {
        self.writer.flush()?;
        debug!(
            records = self.stats.total_records,
            fields = self.stats.total_fields,
            "Flushed infile writer"
        );
        Ok(())
    }

    /// Returns a reference to the current write statistics.
    pub fn stats(&self) -> &WriteStats {
        &self.stats
    }

    /// Returns a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Flushes the buffer and returns the underlying sink.
    pub fn into_inner(self) -> Result<W, InfileError> {
        self.writer
            .into_inner()
            .map_err(|e| InfileError::Io(e.into_error()))
    }

    fn write_field(
        &mut self,
        field: &Field<'_>,
        table: &EscapeTable,
    ) -> Result<(), InfileError> {
        if field.is_null() {
            self.writer.write_all(NULL_MARKER)?;
            self.stats.null_fields += 1;
            return Ok(());
        }

        self.write_char(self.quote)?;

        match field {
            Field::Null => {}
            Field::Bool(b) => self.writer.write_all(if *b { b"1" } else { b"0" })?,
            Field::Int(n) => write!(self.writer, "{n}")?,
            Field::UInt(n) => write!(self.writer, "{n}")?,
            Field::I128(n) => write!(self.writer, "{n}")?,
            Field::U128(n) => write!(self.writer, "{n}")?,
            // Display is the shortest round-trip form and never uses an exponent
            Field::F32(x) => match infinity_text(f64::from(*x)) {
                Some(text) => self.writer.write_all(text)?,
                None => write!(self.writer, "{x}")?,
            },
            Field::F64(x) => match infinity_text(*x) {
                Some(text) => self.writer.write_all(text)?,
                None => write!(self.writer, "{x}")?,
            },
            Field::Text(s) => {
                self.check_embedded_quote(s.as_bytes());
                self.stats.escape_sequences +=
                    table.escape_into(s.as_bytes(), &mut self.writer)?;
            }
            Field::Bytes(b) => {
                self.check_embedded_quote(b);
                self.stats.escape_sequences += table.escape_into(b, &mut self.writer)?;
            }
            Field::DateTime(dt) => write!(self.writer, "{}", dt.format(DATETIME_FORMAT))?,
            Field::ZeroDateTime => self.writer.write_all(ZERO_DATETIME.as_bytes())?,
        }

        self.write_char(self.quote)?;
        Ok(())
    }

    fn end_record(&mut self, field_count: usize) -> Result<(), InfileError> {
        self.writer.write_all(self.line_end.as_bytes())?;
        self.stats.total_records += 1;
        self.stats.total_fields += field_count;
        Ok(())
    }

    fn write_char(&mut self, c: char) -> Result<(), InfileError> {
        let mut buf = [0u8; 4];
        self.writer.write_all(c.encode_utf8(&mut buf).as_bytes())?;
        Ok(())
    }

    /// Legacy escaping leaves the quote character as is, which ends the field
    /// early for any reader. Logged once per writer.
    fn check_embedded_quote(&mut self, content: &[u8]) {
        if self.quote_warned || self.escaping != Escaping::Legacy {
            return;
        }
        let mut buf = [0u8; 4];
        let quote = self.quote.encode_utf8(&mut buf).as_bytes();
        if content.windows(quote.len()).any(|w| w == quote) {
            warn!(
                quote = %self.quote,
                record = self.stats.total_records + 1,
                "Field content contains the quote character; output will not parse back. \
                 Use mysql escaping to escape it"
            );
            self.quote_warned = true;
        }
    }
}

impl<W: Write + std::fmt::Debug> std::fmt::Debug for InfileWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfileWriter")
            .field("writer", &self.writer)
            .field("delimiter", &self.delimiter)
            .field("quote", &self.quote)
            .field("line_end", &self.line_end)
            .field("escaping", &self.escaping)
            .field("stats", &self.stats)
            .finish()
    }
}

fn infinity_text(x: f64) -> Option<&'static [u8]> {
    if x == f64::INFINITY {
        Some(b"+Inf")
    } else if x == f64::NEG_INFINITY {
        Some(b"-Inf")
    } else {
        None
    }
}
