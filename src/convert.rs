//! JSON-lines conversion module
//!
//! Reads records as newline-delimited JSON arrays and writes them through an
//! [`InfileWriter`]. Each array is one record; its elements are the fields.
//!
//! ```text
//! [1, "alice", null, true]
//! [2, "bob\tsmith", 3.5, false]
//! ```
//!
//! Blank lines are skipped. Any other line that is not a JSON array, or an
//! array holding a nested array or object, stops the conversion with the
//! line number attached.

use std::io::{BufRead, Write};

use serde_json::Value;
use tracing::{debug, info};

use crate::error::InfileError;
use crate::infile::InfileWriter;

/// Outcome of a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Input lines read, blank ones included.
    pub lines_read: usize,
    /// Records written.
    pub records_written: usize,
    /// Blank lines skipped.
    pub blank_lines: usize,
}

/// Converts every JSON-array line of `input` into a record of `writer`.
///
/// The writer is flushed once at the end. On error nothing is flushed by this
/// function, so a caller writing to a file should treat the file as invalid.
pub fn convert<R, W>(
    input: R,
    writer: &mut InfileWriter<W>,
) -> Result<ConvertSummary, InfileError>
where
    R: BufRead,
    W: Write,
{
    let mut summary = ConvertSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| InfileError::from(e).at_line(line_no))?;
        summary.lines_read += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            summary.blank_lines += 1;
            continue;
        }

        let value: Value =
            serde_json::from_str(trimmed).map_err(|e| InfileError::from(e).at_line(line_no))?;
        let fields = match value {
            Value::Array(fields) => fields,
            other => {
                return Err(InfileError::UnsupportedType {
                    kind: json_kind(&other),
                }
                .at_line(line_no));
            }
        };

        writer.write_json(&fields).map_err(|e| e.at_line(line_no))?;
        summary.records_written += 1;

        if summary.records_written % 100_000 == 0 {
            debug!(records = summary.records_written, "Conversion progress");
        }
    }

    writer.flush()?;

    info!(
        lines = summary.lines_read,
        records = summary.records_written,
        nulls = writer.stats().null_fields,
        "Conversion complete"
    );

    Ok(summary)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
