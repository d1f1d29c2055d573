//! Per-writer statistics.

use serde::Serialize;

/// Statistics for records written by an [`InfileWriter`](super::InfileWriter).
///
/// Only complete records are counted in `total_records` and `total_fields`;
/// a record abandoned because of an error does not show up there, although
/// its null fields and escape sequences written so far do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteStats {
    /// Number of records terminated with the line terminator.
    pub total_records: usize,
    /// Number of fields in those records.
    pub total_fields: usize,
    /// Number of fields written as `\N`.
    pub null_fields: usize,
    /// Number of escape sequences written into text and byte fields.
    pub escape_sequences: usize,
}
