//! Infile module
//!
//! Encodes records of typed fields into the quoted, delimited and escaped
//! text accepted by `LOAD DATA INFILE ... FIELDS ESCAPED BY '\\'`.

pub mod escape;
pub mod field;
pub mod record;
pub mod writer;

pub use escape::{unescape, EscapeTable, Escaping};
pub use field::Field;
pub use record::WriteStats;
pub use writer::{InfileWriter, NULL_MARKER, ZERO_DATETIME};
