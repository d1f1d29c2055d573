//! Infile Writer Library
//!
//! Writes records of typed fields as quoted, delimited and escaped text for
//! bulk loading with `LOAD DATA INFILE`.
//!
//! # Example
//!
//! ```
//! use infile_writer::{record, InfileWriter};
//!
//! let mut out = Vec::new();
//! {
//!     let mut writer = InfileWriter::new(&mut out);
//!     writer.write(&record![1, "alice", None::<&str>]).unwrap();
//!     writer.write(&record![2, "bob\tsmith", 3.5]).unwrap();
//!     writer.flush().unwrap();
//! }
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "\"1\",\"alice\",\\N\n\"2\",\"bob\\tsmith\",\"3.5\"\n"
//! );
//! ```

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod infile;

pub use config::WriterConfig;
pub use error::InfileError;
pub use infile::{Escaping, Field, InfileWriter, WriteStats};
