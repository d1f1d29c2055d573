//! Integration tests for file-backed writing and conversion.

mod convert_test;
mod writer_test;
