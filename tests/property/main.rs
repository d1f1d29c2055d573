//! Property-based tests for record encoding.

mod escape_props;
