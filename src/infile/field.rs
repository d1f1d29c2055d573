//! Typed field values.
//!
//! A [`Field`] is one column of a record. The set of kinds is closed: every
//! value that reaches the writer has exactly one text rendering, and anything
//! else is rejected before a byte of it is written.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde_json::Value;

use crate::error::InfileError;

/// A single field value of a record.
///
/// Scalars, strings, byte slices and date/times convert into `Field` through
/// `From`, so a record can be built straight from Rust values with the
/// [`record!`](crate::record) macro. `Option<T>` converts to [`Field::Null`]
/// when it is `None` and to `T`'s field otherwise.
///
/// # Example
///
/// ```
/// use infile_writer::Field;
///
/// assert_eq!(Field::from(42u16), Field::UInt(42));
/// assert_eq!(Field::from(None::<&str>), Field::Null);
/// assert_eq!(Field::from(Some("x")), Field::Text("x".into()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Field<'a> {
    /// SQL `NULL`, written as a bare `\N`.
    Null,
    /// Written as `1` or `0`.
    Bool(bool),
    /// Any signed integer up to 64 bits.
    Int(i64),
    /// Any unsigned integer up to 64 bits.
    UInt(u64),
    /// 128-bit signed integer, written in decimal.
    I128(i128),
    /// 128-bit unsigned integer, written in decimal.
    U128(u128),
    /// Written as the shortest decimal that reads back as the same `f32`, so
    /// `0.1f32` is `0.1` rather than the digits of its `f64` widening.
    F32(f32),
    /// Written as the shortest decimal that reads back as the same `f64`,
    /// never with an exponent. Infinities are written as `+Inf`/`-Inf` and
    /// NaN as `NaN`; `LOAD DATA` reads none of them as a number.
    F64(f64),
    /// Text, escaped byte by byte.
    Text(Cow<'a, str>),
    /// Raw bytes, escaped byte by byte.
    Bytes(Cow<'a, [u8]>),
    /// Written as `YYYY-MM-DD HH:MM:SS`.
    DateTime(NaiveDateTime),
    /// The date/time with no calendar date set, written as
    /// `0000-00-00 00:00:00`.
    ZeroDateTime,
}

impl Field<'_> {
    /// Returns the lowercase kind name of this field.
    pub fn kind(&self) -> &'static str {
        match self {
            Field::Null => "null",
            Field::Bool(_) => "bool",
            Field::Int(_) | Field::I128(_) => "int",
            Field::UInt(_) | Field::U128(_) => "uint",
            Field::F32(_) | Field::F64(_) => "float",
            Field::Text(_) => "text",
            Field::Bytes(_) => "bytes",
            Field::DateTime(_) | Field::ZeroDateTime => "datetime",
        }
    }

    /// Returns true for [`Field::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    /// Converts borrowed content into owned content.
    pub fn into_owned(self) -> Field<'static> {
        match self {
            Field::Null => Field::Null,
            Field::Bool(b) => Field::Bool(b),
            Field::Int(n) => Field::Int(n),
            Field::UInt(n) => Field::UInt(n),
            Field::I128(n) => Field::I128(n),
            Field::U128(n) => Field::U128(n),
            Field::F32(x) => Field::F32(x),
            Field::F64(x) => Field::F64(x),
            Field::Text(s) => Field::Text(Cow::Owned(s.into_owned())),
            Field::Bytes(b) => Field::Bytes(Cow::Owned(b.into_owned())),
            Field::DateTime(dt) => Field::DateTime(dt),
            Field::ZeroDateTime => Field::ZeroDateTime,
        }
    }
}

macro_rules! impl_from_scalar {
    ($variant:ident, $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Field<'_> {
                fn from(value: $source) -> Self {
                    Field::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_from_scalar!(Bool, bool: bool);
impl_from_scalar!(Int, i64: i8, i16, i32, i64);
impl_from_scalar!(UInt, u64: u8, u16, u32, u64);
impl_from_scalar!(I128, i128: i128);
impl_from_scalar!(U128, u128: u128);
impl_from_scalar!(F32, f32: f32);
impl_from_scalar!(F64, f64: f64);

impl From<isize> for Field<'_> {
    fn from(value: isize) -> Self {
        // isize is at most 64 bits on every supported target
        Field::Int(value as i64)
    }
}

impl From<usize> for Field<'_> {
    fn from(value: usize) -> Self {
        Field::UInt(value as u64)
    }
}

impl<'a> From<&'a str> for Field<'a> {
    fn from(value: &'a str) -> Self {
        Field::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for Field<'a> {
    fn from(value: &'a String) -> Self {
        Field::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for Field<'_> {
    fn from(value: String) -> Self {
        Field::Text(Cow::Owned(value))
    }
}

impl<'a> From<&'a [u8]> for Field<'a> {
    fn from(value: &'a [u8]) -> Self {
        Field::Bytes(Cow::Borrowed(value))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Field<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        Field::Bytes(Cow::Borrowed(value.as_slice()))
    }
}

impl From<Vec<u8>> for Field<'_> {
    fn from(value: Vec<u8>) -> Self {
        Field::Bytes(Cow::Owned(value))
    }
}

impl From<NaiveDateTime> for Field<'_> {
    fn from(value: NaiveDateTime) -> Self {
        Field::DateTime(value)
    }
}

/// Zoned instants are written in their own offset, not converted to UTC.
impl<Tz: TimeZone> From<DateTime<Tz>> for Field<'_> {
    fn from(value: DateTime<Tz>) -> Self {
        Field::DateTime(value.naive_local())
    }
}

impl<'a, T> From<Option<T>> for Field<'a>
where
    T: Into<Field<'a>>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Field::Null,
        }
    }
}

impl<'a> TryFrom<&'a Value> for Field<'a> {
    type Error = InfileError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Field::Null),
            Value::Bool(b) => Ok(Field::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Field::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Field::UInt(u))
                } else {
                    // Numbers outside the integer ranges always fit an f64
                    Ok(Field::F64(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(s) => Ok(Field::Text(Cow::Borrowed(s.as_str()))),
            Value::Array(_) => Err(InfileError::UnsupportedType { kind: "array" }),
            Value::Object(_) => Err(InfileError::UnsupportedType { kind: "object" }),
        }
    }
}

/// Builds a record (an array of [`Field`]s) from heterogeneous values.
///
/// Every expression is converted with `Field::from`, so anything with a
/// `From` impl can be mixed freely.
///
/// ```
/// use infile_writer::{record, Field};
///
/// let row = record![1, "two", 3.5, None::<u8>];
/// assert_eq!(row.len(), 4);
/// assert_eq!(row[3], Field::Null);
/// ```
#[macro_export]
macro_rules! record {
    () => {{
        let empty: [$crate::Field<'static>; 0] = [];
        empty
    }};
    ($($value:expr),+ $(,)?) => {
        [$($crate::Field::from($value)),+]
    };
}
