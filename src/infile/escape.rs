//! Escape table for quoted text and byte content.
//!
//! Reserved bytes inside a quoted field are replaced by a backslash and a
//! letter. Two tables are available, selected by [`Escaping`]:
//!
//! | Byte        | `Legacy` | `MySql` |
//! |-------------|----------|---------|
//! | `0x00`      | `\0`     | `\0`    |
//! | `\` (0x5C)  | `\b`     | `\\`    |
//! | `0x08`      | as is    | `\b`    |
//! | LF          | `\n`     | `\n`    |
//! | CR          | `\r`     | `\r`    |
//! | TAB         | `\t`     | `\t`    |
//! | `0x1A`      | `\Z`     | `\Z`    |
//! | quote       | as is    | `\` + quote (ASCII quotes only) |
//!
//! `Legacy` is the default and is kept byte-compatible with files produced by
//! earlier writers. Note that under `Legacy` a backslash in the content comes
//! back as `0x08` when the file is read by `LOAD DATA ... ESCAPED BY '\\'`, and
//! an embedded quote character ends the field early. `MySql` produces what
//! `LOAD DATA` expects for both, but changes the bytes written.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::InfileError;

/// Escape byte used to introduce every replacement.
pub const ESCAPE_BYTE: u8 = b'\\';

/// Selects the escape table applied to text and byte fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Escaping {
    /// Backslash is written as `\b` and the quote character is not escaped.
    #[default]
    Legacy,
    /// Backslash is written as `\\`, backspace as `\b` and the quote
    /// character as `\` followed by the quote.
    #[serde(rename = "mysql")]
    MySql,
}

/// A byte to replacement-letter lookup table.
///
/// Entry `b` holds the letter written after the backslash for byte `b`, or
/// `0` when `b` is copied unchanged. No replacement letter is ever `0x00`.
#[derive(Clone)]
pub struct EscapeTable {
    replacements: [u8; 256],
}

impl EscapeTable {
    /// Builds the table for `escaping`. The quote character only matters for
    /// [`Escaping::MySql`], and only when it is ASCII. A quote byte that
    /// already has an entry keeps that entry.
    pub fn new(escaping: Escaping, quote: char) -> Self {
        let mut replacements = [0u8; 256];
        replacements[0x00] = b'0';
        replacements[0x0A] = b'n';
        replacements[0x0D] = b'r';
        replacements[0x09] = b't';
        replacements[0x1A] = b'Z';

        match escaping {
            Escaping::Legacy => {
                replacements[usize::from(ESCAPE_BYTE)] = b'b';
            }
            Escaping::MySql => {
                replacements[usize::from(ESCAPE_BYTE)] = ESCAPE_BYTE;
                replacements[0x08] = b'b';
                if quote.is_ascii() {
                    let q = quote as u8;
                    if replacements[usize::from(q)] == 0 {
                        replacements[usize::from(q)] = q;
                    }
                }
            }
        }

        Self { replacements }
    }

    /// Returns the letter written after the backslash for `byte`, if any.
    #[inline]
    pub fn replacement(&self, byte: u8) -> Option<u8> {
        match self.replacements[usize::from(byte)] {
            0 => None,
            letter => Some(letter),
        }
    }

    /// Writes `content` to `out`, escaping reserved bytes.
    ///
    /// Runs of bytes that need no escaping are written with a single call.
    /// Returns the number of escape sequences written.
    pub fn escape_into<W: Write + ?Sized>(
        &self,
        content: &[u8],
        out: &mut W,
    ) -> io::Result<usize> {
        let mut escaped = 0;
        let mut start = 0;

        for (i, &byte) in content.iter().enumerate() {
            if let Some(letter) = self.replacement(byte) {
                if start < i {
                    out.write_all(&content[start..i])?;
                }
                out.write_all(&[ESCAPE_BYTE, letter])?;
                escaped += 1;
                start = i + 1;
            }
        }

        if start < content.len() {
            out.write_all(&content[start..])?;
        }

        Ok(escaped)
    }

    /// Returns `content` with reserved bytes escaped.
    pub fn escape(&self, content: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(content.len());
        // Writing into a Vec cannot fail
        let _ = self.escape_into(content, &mut out);
        out
    }

    /// Reverses [`EscapeTable::escape`].
    ///
    /// Fails with [`InfileError::InvalidEscape`] on a sequence this table
    /// never produces, including a trailing lone backslash.
    pub fn unescape(&self, content: &[u8]) -> Result<Vec<u8>, InfileError> {
        let mut inverse = [None::<u8>; 256];
        for byte in 0..=255u8 {
            if let Some(letter) = self.replacement(byte) {
                inverse[usize::from(letter)] = Some(byte);
            }
        }

        let mut out = Vec::with_capacity(content.len());
        let mut i = 0;
        while i < content.len() {
            let byte = content[i];
            if byte != ESCAPE_BYTE {
                out.push(byte);
                i += 1;
                continue;
            }

            let original = content
                .get(i + 1)
                .and_then(|&letter| inverse[usize::from(letter)]);
            match original {
                Some(original) => {
                    out.push(original);
                    i += 2;
                }
                None => {
                    let end = (i + 2).min(content.len());
                    return Err(InfileError::InvalidEscape {
                        offset: i,
                        sequence: String::from_utf8_lossy(&content[i..end]).into_owned(),
                    });
                }
            }
        }

        Ok(out)
    }
}

impl Default for EscapeTable {
    fn default() -> Self {
        Self::new(Escaping::Legacy, '"')
    }
}

impl std::fmt::Debug for EscapeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for byte in 0..=255u8 {
            if let Some(letter) = self.replacement(byte) {
                map.entry(&byte, &(letter as char));
            }
        }
        map.finish()
    }
}

/// Reverses the default (`Legacy`, `"`-quoted) escape table.
///
/// # Examples
///
/// ```
/// use infile_writer::infile::unescape;
///
/// assert_eq!(unescape(b"a\\tb\\Z").unwrap(), b"a\tb\x1a");
/// assert_eq!(unescape(b"\\b").unwrap(), b"\\");
/// assert!(unescape(b"oops\\").is_err());
/// ```
pub fn unescape(content: &[u8]) -> Result<Vec<u8>, InfileError> {
    EscapeTable::default().unescape(content)
}
