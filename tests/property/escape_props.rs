//! Property tests for the escape table.

use infile_writer::infile::{EscapeTable, Escaping};
use proptest::prelude::*;

/// Bytes the legacy table always replaces.
const RESERVED: [u8; 5] = [0x00, b'\n', b'\r', b'\t', 0x1A];

fn escaping_strategy() -> impl Strategy<Value = Escaping> {
    prop_oneof![Just(Escaping::Legacy), Just(Escaping::MySql)]
}

/// Content built mostly from bytes that have an escape sequence.
fn reserved_heavy_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            Just(0x00u8),
            Just(b'\\'),
            Just(b'\n'),
            Just(b'\r'),
            Just(b'\t'),
            Just(0x1Au8),
            Just(0x08u8),
            Just(b'"'),
            any::<u8>(),
        ],
        0..128,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Unescaping with the inverse table recovers any byte sequence
    #[test]
    fn escape_then_unescape_is_identity(
        escaping in escaping_strategy(),
        bytes in reserved_heavy_strategy()
    ) {
        let table = EscapeTable::new(escaping, '"');
        let escaped = table.escape(&bytes);
        let restored = table.unescape(&escaped).expect("escaped output should unescape");
        prop_assert_eq!(restored, bytes);
    }

    // Escaped content never carries a raw control byte from the table
    #[test]
    fn escaped_output_has_no_raw_reserved_bytes(
        escaping in escaping_strategy(),
        bytes in reserved_heavy_strategy()
    ) {
        let table = EscapeTable::new(escaping, '"');
        let escaped = table.escape(&bytes);
        for reserved in RESERVED {
            prop_assert!(!escaped.contains(&reserved));
        }
    }

    // Every escape adds exactly one byte
    #[test]
    fn escaped_length_matches_sequence_count(
        escaping in escaping_strategy(),
        bytes in reserved_heavy_strategy()
    ) {
        let table = EscapeTable::new(escaping, '"');
        let mut out = Vec::new();
        let count = table.escape_into(&bytes, &mut out).expect("vec write");
        prop_assert_eq!(out.len(), bytes.len() + count);
    }

    // Content without reserved bytes is copied unchanged
    #[test]
    fn plain_content_is_copied(text in "[a-zA-Z0-9 ,;:'.-]{0,64}") {
        let table = EscapeTable::new(Escaping::Legacy, '"');
        prop_assert_eq!(table.escape(text.as_bytes()), text.as_bytes().to_vec());
    }
}
