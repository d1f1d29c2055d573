//! Writing records to files.

use std::fs::{self, File};

use chrono::{NaiveDate, TimeZone, Utc};
use infile_writer::{record, Escaping, Field, InfileError, InfileWriter, WriterConfig};
use tempfile::tempdir;

#[test]
fn test_file_contains_flushed_records() {
    let temp_dir = tempdir().unwrap();
    let file_path = temp_dir.path().join("users.txt");

    {
        let file = File::create(&file_path).unwrap();
        let mut writer = InfileWriter::new(file);
        writer
            .write(&record![1u32, "alice", Some(30u8), true])
            .unwrap();
        writer
            .write(&record![2u32, "bob", None::<u8>, false])
            .unwrap();
        writer.flush().unwrap();
    }

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(
        content,
        "\"1\",\"alice\",\"30\",\"1\"\n\"2\",\"bob\",\\N,\"0\"\n"
    );
}

#[test]
fn test_scalar_and_null_records() {
    let mut writer = InfileWriter::new(Vec::new());
    writer.write(&record![1, 2i8, 3i16, 4i32, 5i64]).unwrap();
    writer.write(&record![true, false]).unwrap();
    writer.write(&[Field::Null]).unwrap();
    writer.write(&[Field::ZeroDateTime]).unwrap();
    let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();

    assert_eq!(
        out,
        concat!(
            "\"1\",\"2\",\"3\",\"4\",\"5\"\n",
            "\"1\",\"0\"\n",
            "\\N\n",
            "\"0000-00-00 00:00:00\"\n",
        )
    );
}

#[test]
fn test_tab_separated_crlf_file() {
    let temp_dir = tempdir().unwrap();
    let file_path = temp_dir.path().join("events.tsv");

    let config = WriterConfig {
        delimiter: '\t',
        quote: '\'',
        line_end: "\r\n".to_string(),
        escaping: Escaping::MySql,
    };
    config.validate().unwrap();

    let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();

    {
        let file = File::create(&file_path).unwrap();
        let mut writer = InfileWriter::with_config(file, &config);
        writer.write(&record![at, "o'clock", b"\x00\x1a"]).unwrap();
        writer.write(&record![day, None::<&str>, 0.25f32]).unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.stats().total_records, 2);
    }

    let content = fs::read(&file_path).unwrap();
    assert_eq!(
        content,
        b"'2024-01-15 10:30:00'\t'o\\'clock'\t'\\0\\Z'\r\n'2024-02-29 23:59:59'\t\\N\t'0.25'\r\n"
    );
}

#[test]
fn test_into_inner_returns_file_with_all_bytes() {
    let temp_dir = tempdir().unwrap();
    let file_path = temp_dir.path().join("inner.txt");

    let file = File::create(&file_path).unwrap();
    let mut writer = InfileWriter::new(file);
    writer.write(&record!["x"]).unwrap();
    let file = writer.into_inner().unwrap();
    drop(file);

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "\"x\"\n");
}

#[test]
fn test_unsupported_json_value_leaves_partial_record() {
    let mut writer = InfileWriter::new(Vec::new());
    writer.write(&record!["ok"]).unwrap();
    let values: Vec<serde_json::Value> =
        serde_json::from_str(r#"[1, "two", {"three": 3}]"#).unwrap();
    let err = writer.write_json(&values).unwrap_err();
    assert!(matches!(err, InfileError::UnsupportedType { kind: "object" }));

    let out = writer.into_inner().unwrap();
    assert_eq!(out, b"\"ok\"\n\"1\",\"two\",");
}
