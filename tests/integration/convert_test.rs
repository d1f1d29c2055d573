//! Converting JSON-lines files.

use std::fs::{self, File};
use std::io::{BufReader, Write};

use clap::Parser;
use infile_writer::cli::Args;
use infile_writer::convert::convert;
use infile_writer::{InfileError, InfileWriter};
use tempfile::tempdir;

#[test]
fn test_convert_file_to_file() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("rows.jsonl");
    let output_path = temp_dir.path().join("rows.txt");

    {
        let mut input = File::create(&input_path).unwrap();
        writeln!(input, r#"[1, "Zürich", null, 47.37]"#).unwrap();
        writeln!(input).unwrap();
        writeln!(input, r#"[2, "line\nbreak", -1, false]"#).unwrap();
    }

    let summary = {
        let input = BufReader::new(File::open(&input_path).unwrap());
        let mut writer = InfileWriter::new(File::create(&output_path).unwrap());
        convert(input, &mut writer).unwrap()
    };

    assert_eq!(summary.lines_read, 3);
    assert_eq!(summary.blank_lines, 1);
    assert_eq!(summary.records_written, 2);
    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        "\"1\",\"Zürich\",\\N,\"47.37\"\n\"2\",\"line\\nbreak\",\"-1\",\"0\"\n"
    );
}

#[test]
fn test_convert_with_cli_settings() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("writer.json");
    fs::write(&config_path, r#"{"delimiter": "|", "escaping": "mysql"}"#).unwrap();

    let args = Args::parse_from([
        "infile-writer",
        "--config",
        config_path.to_str().unwrap(),
        "--line-end",
        "\\r\\n",
    ]);
    args.validate().unwrap();
    let config = args.writer_config().unwrap();

    let mut writer = InfileWriter::with_config(Vec::new(), &config);
    convert(&b"[\"a\\\\b\", 1]\n"[..], &mut writer).unwrap();
    assert_eq!(writer.get_ref().as_slice(), b"\"a\\\\b\"|\"1\"\r\n");
}

#[test]
fn test_convert_stops_at_first_bad_line() {
    let input = "[1]\n[2]\n[[3]]\n[4]\n";
    let mut writer = InfileWriter::new(Vec::new());
    let err = convert(input.as_bytes(), &mut writer).unwrap_err();

    assert!(matches!(err, InfileError::Record { line: 3, .. }));
    assert_eq!(writer.stats().total_records, 2);
}
