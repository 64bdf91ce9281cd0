// src/buffer/tests.rs

use std::io::{Cursor, Write};
use std::path::Path;

use test_log::test;

use super::*;

fn rows_as_strings(buffer: &TextBuffer) -> Vec<String> {
    buffer
        .rows()
        .iter()
        .map(|row| String::from_utf8_lossy(row.as_bytes()).into_owned())
        .collect()
}

#[test]
fn from_reader_strips_line_terminators() {
    let buffer = TextBuffer::from_reader(Cursor::new("one\ntwo\r\n\nfour")).unwrap();
    assert_eq!(buffer.num_rows(), 4);
    assert_eq!(rows_as_strings(&buffer), vec!["one", "two", "", "four"]);
}

#[test]
fn trailing_newline_does_not_add_a_row() {
    let buffer = TextBuffer::from_reader(Cursor::new("a\nb\n")).unwrap();
    assert_eq!(rows_as_strings(&buffer), vec!["a", "b"]);
}

#[test]
fn stray_carriage_returns_at_line_end_are_stripped() {
    let buffer = TextBuffer::from_reader(Cursor::new("a\r\r\nb\rc\n")).unwrap();
    assert_eq!(rows_as_strings(&buffer), vec!["a", "b\rc"]);
}

#[test]
fn empty_source_gives_empty_buffer() {
    let buffer = TextBuffer::from_reader(Cursor::new("")).unwrap();
    assert!(buffer.is_empty());
    assert_eq!(buffer.num_rows(), 0);
}

#[test]
fn non_utf8_bytes_are_kept_verbatim() {
    let buffer = TextBuffer::from_reader(Cursor::new(vec![0xff, b'x', 0xc3, b'\n'])).unwrap();
    assert_eq!(buffer.row(0).unwrap().as_bytes(), &[0xff, b'x', 0xc3]);
}

#[test]
fn load_round_trips_lines_from_a_file() {
    let lines = ["first line", "", "  indented", "last"];
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in &lines {
        write!(file, "{}\r\n", line).unwrap();
    }
    file.flush().unwrap();

    let buffer = TextBuffer::load(file.path()).unwrap();
    assert_eq!(buffer.num_rows(), lines.len());
    for (index, line) in lines.iter().enumerate() {
        assert_eq!(buffer.row(index).unwrap().as_bytes(), line.as_bytes());
    }
}

#[test]
fn load_reports_unopenable_source() {
    let missing = Path::new("/nonexistent/rawedit/file.txt");
    match TextBuffer::load(missing) {
        Err(EditorError::SourceUnavailable { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected SourceUnavailable, got {:?}", other),
    }
}

#[test]
fn append_row_keeps_count_and_content_in_step() {
    let mut buffer = TextBuffer::new();
    for (n, text) in ["x", "yy", "zzz"].iter().enumerate() {
        buffer.append_row(text.as_bytes());
        assert_eq!(buffer.num_rows(), n + 1);
        assert_eq!(buffer.row(n).unwrap().as_bytes(), text.as_bytes());
    }
    assert_eq!(buffer.row(3), None);
    assert_eq!(buffer.row_len(2), 3);
    assert_eq!(buffer.row_len(3), 0);
}

#[test]
fn visible_slice_clips_to_offset_and_width() {
    let row = Row::new("hello world");
    assert_eq!(row.visible_slice(0, 5), b"hello");
    assert_eq!(row.visible_slice(6, 80), b"world");
    assert_eq!(row.visible_slice(11, 80), b"");
    assert_eq!(row.visible_slice(40, 80), b"");
    assert_eq!(row.visible_slice(3, 0), b"");
    assert_eq!(row.visible_slice(usize::MAX, usize::MAX), b"");
    assert_eq!(row.visible_slice(1, usize::MAX), b"ello world");
}
