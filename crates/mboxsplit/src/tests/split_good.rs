use rstest::rstest;

use crate::tests::{collect_records, init_logging, mbox_file};
use crate::{MboxReader, encoding_rs};

const START: &str = r"^START .*$";

#[rstest]
#[case::trailing_newline(
    b"START id1\nbody one\nSTART id2\nbody two\n".as_slice(),
    &["body one\n", "body two\n"]
)]
#[case::no_trailing_newline(
    b"START id1\nbody one\nSTART id2\nbody two".as_slice(),
    &["body one\n", "body two"]
)]
#[case::empty_final_record(
    b"START id1\nbody one\nSTART id2\n".as_slice(),
    &["body one\n", ""]
)]
#[case::single_marker_no_body(b"START id1\n".as_slice(), &[""])]
#[case::marker_without_newline_at_eof(b"START id1".as_slice(), &[""])]
#[case::preamble_is_skipped(
    b"not part of any record\nSTART id1\nbody\n".as_slice(),
    &["body\n"]
)]
fn splits_at_markers(#[case] content: &[u8], #[case] expected: &[&str]) {
    init_logging();
    let file = mbox_file(content);
    let reader = MboxReader::from_path(file.path())
        .marker(START)
        .open()
        .expect("open");
    assert_eq!(collect_records(reader), expected);
}

#[test]
fn default_from_line_pattern() {
    let content = b"From alice@example.com Thu Jan  1 00:00:00 2026\n\
                    From: alice@example.com\n\
                    Subject: hello\n\
                    \n\
                    Hi Bob!\n\
                    From bob@example.com Thu Jan  1 00:05:00 2026\n\
                    From: bob@example.com\n\
                    Subject: re: hello\n\
                    \n\
                    Hi Alice!\n";
    let file = mbox_file(content);
    let reader = MboxReader::from_path(file.path()).open().expect("open");
    let records = collect_records(reader);
    assert_eq!(records.len(), 2);
    // `From:` headers are not From_ lines; they stay inside the record.
    assert!(records[0].starts_with("From: alice@example.com\n"));
    assert!(records[0].ends_with("Hi Bob!\n"));
    assert!(records[1].starts_with("From: bob@example.com\n"));
    assert!(records[1].ends_with("Hi Alice!\n"));
}

#[test]
fn has_next_is_an_idempotent_probe() {
    let file = mbox_file(b"START a\none\nSTART b\ntwo\n");
    let mut reader = MboxReader::from_path(file.path())
        .marker(START)
        .open()
        .expect("open");

    assert!(reader.has_next());
    assert!(reader.has_next());
    assert!(reader.has_next());

    let first = reader.next_record().expect("split").expect("record");
    assert_eq!(first.as_str(), "one\n");
    assert!(reader.has_next());

    let second = reader.next_record().expect("split").expect("record");
    assert_eq!(second.as_str(), "two\n");
    assert!(!reader.has_next());
    assert!(reader.next_record().expect("split").is_none());
    assert!(!reader.has_next());
}

#[test]
fn record_view_derefs_to_str() {
    let file = mbox_file(b"START a\nbody text\n");
    let mut reader = MboxReader::from_path(file.path())
        .marker(START)
        .open()
        .expect("open");
    let record = reader.next_record().expect("split").expect("record");
    assert_eq!(&*record, "body text\n");
    assert_eq!(record.len(), 10);
    assert!(!record.is_empty());
    assert_eq!(record.to_string(), "body text\n");
}

#[test]
fn owned_records_iterator() {
    let file = mbox_file(b"START a\none\nSTART b\ntwo\n");
    let reader = MboxReader::from_path(file.path())
        .marker(START)
        .open()
        .expect("open");
    let records: Result<Vec<String>, _> = reader.into_records().collect();
    assert_eq!(records.expect("split"), ["one\n", "two\n"]);
}

#[test]
fn windows_1252_encoding() {
    let file = mbox_file(b"START a\ncaf\xE9 au lait\n");
    let mut reader = MboxReader::from_path(file.path())
        .marker(START)
        .encoding(encoding_rs::WINDOWS_1252)
        .open()
        .expect("open");
    let record = reader.next_record().expect("split").expect("record");
    assert_eq!(record.as_str(), "café au lait\n");
}

#[test]
fn close_is_idempotent() {
    let file = mbox_file(b"START a\nbody\n");
    let mut reader = MboxReader::from_path(file.path())
        .marker(START)
        .open()
        .expect("open");
    reader.close();
    reader.close();
}
