mod property_roundtrip;
mod split_good;

use std::io::Write;

use tempfile::NamedTempFile;

use crate::MboxReader;

pub(crate) fn mbox_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp mbox");
    file.write_all(content).expect("write temp mbox");
    file.flush().expect("flush temp mbox");
    file
}

pub(crate) fn collect_records(mut reader: MboxReader) -> Vec<String> {
    let mut records = Vec::new();
    while let Some(record) = reader.next_record().expect("splitting should succeed") {
        records.push(record.as_str().to_owned());
    }
    records
}

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
