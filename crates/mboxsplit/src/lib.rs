//! A streaming, zero-copy splitter for mbox-style archives.
//!
//! An mbox file is a single large text file holding many concatenated
//! records, each introduced by a marker line (classically a line beginning
//! with `From `). This crate memory-maps the file, decodes it incrementally
//! in bounded-size chunks, and yields each record as a borrowed view into a
//! single reusable buffer: the whole file is never held in memory as
//! decoded text, and record bytes are copied at most once (during chunk
//! carry-over).
//!
//! The core type is [`MboxReader`], built with a fluent builder:
//!
//! ```no_run
//! use mboxsplit::MboxReader;
//!
//! let mut reader = MboxReader::from_path("inbox.mbox").open()?;
//! while let Some(record) = reader.next_record()? {
//!     println!("{} bytes", record.len());
//! }
//! # Ok::<(), mboxsplit::SplitError>(())
//! ```
//!
//! [`MboxReader::next_record`] lends a [`Record`] tied to the reader's
//! internal buffer; the borrow checker guarantees each view is consumed
//! before the next call can refill the buffer beneath it. Callers that want
//! plain `Iterator` ergonomics and can afford one copy per record can use
//! [`MboxReader::into_records`] instead.

mod chunk;
mod decoder;
mod error;
mod matcher;
mod options;
mod reader;
mod source;

#[cfg(test)]
mod tests;

pub use encoding_rs;
pub use error::SplitError;
pub use options::{DEFAULT_MARKER_PATTERN, DEFAULT_MAX_RECORD_SIZE, MatchFlags, SplitterOptions};
pub use reader::{MboxReader, MboxReaderBuilder, Record, Records};
