use thiserror::Error;

/// Errors raised while opening or splitting an mbox archive.
///
/// Construction-time failures (`Io`, `Pattern`, `NoMarkers`) surface from
/// [`MboxReaderBuilder::open`]; decode failures surface from
/// [`MboxReader::next_record`] and are fatal to the remaining sequence,
/// since record offsets past a bad byte cannot be trusted.
///
/// [`MboxReaderBuilder::open`]: crate::MboxReaderBuilder::open
/// [`MboxReader::next_record`]: crate::MboxReader::next_record
#[derive(Debug, Error)]
pub enum SplitError {
    /// The file could not be opened or mapped.
    #[error("failed to open mbox: {0}")]
    Io(#[from] std::io::Error),

    /// The marker pattern failed to compile.
    #[error("invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The content contains no marker line anywhere. The file may be
    /// well-formed text that simply is not an mbox archive.
    #[error("no marker lines found; input is not a valid mbox archive")]
    NoMarkers,

    /// A byte sequence could not be decoded under the configured encoding.
    /// Never skipped: silently dropping bytes would corrupt every record
    /// boundary after this point.
    #[error("malformed {encoding} byte sequence at byte offset {offset}")]
    Malformed {
        /// Name of the encoding that rejected the input.
        encoding: &'static str,
        /// Absolute file offset of the first byte of the bad sequence.
        offset: usize,
    },

    /// A single record outgrew the chunk buffer, so its closing marker can
    /// never be observed. Raise `max_record_size` to split this file.
    #[error(
        "record starting near byte offset {offset} exceeds the maximum record size of {max_record_size} bytes"
    )]
    RecordOverflow {
        /// Approximate file offset where the oversized record starts.
        offset: usize,
        /// The configured maximum record size.
        max_record_size: usize,
    },
}
