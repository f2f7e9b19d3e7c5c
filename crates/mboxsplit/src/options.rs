use encoding_rs::{Encoding, UTF_8};
use regex::{Regex, RegexBuilder};

use crate::error::SplitError;

/// Default marker pattern: the classic mbox `From_` line.
///
/// Matches lines of the shape `From sender@host ...`, anchored to a true
/// line start when [`MatchFlags::multi_line`] is enabled (the default).
pub const DEFAULT_MARKER_PATTERN: &str = r"^From \S+.*$";

/// Default maximum record size: 10 MiB of decoded text.
pub const DEFAULT_MAX_RECORD_SIZE: usize = 10 * 1024 * 1024;

/// Flags applied when compiling the marker pattern.
///
/// # Default
///
/// Only `multi_line` is enabled.
#[derive(Debug, Clone, Copy)]
pub struct MatchFlags {
    /// Whether `^` and `$` match at line boundaries rather than only at the
    /// boundaries of the text.
    ///
    /// Marker patterns rely on this to anchor to true line starts; without
    /// it, marker-like text inside a record body could produce a false
    /// boundary.
    ///
    /// # Default
    ///
    /// `true`
    pub multi_line: bool,

    /// Whether the marker pattern matches case-insensitively.
    ///
    /// # Default
    ///
    /// `false`
    pub case_insensitive: bool,

    /// Whether `.` in the marker pattern also matches `\n`.
    ///
    /// # Default
    ///
    /// `false`
    pub dot_matches_new_line: bool,
}

impl Default for MatchFlags {
    fn default() -> Self {
        Self {
            multi_line: true,
            case_insensitive: false,
            dot_matches_new_line: false,
        }
    }
}

/// Configuration for an [`MboxReader`], validated once at construction.
///
/// Usually assembled through the fluent methods on
/// [`MboxReaderBuilder`]; the struct is public so a fully spelled-out
/// configuration can be stored and reused.
///
/// [`MboxReader`]: crate::MboxReader
/// [`MboxReaderBuilder`]: crate::MboxReaderBuilder
#[derive(Debug, Clone)]
pub struct SplitterOptions {
    /// Character encoding of the file. Default: UTF-8. No auto-detection is
    /// performed.
    pub encoding: &'static Encoding,

    /// Regex introducing each record. Default:
    /// [`DEFAULT_MARKER_PATTERN`].
    pub marker_pattern: String,

    /// Flags applied when compiling `marker_pattern`.
    pub flags: MatchFlags,

    /// Upper bound, in bytes of decoded text, on a single record plus its
    /// marker line. Also the size of the decode chunk, so it bounds peak
    /// memory. Default: [`DEFAULT_MAX_RECORD_SIZE`].
    pub max_record_size: usize,
}

impl Default for SplitterOptions {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            marker_pattern: DEFAULT_MARKER_PATTERN.to_owned(),
            flags: MatchFlags::default(),
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
        }
    }
}

impl SplitterOptions {
    pub(crate) fn compile(&self) -> Result<Regex, SplitError> {
        Ok(RegexBuilder::new(&self.marker_pattern)
            .multi_line(self.flags.multi_line)
            .case_insensitive(self.flags.case_insensitive)
            .dot_matches_new_line(self.flags.dot_matches_new_line)
            .build()?)
    }
}
