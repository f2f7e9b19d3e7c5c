use regex::Regex;

use crate::chunk::TextChunk;

/// Extent `[start, end)` of a marker-line match within the current chunk.
///
/// Stale the moment the chunk is refilled; spans are recomputed from
/// scratch after every carry-over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MarkerSpan {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

/// Runs the marker pattern over the chunk, one match at a time.
///
/// The scan cursor is explicit state rather than hidden matcher internals:
/// it advances past each returned match and is rewound by
/// [`reset`](MarkerMatcher::reset) after a refill.
pub(crate) struct MarkerMatcher {
    pattern: Regex,
    scan_pos: usize,
}

impl MarkerMatcher {
    pub(crate) fn new(pattern: Regex) -> Self {
        Self {
            pattern,
            scan_pos: 0,
        }
    }

    /// First marker at or after the scan cursor, advancing the cursor past
    /// it. `None` signals that the chunk must be refilled or the sequence
    /// finalized.
    pub(crate) fn find_next(&mut self, chunk: &TextChunk) -> Option<MarkerSpan> {
        let m = self.pattern.find_at(chunk.as_str(), self.scan_pos)?;
        let mut next = m.end();
        if next == self.scan_pos {
            // Zero-width match pinned at the cursor; step one character so
            // the scan always advances.
            next = chunk.as_str()[next..]
                .chars()
                .next()
                .map_or(chunk.len(), |c| next + c.len_utf8());
        }
        self.scan_pos = next;
        Some(MarkerSpan {
            start: m.start(),
            end: m.end(),
        })
    }

    /// Restart scanning from the top of a refilled chunk.
    pub(crate) fn reset(&mut self) {
        self.scan_pos = 0;
    }
}
