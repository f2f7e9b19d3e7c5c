use std::fmt;
use std::iter::FusedIterator;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use log::debug;

use crate::chunk::TextChunk;
use crate::decoder::ChunkDecoder;
use crate::error::SplitError;
use crate::matcher::{MarkerMatcher, MarkerSpan};
use crate::options::{MatchFlags, SplitterOptions};
use crate::source::MappedSource;

/// One record's decoded text, borrowed from the reader's chunk buffer.
///
/// The view is valid until the next call to [`MboxReader::next_record`],
/// which may slide the buffer beneath it; the borrow checker enforces this
/// statically, so a stale view is a compile error rather than garbage.
/// Derefs to [`str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    text: &'a str,
}

impl<'a> Record<'a> {
    /// The record text, excluding its marker line.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Length of the record text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the record has no body at all (a marker line immediately
    /// followed by another marker or by end of input).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Deref for Record<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        self.text
    }
}

impl AsRef<str> for Record<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Fluent configuration for an [`MboxReader`].
///
/// Created by [`MboxReader::from_path`]; every setter has a documented
/// default, so `MboxReader::from_path(p).open()` splits a standard UTF-8
/// mbox.
#[derive(Debug, Clone)]
pub struct MboxReaderBuilder {
    path: PathBuf,
    options: SplitterOptions,
}

impl MboxReaderBuilder {
    /// Character encoding of the file. Default: UTF-8.
    #[must_use]
    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        self.options.encoding = encoding;
        self
    }

    /// Marker pattern introducing each record. Default:
    /// [`DEFAULT_MARKER_PATTERN`](crate::DEFAULT_MARKER_PATTERN).
    #[must_use]
    pub fn marker(mut self, pattern: impl Into<String>) -> Self {
        self.options.marker_pattern = pattern.into();
        self
    }

    /// Flags applied when compiling the marker pattern. Default:
    /// multi-line only.
    #[must_use]
    pub fn flags(mut self, flags: MatchFlags) -> Self {
        self.options.flags = flags;
        self
    }

    /// Maximum record size in bytes of decoded text; also the decode chunk
    /// capacity. Default:
    /// [`DEFAULT_MAX_RECORD_SIZE`](crate::DEFAULT_MAX_RECORD_SIZE).
    #[must_use]
    pub fn max_record_size(mut self, bytes: usize) -> Self {
        self.options.max_record_size = bytes;
        self
    }

    /// Validate the configuration, map the file, and locate the first
    /// marker.
    ///
    /// # Errors
    ///
    /// [`SplitError::Pattern`] if the marker pattern does not compile,
    /// [`SplitError::Io`] if the file cannot be opened or mapped,
    /// [`SplitError::NoMarkers`] if the content contains no marker line,
    /// and [`SplitError::Malformed`] if the first chunk fails to decode.
    ///
    /// # Panics
    ///
    /// If `max_record_size` was set to zero.
    pub fn open(self) -> Result<MboxReader, SplitError> {
        MboxReader::open(self.path, self.options)
    }
}

/// Splits a memory-mapped mbox file into a lazy, single-pass sequence of
/// record views.
///
/// Construction decodes the first chunk and locates the first marker line;
/// [`next_record`](MboxReader::next_record) then yields one record per
/// call, refilling the chunk buffer as needed. The sequence is finite,
/// ordered, and non-restartable: re-iterating requires a new reader. The
/// underlying mapping is released the first time exhaustion is observed, or
/// earlier via [`close`](MboxReader::close).
pub struct MboxReader {
    source: MappedSource,
    decoder: ChunkDecoder,
    chunk: TextChunk,
    matcher: MarkerMatcher,
    /// Marker opening the record the next call will complete. `None` once
    /// the final record has been emitted.
    pending: Option<MarkerSpan>,
    max_record_size: usize,
}

impl MboxReader {
    /// Start configuring a reader for the mbox file at `path`.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> MboxReaderBuilder {
        MboxReaderBuilder {
            path: path.as_ref().to_path_buf(),
            options: SplitterOptions::default(),
        }
    }

    fn open(path: PathBuf, options: SplitterOptions) -> Result<Self, SplitError> {
        assert!(
            options.max_record_size > 0,
            "max_record_size must be non-zero"
        );
        let pattern = options.compile()?;
        let mut source = MappedSource::open(&path)?;
        let mut decoder = ChunkDecoder::new(options.encoding);
        let mut chunk = TextChunk::with_capacity(options.max_record_size);
        let mut matcher = MarkerMatcher::new(pattern);

        decoder.fill(&mut source, &mut chunk)?;
        let pending = loop {
            if let Some(span) = matcher.find_next(&chunk) {
                break span;
            }
            if !source.has_remaining() {
                return Err(SplitError::NoMarkers);
            }
            // The first marker sits beyond this chunk. Keep only the last,
            // possibly incomplete line: a marker straddling the chunk
            // boundary keeps its leading newline, so line anchoring
            // survives the slide.
            let keep_from = match chunk.as_str().rfind('\n') {
                Some(nl) => nl,
                None => chunk
                    .as_str()
                    .char_indices()
                    .last()
                    .map_or(0, |(i, _)| i),
            };
            chunk.carry_over(keep_from);
            matcher.reset();
            let consumed = decoder.fill(&mut source, &mut chunk)?;
            if consumed == 0 && source.has_remaining() {
                return Err(SplitError::RecordOverflow {
                    offset: source.consumed(),
                    max_record_size: options.max_record_size,
                });
            }
        };
        debug!(
            "opened mbox {}: first marker at {}..{}",
            path.display(),
            pending.start,
            pending.end
        );

        Ok(Self {
            source,
            decoder,
            chunk,
            matcher,
            pending: Some(pending),
            max_record_size: options.max_record_size,
        })
    }

    /// Produce the next record view.
    ///
    /// Returns `Ok(None)` once the sequence is exhausted; the mapping is
    /// released at that point. After an error the reader closes itself and
    /// every further call returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`SplitError::Malformed`] if a refill hits an undecodable byte
    /// sequence, [`SplitError::RecordOverflow`] if a record outgrows the
    /// chunk buffer. Both are fatal to the remaining sequence.
    pub fn next_record(&mut self) -> Result<Option<Record<'_>>, SplitError> {
        let Some(open) = self.pending else {
            self.close();
            return Ok(None);
        };

        if let Some(close) = self.matcher.find_next(&self.chunk) {
            self.pending = Some(close);
            return Ok(Some(self.record_between(open.end, close.start)));
        }

        if self.source.has_remaining() {
            // No marker left in this chunk, but bytes remain: slide the
            // pending record to the front and decode another batch.
            if let Err(err) = self.refill_past(open) {
                self.pending = None;
                self.close();
                return Err(err);
            }
            // Re-match from scratch rather than relocating the old span
            // arithmetically: the pending marker sits at the front of the
            // refreshed chunk, and a fresh match heals a marker whose line
            // was cut short at the old chunk boundary (`$` also matches at
            // the end of the haystack).
            self.matcher.reset();
            let relocated_end = self
                .matcher
                .find_next(&self.chunk)
                .map_or(open.end - open.start, |m| m.end);
            if let Some(close) = self.matcher.find_next(&self.chunk) {
                self.pending = Some(close);
                return Ok(Some(self.record_between(relocated_end, close.start)));
            }
            if self.source.has_remaining() {
                // The chunk is full and still holds no closing marker; this
                // record can never complete.
                let offset = self.source.consumed().saturating_sub(self.chunk.len());
                self.pending = None;
                self.close();
                return Err(SplitError::RecordOverflow {
                    offset,
                    max_record_size: self.max_record_size,
                });
            }
            self.pending = None;
            return Ok(Some(self.record_between(relocated_end, self.chunk.len())));
        }

        // No further marker and no further bytes: the trailing record runs
        // to the end of the decoded text.
        self.pending = None;
        Ok(Some(self.record_between(open.end, self.chunk.len())))
    }

    /// Whether another record is available. Read-only probe: calling it any
    /// number of times consumes nothing and changes no state.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the mapping and file handle.
    ///
    /// Safe to call more than once; the second call is a no-op. Invoked
    /// automatically the first time the sequence is observed to be
    /// exhausted, and on drop.
    pub fn close(&mut self) {
        if !self.source.is_released() {
            debug!(
                "closing mbox source after {} bytes consumed",
                self.source.consumed()
            );
            self.source.release();
        }
    }

    /// Consume the reader, yielding an owned `String` per record.
    ///
    /// The convenience surface for `for`-loop iteration; costs one copy per
    /// record, unlike [`next_record`](MboxReader::next_record).
    #[must_use]
    pub fn into_records(self) -> Records {
        Records {
            reader: self,
            done: false,
        }
    }

    fn refill_past(&mut self, open: MarkerSpan) -> Result<(), SplitError> {
        debug!(
            "carry-over of {} text bytes (pending marker at {}..{})",
            self.chunk.len() - open.start,
            open.start,
            open.end
        );
        self.chunk.carry_over(open.start);
        self.decoder.fill(&mut self.source, &mut self.chunk)?;
        Ok(())
    }

    /// Record spanning from just past the marker's line terminator to `to`.
    ///
    /// The character after the marker match is the line terminator the
    /// pattern stopped in front of; step over one full character, clamped
    /// for a marker that ends the file with no trailing newline.
    fn record_between(&self, marker_end: usize, to: usize) -> Record<'_> {
        let after_terminator = match self.chunk.as_str()[marker_end..].chars().next() {
            Some(c) => marker_end + c.len_utf8(),
            None => marker_end,
        };
        Record {
            text: self.chunk.view(after_terminator.min(to), to),
        }
    }
}

/// Owned-record iterator returned by [`MboxReader::into_records`].
///
/// Yields `Result<String, SplitError>` in file order; fused after the first
/// `None` or error.
pub struct Records {
    reader: MboxReader,
    done: bool,
}

impl Iterator for Records {
    type Item = Result<String, SplitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_record() {
            Ok(Some(record)) => Some(Ok(record.as_str().to_owned())),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Records {}
