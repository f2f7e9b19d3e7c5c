use encoding_rs::{Decoder, DecoderResult, Encoding};
use log::trace;

use crate::chunk::TextChunk;
use crate::error::SplitError;
use crate::source::MappedSource;

/// Incremental converter from the source's byte encoding to text.
///
/// Each [`fill`](ChunkDecoder::fill) offers the decoder the entire
/// unconsumed slice of the mapping, so every call is potentially the final
/// one: a truncated multi-byte sequence at end of file is reported as
/// malformed rather than left pending forever.
pub(crate) struct ChunkDecoder {
    decoder: Decoder,
    encoding: &'static Encoding,
    finished: bool,
}

impl ChunkDecoder {
    pub(crate) fn new(encoding: &'static Encoding) -> Self {
        Self {
            decoder: encoding.new_decoder(),
            encoding,
            finished: false,
        }
    }

    /// Decode from the source into the chunk's spare capacity, advancing
    /// the source cursor by the number of bytes consumed.
    ///
    /// Stops when the chunk is full or the source is exhausted. Returns the
    /// number of source bytes consumed. Malformed input fails fast with the
    /// absolute file offset of the offending sequence.
    pub(crate) fn fill(
        &mut self,
        source: &mut MappedSource,
        chunk: &mut TextChunk,
    ) -> Result<usize, SplitError> {
        if self.finished {
            return Ok(0);
        }
        let before = source.consumed();
        let (result, read) =
            self.decoder
                .decode_to_string_without_replacement(source.remaining(), chunk.buf_mut(), true);
        source.advance(read);
        match result {
            DecoderResult::InputEmpty => {
                // Everything decoded and the stream finalized; the decoder
                // must not be called again.
                self.finished = true;
            }
            DecoderResult::OutputFull => {}
            DecoderResult::Malformed(bad, pushed_back) => {
                let offset = source
                    .consumed()
                    .saturating_sub(usize::from(bad) + usize::from(pushed_back));
                return Err(SplitError::Malformed {
                    encoding: self.encoding.name(),
                    offset,
                });
            }
        }
        let consumed = source.consumed() - before;
        trace!(
            "decoded {consumed} bytes into chunk ({} text bytes, {} free)",
            chunk.len(),
            chunk.free()
        );
        Ok(consumed)
    }
}
