/// Fixed-capacity buffer of decoded text, shared by every record view.
///
/// Valid text occupies `[0, len())`; the spare capacity `[len(),
/// capacity())` is the decoder's write region. The buffer is allocated once
/// and never grows: refills write into the spare capacity and
/// [`carry_over`](TextChunk::carry_over) slides the tail in place.
pub(crate) struct TextChunk {
    buf: String,
}

impl TextChunk {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.buf
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    /// Spare room left for the decoder, in bytes.
    pub(crate) fn free(&self) -> usize {
        self.buf.capacity() - self.buf.len()
    }

    /// Slide `[keep_from, len())` to the front of the buffer, discarding
    /// everything before it.
    ///
    /// In place, preserving order: the kept bytes survive with no gap and
    /// no duplication. Every outstanding index into the buffer is stale
    /// afterwards and must be recomputed relative to `keep_from`.
    pub(crate) fn carry_over(&mut self, keep_from: usize) {
        debug_assert!(self.buf.is_char_boundary(keep_from));
        self.buf.drain(..keep_from);
    }

    /// Mutable handle for the decoder. Decoded text is appended into the
    /// spare capacity only; the allocation must not grow.
    pub(crate) fn buf_mut(&mut self) -> &mut String {
        &mut self.buf
    }

    /// Borrowed window `[from, to)` over the decoded text.
    pub(crate) fn view(&self, from: usize, to: usize) -> &str {
        &self.buf[from..to]
    }
}
