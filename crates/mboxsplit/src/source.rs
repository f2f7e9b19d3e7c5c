use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::SplitError;

/// Read-only memory-mapped byte source with a monotone read cursor.
///
/// The cursor only ever moves forward; rewinding would desynchronize the
/// decoder from the matcher. Releasing the mapping is idempotent and leaves
/// the source permanently empty.
pub(crate) struct MappedSource {
    mmap: Option<Mmap>,
    pos: usize,
}

impl MappedSource {
    pub(crate) fn open(path: &Path) -> Result<Self, SplitError> {
        let file = File::open(path)?;
        // A zero-length file cannot be mapped; it behaves as an
        // already-empty source instead.
        let mmap = if file.metadata()?.len() == 0 {
            None
        } else {
            // Safety: the mapping is private to this source and read-only.
            // As with any mmap, the caller must not truncate the file while
            // it is being split.
            Some(unsafe { Mmap::map(&file)? })
        };
        Ok(Self { mmap, pos: 0 })
    }

    /// The unconsumed byte slice. Empty once the cursor reaches the end of
    /// the mapping or the mapping has been released.
    pub(crate) fn remaining(&self) -> &[u8] {
        match &self.mmap {
            Some(mmap) => &mmap[self.pos..],
            None => &[],
        }
    }

    pub(crate) fn has_remaining(&self) -> bool {
        !self.remaining().is_empty()
    }

    /// Advance the cursor past `n` consumed bytes.
    pub(crate) fn advance(&mut self, n: usize) {
        self.pos += n;
        debug_assert!(self.mmap.as_ref().is_none_or(|m| self.pos <= m.len()));
    }

    /// Absolute file offset of the next unconsumed byte.
    pub(crate) fn consumed(&self) -> usize {
        self.pos
    }

    /// Drop the mapping, closing the underlying handle. Idempotent.
    pub(crate) fn release(&mut self) {
        self.mmap = None;
    }

    pub(crate) fn is_released(&self) -> bool {
        self.mmap.is_none()
    }
}
