use alloc::vec::Vec;
use core::cmp::min;

use bytebuf::BufferView;
use embedded_io::{Error as _, ErrorKind, Read};

use crate::error::{AssemblerError, Result};
use crate::iter::Chunks;

/// Scratch size for [`Assembler::read_from`] callers that have no better
/// estimate of their reads.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Collects byte fragments of one logical stream.
///
/// Fragments are kept as views in arrival order and are copied only when
/// the stream is consolidated into a single view.
#[derive(Debug, Default)]
pub struct Assembler {
    fragments: Vec<BufferView>,
    total: usize,
    expected: Option<usize>,
}

impl Assembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an assembler for a stream that declares its total length.
    ///
    /// The declared length limits [`Assembler::read_from`] and drives
    /// [`Assembler::remaining`] and [`Assembler::is_complete`]; it does not
    /// change what [`Assembler::consolidate`] returns.
    #[must_use]
    pub fn with_expected_len(expected: usize) -> Self {
        Self {
            expected: Some(expected),
            ..Self::default()
        }
    }

    /// Records `fragment` after the ones already appended.
    ///
    /// The fragment is kept as a view, so later writes to its store show up
    /// in the next consolidation.
    pub fn append(&mut self, fragment: BufferView) {
        self.total += fragment.len();
        tracing::trace!(len = fragment.len(), total = self.total, "appended fragment");
        self.fragments.push(fragment);
    }

    /// Copies `bytes` into a fresh view and appends it.
    ///
    /// # Errors
    ///
    /// Returns `AssemblerError::Buffer` if the view cannot be allocated.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let fragment = BufferView::from_bytes(bytes)?;
        self.append(fragment);
        Ok(())
    }

    /// Total number of bytes appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    #[must_use]
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    pub fn expected_len(&self) -> Option<usize> {
        self.expected
    }

    /// Bytes still missing from the declared length, if one was declared.
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        self.expected
            .map(|expected| expected.saturating_sub(self.total))
    }

    /// Whether the declared length has been reached. Always false for
    /// streams of unknown length.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining() == Some(0)
    }

    /// Iterator over the recorded fragments.
    #[must_use]
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(&self.fragments)
    }

    /// Copies all fragments, in order, into one newly allocated view.
    ///
    /// The result holds exactly the bytes appended, whether or not a
    /// declared length has been reached; check [`Assembler::is_complete`]
    /// for short streams. May be called repeatedly; each call reflects the
    /// fragments appended up to that point.
    ///
    /// # Errors
    ///
    /// Returns `AssemblerError::Buffer` if the result cannot be allocated.
    pub fn consolidate(&self) -> Result<BufferView> {
        let view = BufferView::concat(&self.fragments)?;
        tracing::debug!(
            fragments = self.fragments.len(),
            len = view.len(),
            "consolidated stream"
        );
        Ok(view)
    }

    /// Like [`Assembler::consolidate`], but the result is exactly `len`
    /// bytes: extra input is cut off and missing bytes are zero.
    ///
    /// # Errors
    ///
    /// Returns `AssemblerError::Buffer` if the result cannot be allocated.
    pub fn consolidate_to(&self, len: usize) -> Result<BufferView> {
        let view = BufferView::concat_with_len(&self.fragments, len)?;
        tracing::debug!(
            fragments = self.fragments.len(),
            appended = self.total,
            len,
            "consolidated stream to fixed length"
        );
        Ok(view)
    }

    /// Consolidates and consumes the assembler.
    ///
    /// # Errors
    ///
    /// Same as [`Assembler::consolidate`].
    pub fn finish(self) -> Result<BufferView> {
        self.consolidate()
    }

    /// Drops all fragments and the declared length so the assembler can be
    /// used for another stream.
    pub fn reset(&mut self) {
        tracing::debug!(fragments = self.fragments.len(), total = self.total, "reset");
        self.fragments.clear();
        self.total = 0;
        self.expected = None;
    }

    /// Reads `reader` to the end, appending one fragment per successful read.
    ///
    /// Reads go into one scratch view of at most `chunk_size` bytes; each
    /// fragment is a right-sized copy of the bytes actually read. When a
    /// length was declared, reading stops once it is reached and no read
    /// asks for more than the remaining bytes. Reads failing with
    /// `ErrorKind::Interrupted` are retried.
    ///
    /// Returns the number of bytes read by this call.
    ///
    /// # Errors
    ///
    /// - `AssemblerError::InvalidChunkSize` if `chunk_size` is 0
    /// - `AssemblerError::Io` if the reader fails; fragments read before the
    ///   failure stay appended
    /// - `AssemblerError::Buffer` if a view cannot be allocated
    pub fn read_from<R: Read>(&mut self, reader: &mut R, chunk_size: usize) -> Result<usize> {
        if chunk_size == 0 {
            return Err(AssemblerError::InvalidChunkSize);
        }

        let scratch_len = self
            .remaining()
            .map_or(chunk_size, |remaining| min(remaining, chunk_size));
        let scratch = BufferView::alloc_unspecified(scratch_len)?;

        let mut n_read = 0;
        loop {
            let want = match self.remaining() {
                Some(0) => break,
                Some(remaining) => min(remaining, scratch_len),
                None => scratch_len,
            };

            let window = scratch.slice(0, want);
            let n_new_bytes = match window.with_bytes_mut(|buf| reader.read(buf)) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(AssemblerError::Io(err.kind())),
            };
            if n_new_bytes == 0 {
                tracing::debug!(n_read, total = self.total, "reader reached EOF");
                break;
            }

            self.append(BufferView::from_view(&window.slice(0, n_new_bytes))?);
            n_read += n_new_bytes;
        }
        Ok(n_read)
    }
}

impl Extend<BufferView> for Assembler {
    fn extend<T: IntoIterator<Item = BufferView>>(&mut self, iter: T) {
        for fragment in iter {
            self.append(fragment);
        }
    }
}

impl<'a> IntoIterator for &'a Assembler {
    type Item = &'a BufferView;
    type IntoIter = Chunks<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks()
    }
}
