use bytebuf::BufferView;

/// Iterator over the fragments recorded by an `Assembler`, in arrival order
///
/// Yields the recorded views themselves; nothing is copied.
#[derive(Clone)]
pub struct Chunks<'a> {
    inner: core::slice::Iter<'a, BufferView>,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(fragments: &'a [BufferView]) -> Self {
        Self {
            inner: fragments.iter(),
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a BufferView;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Chunks<'_> {}

impl DoubleEndedIterator for Chunks<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}
