use crate::view::BufferView;

/// Iterator over the bytes of a `BufferView`
///
/// Each byte is read from the store when requested, so writes made through
/// an aliasing view during iteration are observed.
#[derive(Clone)]
pub struct Bytes<'a> {
    view: &'a BufferView,
    current: usize,
}

impl<'a> Bytes<'a> {
    pub(crate) fn new(view: &'a BufferView) -> Self {
        Self { view, current: 0 }
    }
}

impl Iterator for Bytes<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = self.view.get(self.current)?;
        self.current += 1;
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.view.len().saturating_sub(self.current);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bytes<'_> {}

impl<'a> IntoIterator for &'a BufferView {
    type Item = u8;
    type IntoIter = Bytes<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Bytes::new(self)
    }
}
