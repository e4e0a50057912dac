use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::{min, Ordering};
use core::hash::{Hash, Hasher};
use core::ops::{Bound, RangeBounds};

use crate::codec::{
    decode_int, encode_int, read_array, truncate_to_unit, write_array, Encoding, Endian, IntSpec,
};
use crate::error::{BufferError, Result};
use crate::iter::Bytes;
use crate::store::{ByteStore, Init};

/// A window of `len` bytes starting at `offset` inside a [`ByteStore`].
///
/// Views created by [`BufferView::slice`] or by `clone()` share the store
/// with their parent, so writes through one are seen by all overlapping
/// views. Use [`BufferView::from_view`] for an independent copy.
#[derive(Clone)]
pub struct BufferView {
    store: ByteStore,
    offset: usize,
    len: usize,
}

impl BufferView {
    /// Allocates a new store and returns a view covering all of it.
    ///
    /// # Errors
    ///
    /// See [`ByteStore::allocate`].
    pub fn allocate(size: usize, init: Init) -> Result<Self> {
        let store = ByteStore::allocate(size, init)?;
        Ok(Self::over(store))
    }

    /// Allocates `size` zeroed bytes.
    ///
    /// # Errors
    ///
    /// See [`ByteStore::allocate`].
    pub fn alloc(size: usize) -> Result<Self> {
        Self::allocate(size, Init::Zeroed)
    }

    /// Allocates `size` bytes with unspecified contents.
    ///
    /// # Errors
    ///
    /// See [`ByteStore::allocate`].
    pub fn alloc_unspecified(size: usize) -> Result<Self> {
        Self::allocate(size, Init::Unspecified)
    }

    /// Allocates `size` bytes set to `value`.
    ///
    /// # Errors
    ///
    /// See [`ByteStore::allocate`].
    pub fn alloc_filled(size: usize, value: u8) -> Result<Self> {
        let view = Self::allocate(size, Init::Unspecified)?;
        view.fill(value, ..);
        Ok(view)
    }

    /// View over the whole of `store`.
    #[must_use]
    pub fn over(store: ByteStore) -> Self {
        let len = store.capacity();
        Self {
            store,
            offset: 0,
            len,
        }
    }

    /// Encodes `text` into a new store sized to fit.
    ///
    /// # Errors
    ///
    /// Same as [`Encoding::encode`], plus allocation errors.
    pub fn from_text(text: &str, encoding: Encoding) -> Result<Self> {
        let bytes = encoding.encode(text)?;
        Self::from_vec(bytes)
    }

    /// Like [`BufferView::from_text`] with the encoding given by name.
    ///
    /// # Errors
    ///
    /// `BufferError::UnsupportedEncoding` for unknown names, otherwise as
    /// [`BufferView::from_text`].
    pub fn from_text_named(text: &str, encoding: &str) -> Result<Self> {
        Self::from_text(text, encoding.parse()?)
    }

    /// Copies `bytes` into a new store.
    ///
    /// # Errors
    ///
    /// See [`ByteStore::allocate`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let view = Self::allocate(bytes.len(), Init::Unspecified)?;
        view.store.borrow_mut().copy_from_slice(bytes);
        Ok(view)
    }

    /// Copies the content of `source` into a new store. The result does not
    /// alias `source`.
    ///
    /// # Errors
    ///
    /// See [`ByteStore::allocate`].
    pub fn from_view(source: &BufferView) -> Result<Self> {
        let view = Self::allocate(source.len, Init::Unspecified)?;
        source.copy_into(&view, 0, 0, source.len);
        Ok(view)
    }

    /// Uses `bytes` as the backing store without copying.
    ///
    /// # Errors
    ///
    /// `BufferError::InvalidSize` if `bytes` is longer than `MAX_LENGTH`.
    pub fn from_vec(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() > crate::MAX_LENGTH {
            return Err(BufferError::InvalidSize {
                requested: bytes.len(),
                max: crate::MAX_LENGTH,
            });
        }
        Ok(Self::over(ByteStore::from_vec(bytes)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Start of this view inside its store.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn store(&self) -> &ByteStore {
        &self.store
    }

    /// Runs `f` over the bytes of the view.
    ///
    /// # Panics
    ///
    /// Panics if `f` calls [`BufferView::with_bytes_mut`] (or any mutating
    /// method) on a view of the same store.
    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        let region = self.store.borrow();
        f(&region[self.offset..self.offset + self.len])
    }

    /// Runs `f` over the mutable bytes of the view.
    ///
    /// # Panics
    ///
    /// Panics if `f` accesses any view of the same store.
    pub fn with_bytes_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let mut region = self.store.borrow_mut();
        f(&mut region[self.offset..self.offset + self.len])
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.with_bytes(<[u8]>::to_vec)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        if index >= self.len {
            return None;
        }
        Some(self.store.borrow()[self.offset + index])
    }

    /// Sets the byte at `index`.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfBounds` if `index` is past the end.
    pub fn set(&self, index: usize, value: u8) -> Result<()> {
        if index >= self.len {
            return Err(BufferError::OutOfBounds {
                offset: index,
                len: 1,
                bound: self.len,
            });
        }
        self.store.borrow_mut()[self.offset + index] = value;
        Ok(())
    }

    /// Iterator over the bytes, read lazily from the store.
    #[must_use]
    pub fn bytes(&self) -> Bytes<'_> {
        Bytes::new(self)
    }

    /// Zero-copy sub-view over `[start, end)`.
    ///
    /// `start` is clamped to `0..=len` and `end` to `start..=len`, so this
    /// never fails.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> BufferView {
        let start = min(start, self.len);
        let end = end.clamp(start, self.len);
        BufferView {
            store: self.store.clone(),
            offset: self.offset + start,
            len: end - start,
        }
    }

    /// Copies `[source_start, source_end)` of `self` into `target` at
    /// `target_start` and returns the number of bytes copied.
    ///
    /// All bounds are clamped. Overlapping ranges of one store are copied
    /// as if through an intermediate buffer.
    pub fn copy_into(
        &self,
        target: &BufferView,
        target_start: usize,
        source_start: usize,
        source_end: usize,
    ) -> usize {
        let source_start = min(source_start, self.len);
        let source_end = source_end.clamp(source_start, self.len);
        let target_start = min(target_start, target.len);
        let count = min(source_end - source_start, target.len - target_start);
        if count == 0 {
            return 0;
        }

        let from = self.offset + source_start;
        let to = target.offset + target_start;
        if self.store.same_region(&target.store) {
            self.store.borrow_mut().copy_within(from..from + count, to);
        } else {
            let source = self.store.borrow();
            let mut dest = target.store.borrow_mut();
            dest[to..to + count].copy_from_slice(&source[from..from + count]);
        }
        count
    }

    /// Moves `[start, end)` to `target` inside this view and returns the
    /// number of bytes moved. Bounds are clamped; overlap is safe.
    pub fn copy_within(&self, target: usize, start: usize, end: usize) -> usize {
        self.copy_into(self, target, start, end)
    }

    /// Encodes `text` and writes it at `offset`, returning the bytes written.
    ///
    /// Output that does not fit is truncated at a unit boundary: a char whose
    /// encoding would be split is dropped whole.
    ///
    /// # Errors
    ///
    /// - `BufferError::OutOfBounds` if `offset > len`
    /// - encoding errors from [`Encoding::encode`]; nothing is written then
    pub fn write(&self, text: &str, offset: usize, encoding: Encoding) -> Result<usize> {
        if offset > self.len {
            return Err(BufferError::OutOfBounds {
                offset,
                len: 0,
                bound: self.len,
            });
        }
        let encoded = encoding.encode(text)?;
        let count = truncate_to_unit(encoding, &encoded, self.len - offset);
        self.with_bytes_mut(|bytes| {
            bytes[offset..offset + count].copy_from_slice(&encoded[..count]);
        });
        Ok(count)
    }

    /// Sets every byte of the clamped `range` to `value`.
    pub fn fill(&self, value: u8, range: impl RangeBounds<usize>) {
        let (start, end) = self.clamp_range(range);
        self.with_bytes_mut(|bytes| bytes[start..end].fill(value));
    }

    /// Tiles the encoded form of `text` over the clamped `range`. The last
    /// repetition is cut to fit; an empty pattern fills with zero.
    ///
    /// # Errors
    ///
    /// Encoding errors from [`Encoding::encode`]; nothing is written then.
    pub fn fill_text(
        &self,
        text: &str,
        encoding: Encoding,
        range: impl RangeBounds<usize>,
    ) -> Result<()> {
        let pattern = encoding.encode(text)?;
        let (start, end) = self.clamp_range(range);
        if pattern.is_empty() {
            self.with_bytes_mut(|bytes| bytes[start..end].fill(0));
            return Ok(());
        }
        self.with_bytes_mut(|bytes| {
            for (dst, src) in bytes[start..end].iter_mut().zip(pattern.iter().cycle()) {
                *dst = *src;
            }
        });
        Ok(())
    }

    fn clamp_range(&self, range: impl RangeBounds<usize>) -> (usize, usize) {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len,
        };
        let start = min(start, self.len);
        (start, end.clamp(start, self.len))
    }

    /// Byte-wise equality.
    #[must_use]
    pub fn equals(&self, other: &BufferView) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Lexicographic byte comparison; a proper prefix sorts first.
    #[must_use]
    pub fn compare(&self, other: &BufferView) -> Ordering {
        self.with_bytes(|a| other.with_bytes(|b| a.cmp(b)))
    }

    /// Position of the first occurrence of `needle` at or after `from`.
    ///
    /// An empty needle matches at `min(from, len)`.
    #[must_use]
    pub fn index_of(&self, needle: &[u8], from: usize) -> Option<usize> {
        let from = min(from, self.len);
        if needle.is_empty() {
            return Some(from);
        }
        self.with_bytes(|haystack| {
            haystack[from..]
                .windows(needle.len())
                .position(|window| window == needle)
                .map(|pos| pos + from)
        })
    }

    #[must_use]
    pub fn index_of_byte(&self, needle: u8, from: usize) -> Option<usize> {
        self.index_of(&[needle], from)
    }

    /// Position of the last occurrence of `needle`.
    #[must_use]
    pub fn last_index_of(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return Some(self.len);
        }
        self.with_bytes(|haystack| haystack.windows(needle.len()).rposition(|w| w == needle))
    }

    #[must_use]
    pub fn contains(&self, needle: &[u8]) -> bool {
        self.index_of(needle, 0).is_some()
    }

    /// Decodes the bytes of the view.
    ///
    /// # Errors
    ///
    /// `BufferError::DecodeError` if the bytes are invalid for `encoding`.
    pub fn to_text(&self, encoding: Encoding) -> Result<String> {
        self.with_bytes(|bytes| encoding.decode(bytes))
    }

    /// Copies all `views` in order into one new store.
    ///
    /// # Errors
    ///
    /// Allocation errors; the combined length may exceed `MAX_LENGTH`.
    pub fn concat(views: &[BufferView]) -> Result<BufferView> {
        let total = views
            .iter()
            .try_fold(0usize, |acc, view| acc.checked_add(view.len))
            .unwrap_or(usize::MAX);
        Self::concat_with_len(views, total)
    }

    /// Like [`BufferView::concat`], but the result is exactly `total` bytes:
    /// extra input is cut off and missing bytes are zero.
    ///
    /// # Errors
    ///
    /// Allocation errors for `total`.
    pub fn concat_with_len(views: &[BufferView], total: usize) -> Result<BufferView> {
        let out = Self::alloc(total)?;
        let mut position = 0;
        for view in views {
            if position >= total {
                break;
            }
            position += view.copy_into(&out, position, 0, view.len);
        }
        tracing::trace!(inputs = views.len(), total, "concatenated views");
        Ok(out)
    }

    /// Reads an integer laid out as `spec` at `offset`.
    ///
    /// # Errors
    ///
    /// See [`decode_int`].
    pub fn read_int(&self, offset: usize, spec: IntSpec) -> Result<i128> {
        self.with_bytes(|bytes| decode_int(bytes, offset, spec))
    }

    /// Writes `value` laid out as `spec` at `offset`, returning the offset
    /// past the field.
    ///
    /// # Errors
    ///
    /// See [`encode_int`].
    pub fn write_int(&self, value: i128, offset: usize, spec: IntSpec) -> Result<usize> {
        self.with_bytes_mut(|bytes| encode_int(bytes, value, offset, spec))
    }

    /// Swaps the byte order of each 16-bit unit in place.
    ///
    /// # Errors
    ///
    /// `BufferError::InvalidLength` if the length is odd.
    pub fn swap16(&self) -> Result<()> {
        self.swap_units(2)
    }

    /// # Errors
    ///
    /// `BufferError::InvalidLength` if the length is not a multiple of 4.
    pub fn swap32(&self) -> Result<()> {
        self.swap_units(4)
    }

    /// # Errors
    ///
    /// `BufferError::InvalidLength` if the length is not a multiple of 8.
    pub fn swap64(&self) -> Result<()> {
        self.swap_units(8)
    }

    fn swap_units(&self, unit: usize) -> Result<()> {
        if self.len % unit != 0 {
            return Err(BufferError::InvalidLength {
                len: self.len,
                unit,
            });
        }
        self.with_bytes_mut(|bytes| bytes.chunks_exact_mut(unit).for_each(<[u8]>::reverse));
        Ok(())
    }
}

macro_rules! number_accessors {
    ($($ty:ty => $read:ident, $write:ident;)*) => {
        impl BufferView {
            $(
                #[doc = concat!("Reads a `", stringify!($ty), "` at `offset`.")]
                ///
                /// # Errors
                ///
                /// `BufferError::OutOfBounds` if the value does not fit in the view.
                pub fn $read(&self, offset: usize, endian: Endian) -> Result<$ty> {
                    let field = self.with_bytes(|bytes| {
                        read_array::<{ core::mem::size_of::<$ty>() }>(bytes, offset)
                    })?;
                    Ok(match endian {
                        Endian::Big => <$ty>::from_be_bytes(field),
                        Endian::Little => <$ty>::from_le_bytes(field),
                    })
                }

                #[doc = concat!("Writes a `", stringify!($ty), "` at `offset` and returns the offset past it.")]
                ///
                /// # Errors
                ///
                /// `BufferError::OutOfBounds` if the value does not fit in the view.
                pub fn $write(&self, value: $ty, offset: usize, endian: Endian) -> Result<usize> {
                    let field = match endian {
                        Endian::Big => value.to_be_bytes(),
                        Endian::Little => value.to_le_bytes(),
                    };
                    self.with_bytes_mut(|bytes| write_array(bytes, field, offset))
                }
            )*
        }
    };
}

number_accessors! {
    u16 => read_u16, write_u16;
    i16 => read_i16, write_i16;
    u32 => read_u32, write_u32;
    i32 => read_i32, write_i32;
    u64 => read_u64, write_u64;
    i64 => read_i64, write_i64;
    f32 => read_f32, write_f32;
    f64 => read_f64, write_f64;
}

impl BufferView {
    /// # Errors
    ///
    /// `BufferError::OutOfBounds` if `offset` is past the end.
    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        self.get(offset).ok_or(BufferError::OutOfBounds {
            offset,
            len: 1,
            bound: self.len,
        })
    }

    /// # Errors
    ///
    /// `BufferError::OutOfBounds` if `offset` is past the end.
    pub fn read_i8(&self, offset: usize) -> Result<i8> {
        self.read_u8(offset).map(|b| i8::from_ne_bytes([b]))
    }

    /// # Errors
    ///
    /// `BufferError::OutOfBounds` if `offset` is past the end.
    pub fn write_u8(&self, value: u8, offset: usize) -> Result<usize> {
        self.set(offset, value).map(|()| offset + 1)
    }

    /// # Errors
    ///
    /// `BufferError::OutOfBounds` if `offset` is past the end.
    pub fn write_i8(&self, value: i8, offset: usize) -> Result<usize> {
        self.write_u8(value.to_ne_bytes()[0], offset)
    }
}

impl TryFrom<Vec<u8>> for BufferView {
    type Error = BufferError;

    /// Takes ownership of `bytes` as the backing store.
    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::from_vec(bytes)
    }
}

impl TryFrom<&[u8]> for BufferView {
    type Error = BufferError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&str> for BufferView {
    type Error = BufferError;

    fn try_from(text: &str) -> Result<Self> {
        Self::from_bytes(text.as_bytes())
    }
}

impl PartialEq for BufferView {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for BufferView {}

impl PartialEq<[u8]> for BufferView {
    fn eq(&self, other: &[u8]) -> bool {
        self.with_bytes(|bytes| bytes == other)
    }
}

impl PartialEq<&[u8]> for BufferView {
    fn eq(&self, other: &&[u8]) -> bool {
        self == *other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for BufferView {
    fn eq(&self, other: &[u8; N]) -> bool {
        self == &other[..]
    }
}

impl PartialOrd for BufferView {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BufferView {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for BufferView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.with_bytes(|bytes| bytes.hash(state));
    }
}

impl core::fmt::Debug for BufferView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "BufferView {{ offset: {:?}, len: {:?}, bytes: {:02x?} }}",
            self.offset,
            self.len,
            self.to_vec()
        )
    }
}
