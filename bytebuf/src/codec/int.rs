use crate::error::{BufferError, Result};

/// Byte order of a multi-byte value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Most significant byte first
    Big,
    /// Least significant byte first
    Little,
}

/// Width of a fixed-size integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            IntWidth::W8 => 1,
            IntWidth::W16 => 2,
            IntWidth::W32 => 4,
            IntWidth::W64 => 8,
        }
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        (self.bytes() * 8) as u32
    }
}

/// Layout of an integer in a byte sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntSpec {
    pub width: IntWidth,
    pub signed: bool,
    pub endian: Endian,
}

impl IntSpec {
    #[must_use]
    pub const fn new(width: IntWidth, signed: bool, endian: Endian) -> Self {
        Self {
            width,
            signed,
            endian,
        }
    }

    #[must_use]
    pub const fn unsigned(width: IntWidth, endian: Endian) -> Self {
        Self::new(width, false, endian)
    }

    #[must_use]
    pub const fn signed(width: IntWidth, endian: Endian) -> Self {
        Self::new(width, true, endian)
    }

    /// Inclusive range of values representable with this spec.
    #[must_use]
    pub const fn range(self) -> (i128, i128) {
        let bits = self.width.bits();
        if self.signed {
            (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
        } else {
            (0, (1i128 << bits) - 1)
        }
    }
}

fn check_bounds(len: usize, offset: usize, width: usize) -> Result<()> {
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(()),
        _ => Err(BufferError::OutOfBounds {
            offset,
            len: width,
            bound: len,
        }),
    }
}

/// Reads an integer laid out as `spec` at `offset`.
///
/// Signed specs are read as two's complement.
///
/// # Errors
///
/// Returns `BufferError::OutOfBounds` if `offset + width` exceeds `bytes.len()`.
#[allow(clippy::indexing_slicing)] // Bounds checked above
pub fn decode_int(bytes: &[u8], offset: usize, spec: IntSpec) -> Result<i128> {
    let width = spec.width.bytes();
    check_bounds(bytes.len(), offset, width)?;
    let field = &bytes[offset..offset + width];

    let raw = match spec.endian {
        Endian::Big => field.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
        Endian::Little => field
            .iter()
            .rev()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
    };

    let bits = spec.width.bits();
    let value = i128::from(raw);
    if spec.signed && raw >> (bits - 1) & 1 == 1 {
        Ok(value - (1i128 << bits))
    } else {
        Ok(value)
    }
}

/// Writes `value` laid out as `spec` at `offset` and returns the offset just
/// past the written field.
///
/// Values that do not fit are rejected, never truncated.
///
/// # Errors
///
/// - `BufferError::OutOfBounds` if `offset + width` exceeds `bytes.len()`
/// - `BufferError::ValueOutOfRange` if `value` is outside `spec.range()`
#[allow(clippy::indexing_slicing, clippy::cast_possible_truncation)]
pub fn encode_int(bytes: &mut [u8], value: i128, offset: usize, spec: IntSpec) -> Result<usize> {
    let width = spec.width.bytes();
    check_bounds(bytes.len(), offset, width)?;

    let (min, max) = spec.range();
    if value < min || value > max {
        return Err(BufferError::ValueOutOfRange { value, min, max });
    }

    // In range, so the low `width` bytes hold the two's complement form.
    let raw = value as u64;
    let field = &mut bytes[offset..offset + width];
    match spec.endian {
        Endian::Big => field.copy_from_slice(&raw.to_be_bytes()[8 - width..]),
        Endian::Little => field.copy_from_slice(&raw.to_le_bytes()[..width]),
    }
    Ok(offset + width)
}

/// Reads `N` bytes at `offset` into an array, for float and typed access.
pub(crate) fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> Result<[u8; N]> {
    check_bounds(bytes.len(), offset, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    Ok(out)
}

/// Copies `field` into `bytes` at `offset`, returning the offset past it.
pub(crate) fn write_array<const N: usize>(
    bytes: &mut [u8],
    field: [u8; N],
    offset: usize,
) -> Result<usize> {
    check_bounds(bytes.len(), offset, N)?;
    bytes[offset..offset + N].copy_from_slice(&field);
    Ok(offset + N)
}
