use alloc::string::String;
use thiserror::Error;

use crate::codec::Encoding;

/// Error types for `bytebuf` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum BufferError {
    /// Requested allocation is larger than `MAX_LENGTH`
    #[error("Invalid size: {requested} bytes requested, maximum is {max}")]
    InvalidSize {
        /// Number of bytes requested
        requested: usize,
        /// Largest size a store may have
        max: usize,
    },
    /// The allocator could not provide the memory
    #[error("Allocation of {size} bytes failed")]
    AllocationFailed {
        /// Number of bytes requested
        size: usize,
    },
    /// Encoding name is not one of the known encodings
    #[error("Unsupported encoding: {name:?}")]
    UnsupportedEncoding {
        /// Name as given by the caller
        name: String,
    },
    /// Access of `len` bytes at `offset` does not fit in the view
    #[error("Out of bounds: {len} bytes at offset {offset} exceed view length {bound}")]
    OutOfBounds {
        /// Offset of the access
        offset: usize,
        /// Number of bytes accessed
        len: usize,
        /// Length of the view
        bound: usize,
    },
    /// Integer does not fit in the requested width and signedness
    #[error("Value out of range: {value} is not within {min}..={max}")]
    ValueOutOfRange {
        /// Value passed by the caller
        value: i128,
        /// Smallest value the target accepts
        min: i128,
        /// Largest value the target accepts
        max: i128,
    },
    /// Input is not valid for the encoding
    #[error("Invalid {encoding} input at position {position}")]
    DecodeError {
        /// Encoding being applied
        encoding: Encoding,
        /// Byte (or char) position of the first invalid element
        position: usize,
    },
    /// Character cannot be represented in the encoding
    #[error("Character {ch:?} at position {position} cannot be encoded as {encoding}")]
    Unencodable {
        /// Target encoding
        encoding: Encoding,
        /// Offending character
        ch: char,
        /// Byte position of the character in the text
        position: usize,
    },
    /// View length is not a multiple of the unit size
    #[error("Invalid length: {len} is not a multiple of {unit}")]
    InvalidLength {
        /// Length of the view
        len: usize,
        /// Required unit size
        unit: usize,
    },
}

pub type Result<T> = core::result::Result<T, BufferError>;
