use bytebuf::BufferError;
use thiserror::Error;

/// Error types for `Assembler` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum AssemblerError {
    /// Allocating or copying a view failed
    #[error(transparent)]
    Buffer(#[from] BufferError),
    /// The reader reported a failure
    #[error("Read failed: {0:?}")]
    Io(embedded_io::ErrorKind),
    /// A zero chunk size was requested for reading
    #[error("Invalid chunk size: must be greater than zero")]
    InvalidChunkSize,
}

pub type Result<T> = core::result::Result<T, AssemblerError>;
