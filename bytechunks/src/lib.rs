#![no_std]

//! `bytechunks`: assemble a stream of byte fragments into one view.
//!
//! An [`Assembler`] records fragments as they arrive, without copying them,
//! and produces a single consolidated [`BufferView`](bytebuf::BufferView) on
//! demand. Fragments can be appended directly or pulled from any
//! [`embedded_io::Read`] implementation.
//!
//! ```
//! # use bytebuf::{BufferView, Encoding};
//! # use bytechunks::Assembler;
//! let mut assembler = Assembler::new();
//! assembler.append(BufferView::from_text("Hello, ", Encoding::Utf8).unwrap());
//! assembler.append_bytes(b"world").unwrap();
//!
//! assert_eq!(assembler.len(), 12);
//! assert_eq!(assembler.chunks().count(), 2);
//!
//! let whole = assembler.consolidate().unwrap();
//! assert_eq!(whole.to_text(Encoding::Utf8).unwrap(), "Hello, world");
//! ```
//!
//! Streams with a declared length stop reading once it is reached:
//!
//! ```
//! # use bytechunks::Assembler;
//! let mut reader: &[u8] = b"0123456789";
//! let mut assembler = Assembler::with_expected_len(6);
//!
//! let n = assembler.read_from(&mut reader, 4).unwrap();
//! assert_eq!(n, 6);
//! assert!(assembler.is_complete());
//! assert_eq!(assembler.finish().unwrap().to_vec(), b"012345");
//! ```
//!
//! Assemblers are not `Send`; each stream belongs to one thread.

extern crate alloc;

mod assembler;
mod error;
mod iter;

pub use assembler::{Assembler, DEFAULT_CHUNK_SIZE};
pub use error::{AssemblerError, Result};
pub use iter::Chunks;
