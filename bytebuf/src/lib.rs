#![no_std]

//! `bytebuf`: reference-counted byte stores with aliasing views.
//!
//! A [`ByteStore`] owns one fixed-capacity region of memory. A [`BufferView`]
//! is a window (offset + length) into a store. Slicing a view gives another
//! window into the same store without copying, so a write through one view is
//! visible through every overlapping view. The store is freed when its last
//! view is dropped.
//!
//! The [`codec`] module converts between bytes and text in a fixed set of
//! [`Encoding`]s, and between bytes and fixed-width integers with explicit
//! [`Endian`]ness.
//!
//! This crate is `no_std` and needs `alloc`. Enable the optional `std` feature
//! to turn on the `std` features of the dependencies:
//! ```toml
//! [dependencies]
//! bytebuf = { version = "0.1", features = ["std"] }
//! ```
//!
//! # Aliasing
//!
//! ```
//! # use bytebuf::{BufferView, Encoding};
//! let hello = BufferView::from_text("Hello", Encoding::Utf8).unwrap();
//! let head = hello.slice(0, 2);
//!
//! head.set(0, b'J').unwrap();
//! assert_eq!(hello.to_text(Encoding::Utf8).unwrap(), "Jello");
//!
//! // `from_view` copies, so the source is left alone
//! let copy = BufferView::from_view(&hello).unwrap();
//! copy.set(0, b'Y').unwrap();
//! assert_eq!(hello.get(0), Some(b'J'));
//! ```
//!
//! # Text
//!
//! Text is encoded strictly: characters an encoding cannot represent and
//! bytes that are not valid for it are errors, never replaced or stripped.
//!
//! ```
//! # use bytebuf::{BufferError, BufferView, Encoding};
//! let view = BufferView::from_text("68656c6c6f", Encoding::Hex).unwrap();
//! assert_eq!(view.to_text(Encoding::Base64).unwrap(), "aGVsbG8=");
//!
//! let invalid = BufferView::from_bytes(&[0xC3, 0x28]).unwrap();
//! assert!(matches!(
//!     invalid.to_text(Encoding::Utf8),
//!     Err(BufferError::DecodeError { position: 0, .. })
//! ));
//! ```
//!
//! Writes that do not fit are truncated without splitting a character:
//!
//! ```
//! # use bytebuf::{BufferView, Encoding};
//! let view = BufferView::alloc(2).unwrap();
//! assert_eq!(view.write("€", 0, Encoding::Utf8).unwrap(), 0);
//! ```
//!
//! # Integers
//!
//! ```
//! # use bytebuf::{BufferError, BufferView, Endian, IntSpec, IntWidth};
//! let view = BufferView::alloc(4).unwrap();
//! let spec = IntSpec::signed(IntWidth::W16, Endian::Little);
//!
//! view.write_int(-2, 0, spec).unwrap();
//! assert_eq!(view.to_vec(), [0xFE, 0xFF, 0, 0]);
//! assert_eq!(view.read_int(0, spec).unwrap(), -2);
//!
//! // No silent wraparound
//! assert!(matches!(
//!     view.write_int(40_000, 0, spec),
//!     Err(BufferError::ValueOutOfRange { .. })
//! ));
//! ```
//!
//! # Threads
//!
//! Stores and views are neither `Send` nor `Sync`. Give each thread its own
//! copy made with [`BufferView::from_view`] or [`BufferView::to_vec`].

extern crate alloc;

pub mod codec;
mod error;
mod iter;
mod store;
mod view;

pub use codec::{Encoding, Endian, IntSpec, IntWidth, DEFAULT_ENCODING};
pub use error::{BufferError, Result};
pub use iter::Bytes;
pub use store::{ByteStore, Init, MAX_LENGTH};
pub use view::BufferView;
