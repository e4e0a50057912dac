//! Stateless conversions between bytes and text or fixed-width numbers.

mod int;
mod text;

pub use int::{decode_int, encode_int, Endian, IntSpec, IntWidth};
pub(crate) use int::{read_array, write_array};
pub use text::{truncate_to_unit, Encoding, DEFAULT_ENCODING};
