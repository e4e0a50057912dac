use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::{alphabet, Engine as _};

use crate::error::{BufferError, Result};

/// Encoding used when the caller does not name one.
pub const DEFAULT_ENCODING: Encoding = Encoding::Utf8;

// Unpadded on output, padding optional on input.
const BASE64_URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Character encodings understood by the text codec.
///
/// "Encode" always means text to bytes and "decode" bytes to text, even for
/// `Hex` and the base64 variants where the text side is itself a byte
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// Validated UTF-8
    #[default]
    Utf8,
    /// UTF-16, little-endian code units
    Utf16Le,
    /// One byte per char, U+0000..=U+00FF
    Latin1,
    /// Seven-bit ASCII; the high bit is rejected in both directions
    Ascii,
    /// Two lowercase hex digits per byte
    Hex,
    /// Standard alphabet, padded
    Base64,
    /// URL-safe alphabet, unpadded
    Base64Url,
}

impl Encoding {
    /// Canonical lowercase name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Base64Url => "base64url",
        }
    }

    /// Whether `name` resolves to a known encoding.
    #[must_use]
    pub fn is_known(name: &str) -> bool {
        name.parse::<Encoding>().is_ok()
    }

    /// Converts text to bytes.
    ///
    /// # Errors
    ///
    /// - `BufferError::Unencodable` for chars outside the Latin-1 or ASCII range
    /// - `BufferError::DecodeError` for malformed hex or base64 text
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Encoding::Latin1 => encode_single_byte(self, text, 0xFF),
            Encoding::Ascii => encode_single_byte(self, text, 0x7F),
            Encoding::Hex => hex::decode(text).map_err(|err| {
                let position = match err {
                    hex::FromHexError::InvalidHexCharacter { index, .. } => index,
                    hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
                        text.len()
                    }
                };
                BufferError::DecodeError {
                    encoding: self,
                    position,
                }
            }),
            Encoding::Base64 => STANDARD
                .decode(text)
                .map_err(|err| base64_error(self, text, &err)),
            Encoding::Base64Url => BASE64_URL
                .decode(text)
                .map_err(|err| base64_error(self, text, &err)),
        }
    }

    /// Converts bytes to text.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::DecodeError` with the position of the first
    /// invalid byte for `Utf8`, `Utf16Le` and `Ascii`. The other encodings
    /// accept any byte sequence.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            Encoding::Utf8 => core::str::from_utf8(bytes)
                .map(ToString::to_string)
                .map_err(|err| BufferError::DecodeError {
                    encoding: self,
                    position: err.valid_up_to(),
                }),
            Encoding::Utf16Le => decode_utf16le(bytes),
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(position) => Err(BufferError::DecodeError {
                    encoding: self,
                    position,
                }),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
            Encoding::Hex => Ok(hex::encode(bytes)),
            Encoding::Base64 => Ok(STANDARD.encode(bytes)),
            Encoding::Base64Url => Ok(BASE64_URL.encode(bytes)),
        }
    }

    /// Number of bytes `text` occupies once encoded.
    ///
    /// # Errors
    ///
    /// Same as [`Encoding::encode`].
    pub fn byte_length(self, text: &str) -> Result<usize> {
        match self {
            Encoding::Utf8 => Ok(text.len()),
            Encoding::Utf16Le => Ok(text.encode_utf16().count() * 2),
            _ => self.encode(text).map(|bytes| bytes.len()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = BufferError;

    fn from_str(name: &str) -> Result<Self> {
        let encoding = match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Encoding::Utf8,
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Encoding::Utf16Le,
            "latin1" | "binary" => Encoding::Latin1,
            "ascii" => Encoding::Ascii,
            "hex" => Encoding::Hex,
            "base64" => Encoding::Base64,
            "base64url" => Encoding::Base64Url,
            _ => {
                return Err(BufferError::UnsupportedEncoding {
                    name: name.to_string(),
                })
            }
        };
        Ok(encoding)
    }
}

/// Longest prefix of `encoded` no longer than `limit` that ends on a unit
/// boundary of `encoding`.
///
/// A unit is one UTF-8 char, one UTF-16 code point (a surrogate pair counts
/// as one unit) or a single byte for the other encodings.
#[must_use]
pub fn truncate_to_unit(encoding: Encoding, encoded: &[u8], limit: usize) -> usize {
    if limit >= encoded.len() {
        return encoded.len();
    }
    match encoding {
        Encoding::Utf8 => {
            let mut end = limit;
            while end > 0 && encoded.get(end).is_some_and(|&b| b & 0xC0 == 0x80) {
                end -= 1;
            }
            end
        }
        Encoding::Utf16Le => {
            let mut end = limit & !1;
            if end >= 2 {
                let last = u16::from_le_bytes([encoded[end - 2], encoded[end - 1]]);
                if (0xD800..=0xDBFF).contains(&last) {
                    end -= 2;
                }
            }
            end
        }
        _ => limit,
    }
}

fn encode_single_byte(encoding: Encoding, text: &str, max: u32) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    for (position, ch) in text.char_indices() {
        let code = u32::from(ch);
        if code > max {
            return Err(BufferError::Unencodable {
                encoding,
                ch,
                position,
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        out.push(code as u8);
    }
    Ok(out)
}

fn decode_utf16le(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(BufferError::DecodeError {
            encoding: Encoding::Utf16Le,
            position: bytes.len() - 1,
        });
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));

    let mut out = String::with_capacity(bytes.len() / 2);
    let mut position = 0;
    for decoded in char::decode_utf16(units) {
        match decoded {
            Ok(ch) => {
                out.push(ch);
                position += ch.len_utf16() * 2;
            }
            Err(_) => {
                return Err(BufferError::DecodeError {
                    encoding: Encoding::Utf16Le,
                    position,
                })
            }
        }
    }
    Ok(out)
}

fn base64_error(encoding: Encoding, text: &str, err: &base64::DecodeError) -> BufferError {
    let position = match *err {
        base64::DecodeError::InvalidByte(index, _)
        | base64::DecodeError::InvalidLastSymbol(index, _) => index,
        base64::DecodeError::InvalidLength(_) | base64::DecodeError::InvalidPadding => text.len(),
    };
    BufferError::DecodeError { encoding, position }
}
