//! Source text decoding.
//!
//! Bytes are decoded into text before lexing; a decoding failure is fatal
//! for the whole input.

use alloc::borrow::Cow;
use alloc::string::String;

/// Supported source encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8, the default.
    #[default]
    Utf8,
    /// 7-bit ASCII.
    Ascii,
    /// ISO-8859-1.
    Latin1,
    /// UTF-16, little endian.
    Utf16Le,
    /// UTF-16, big endian.
    Utf16Be,
}

/// Errors raised while decoding source bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The encoding label is not recognized.
    #[error("Unknown encoding `{0}`")]
    UnknownEncoding(String),
    /// The bytes are not valid in the requested encoding.
    #[error("Invalid {encoding:?} input at byte {pos}")]
    InvalidInput {
        /// The encoding used.
        encoding: Encoding,
        /// Offset of the first invalid byte.
        pos: usize,
    },
}

impl Encoding {
    /// Look up an encoding by one of its common labels, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownEncoding`] for unrecognized labels.
    pub fn from_label(label: &str) -> Result<Self, DecodeError> {
        let label = label.trim();
        let matches = |names: &[&str]| names.iter().any(|name| name.eq_ignore_ascii_case(label));
        if matches(&["utf-8", "utf8"]) {
            Ok(Encoding::Utf8)
        } else if matches(&["ascii", "us-ascii"]) {
            Ok(Encoding::Ascii)
        } else if matches(&["latin-1", "latin1", "iso-8859-1", "iso8859-1"]) {
            Ok(Encoding::Latin1)
        } else if matches(&["utf-16le", "utf16le"]) {
            Ok(Encoding::Utf16Le)
        } else if matches(&["utf-16be", "utf16be"]) {
            Ok(Encoding::Utf16Be)
        } else {
            Err(DecodeError::UnknownEncoding(label.into()))
        }
    }

    /// Decode `bytes`, borrowing them when they are already valid UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidInput`] at the first invalid byte.
    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, DecodeError> {
        let invalid = |pos| DecodeError::InvalidInput {
            encoding: self,
            pos,
        };
        match self {
            Encoding::Utf8 => core::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|err| invalid(err.valid_up_to())),
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(pos) => Err(invalid(pos)),
                None => core::str::from_utf8(bytes)
                    .map(Cow::Borrowed)
                    .map_err(|err| invalid(err.valid_up_to())),
            },
            Encoding::Latin1 => Ok(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())),
            Encoding::Utf16Le | Encoding::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return Err(invalid(bytes.len() - 1));
                }
                let units = bytes.chunks_exact(2).map(|pair| {
                    let pair = [pair[0], pair[1]];
                    if self == Encoding::Utf16Le {
                        u16::from_le_bytes(pair)
                    } else {
                        u16::from_be_bytes(pair)
                    }
                });
                let mut text = String::with_capacity(bytes.len() / 2);
                let mut pos = 0;
                for unit in char::decode_utf16(units) {
                    let c = unit.map_err(|_| invalid(pos))?;
                    pos += c.len_utf16() * 2;
                    text.push(c);
                }
                Ok(Cow::Owned(text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Encoding::from_label("UTF-8"), Ok(Encoding::Utf8));
        assert_eq!(Encoding::from_label(" latin1 "), Ok(Encoding::Latin1));
        assert!(matches!(
            Encoding::from_label("ebcdic"),
            Err(DecodeError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn test_utf8_borrows() {
        let decoded = Encoding::Utf8.decode(b"select 1").unwrap();
        assert!(matches!(decoded, Cow::Borrowed("select 1")));
        assert_eq!(
            Encoding::Utf8.decode(b"ab\xff"),
            Err(DecodeError::InvalidInput {
                encoding: Encoding::Utf8,
                pos: 2
            })
        );
    }

    #[test]
    fn test_single_byte_encodings() {
        assert_eq!(Encoding::Latin1.decode(b"caf\xe9").unwrap(), "caf\u{e9}");
        assert!(Encoding::Ascii.decode(b"caf\xe9").is_err());
    }

    #[test]
    fn test_utf16() {
        let le = [b'a', 0, b'b', 0];
        let be = [0, b'a', 0, b'b'];
        assert_eq!(Encoding::Utf16Le.decode(&le).unwrap(), "ab");
        assert_eq!(Encoding::Utf16Be.decode(&be).unwrap(), "ab");
        assert_eq!(
            Encoding::Utf16Le.decode(&[0x00, 0xD8, b'a', 0]),
            Err(DecodeError::InvalidInput {
                encoding: Encoding::Utf16Le,
                pos: 0
            })
        );
    }
}
