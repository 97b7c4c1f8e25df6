//! Character sets for fixed-length string fields
//!
//! Driver schemas name encodings loosely ("UTF-8", "'UTF-8'", "utf_16le").
//! Names are reduced to their ASCII alphanumerics before lookup, so
//! `"UTF-8"` resolves as `"UTF8"`. Malformed input is replaced with
//! U+FFFD rather than rejected.

use crate::error::{ReadBufError, Result};

/// Supported string field encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    Utf8,
    Ascii,
    Latin1,
    /// UTF-16 honoring a leading byte order mark, big-endian otherwise
    Utf16,
    Utf16Be,
    Utf16Le,
}

/// Strip every character outside `[a-zA-Z0-9]`
pub fn sanitize_encoding_name(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).collect()
}

impl Charset {
    /// Resolve an encoding name after sanitizing it
    ///
    /// Unknown names fail; there is no silent default.
    pub fn for_name(name: &str) -> Result<Self> {
        let sanitized = sanitize_encoding_name(name).to_ascii_uppercase();
        match sanitized.as_str() {
            "UTF8" => Ok(Self::Utf8),
            "ASCII" | "USASCII" => Ok(Self::Ascii),
            "ISO88591" | "LATIN1" | "ISOLATIN1" => Ok(Self::Latin1),
            "UTF16" => Ok(Self::Utf16),
            "UTF16BE" => Ok(Self::Utf16Be),
            "UTF16LE" => Ok(Self::Utf16Le),
            _ => Err(ReadBufError::unsupported(format!(
                "unsupported character encoding: {:?}",
                name
            ))),
        }
    }

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
            Self::Utf16 => "UTF-16",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
        }
    }

    /// Decode bytes into a string
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Ascii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        char::from(b)
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Utf16 => match bytes {
                [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
                [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
                _ => decode_utf16(bytes, u16::from_be_bytes),
            },
            Self::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Self::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
        }
    }
}

impl std::fmt::Display for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let dangling = !chunks.remainder().is_empty();

    let mut decoded: String = char::decode_utf16(chunks.map(|pair| unit([pair[0], pair[1]])))
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();

    if dangling {
        decoded.push(char::REPLACEMENT_CHARACTER);
    }
    decoded
}
