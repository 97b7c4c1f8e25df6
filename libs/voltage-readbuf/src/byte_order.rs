//! Byte order of a decode buffer
//!
//! A buffer is either big-endian or little-endian for its whole lifetime.
//! Mixed word orders (CDAB/BADC) belong to register-oriented protocols and
//! are not expressed here.

/// Byte order applied to every multi-byte numeric read
///
/// For 32-bit value `0x12345678` on the wire:
/// - `BigEndian (ABCD)`: [0x12, 0x34, 0x56, 0x78]
/// - `LittleEndian (DCBA)`: [0x78, 0x56, 0x34, 0x12]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Most significant byte first (network byte order)
    #[default]
    BigEndian,

    /// Least significant byte first
    LittleEndian,
}

impl ByteOrder {
    /// Map the legacy `little_endian` constructor flag
    pub fn from_little_endian(little_endian: bool) -> Self {
        if little_endian {
            Self::LittleEndian
        } else {
            Self::BigEndian
        }
    }

    pub fn is_little_endian(&self) -> bool {
        matches!(self, Self::LittleEndian)
    }

    /// Get descriptive name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BigEndian => "ABCD (Big-Endian)",
            Self::LittleEndian => "DCBA (Little-Endian)",
        }
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
