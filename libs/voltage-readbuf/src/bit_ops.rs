//! Bit-level extraction for non byte-aligned protocol fields
//!
//! Bits are numbered MSB-first: bit 0 of a buffer is the most significant
//! bit of its first byte. A field spanning several bytes is assembled most
//! significant byte first; endianness normalization happens afterwards in
//! the buffer.

use crate::error::BitSourceError;

/// Extract an unsigned value of up to 64 bits starting at any bit position
///
/// # Arguments
/// * `bytes` - Source byte array
/// * `start_bit` - Starting bit position (0-indexed, MSB-first)
/// * `bit_length` - Number of bits to extract (0-64)
///
/// # Returns
/// The extracted bits right-aligned in a u64, or `Exhausted` when fewer
/// than `bit_length` bits remain after `start_bit`.
pub fn extract_bits(bytes: &[u8], start_bit: usize, bit_length: u8) -> Result<u64, BitSourceError> {
    debug_assert!(bit_length <= 64, "Bit length out of range: {}", bit_length);

    let requested = usize::from(bit_length);
    let available = (bytes.len() * 8).saturating_sub(start_bit);
    if requested > available {
        return Err(BitSourceError::Exhausted {
            requested,
            available,
        });
    }

    let mut result = 0u64;
    let mut position = start_bit;
    let mut remaining = requested;

    while remaining > 0 {
        let byte = bytes[position / 8];
        let bit_offset = position % 8;
        let take = remaining.min(8 - bit_offset);

        let chunk = (byte >> (8 - bit_offset - take)) & (0xFFu8 >> (8 - take));
        result = (result << take) | u64::from(chunk);

        position += take;
        remaining -= take;
    }

    Ok(result)
}

/// Sign-extend the low `bit_length` bits of `value` to a full i64
pub fn sign_extend(value: u64, bit_length: u8) -> i64 {
    debug_assert!(bit_length > 0, "Bit length must be greater than 0");

    if bit_length >= 64 {
        return value as i64;
    }

    let sign_bit = 1u64 << (bit_length - 1);
    if value & sign_bit != 0 {
        let mask = !((1u64 << bit_length) - 1);
        (value | mask) as i64
    } else {
        value as i64
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_extract_bits_msb_first() {
        let data = [0b1011_0101, 0b1100_1100];

        assert_eq!(extract_bits(&data, 0, 1).unwrap(), 1);
        assert_eq!(extract_bits(&data, 1, 3).unwrap(), 0b011);
        assert_eq!(extract_bits(&data, 4, 4).unwrap(), 0b0101);
    }

    #[test]
    fn test_extract_bits_across_byte_boundary() {
        let data = [0b1011_0101, 0b1100_1100];

        // low nibble of byte 0 followed by high nibble of byte 1
        assert_eq!(extract_bits(&data, 4, 8).unwrap(), 0b0101_1100);
        assert_eq!(extract_bits(&data, 2, 10).unwrap(), 0b11_0101_1100);
    }

    #[test]
    fn test_extract_full_width() {
        let data = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];
        assert_eq!(extract_bits(&data, 0, 64).unwrap(), 0x0123_4567_89AB_CDEF);
        assert_eq!(extract_bits(&data, 0, 32).unwrap(), 0x0123_4567);
    }

    #[test]
    fn test_extract_bits_exhausted() {
        let data = [0xFF, 0xFF];

        let err = extract_bits(&data, 12, 8).unwrap_err();
        assert_eq!(
            err,
            BitSourceError::Exhausted {
                requested: 8,
                available: 4
            }
        );

        let err = extract_bits(&data, 20, 1).unwrap_err();
        assert_eq!(
            err,
            BitSourceError::Exhausted {
                requested: 1,
                available: 0
            }
        );
    }

    #[test]
    fn test_extract_zero_bits() {
        assert_eq!(extract_bits(&[], 0, 0).unwrap(), 0);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0b1111, 4), -1);
        assert_eq!(sign_extend(0b1000, 4), -8);
        assert_eq!(sign_extend(0b0111, 4), 7);
        assert_eq!(sign_extend(0x80, 8), -128);
        assert_eq!(sign_extend(u64::MAX, 64), -1);
    }
}
