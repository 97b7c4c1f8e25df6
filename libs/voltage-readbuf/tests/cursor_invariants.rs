//! Decode Buffer Cursor Invariants
//!
//! Property tests for the read cursor:
//! - Monotonic advance by exactly the consumed width
//! - No partial consumption on failure
//! - Peek never moves the cursor
//! - Byte-aligned reads agree with std byte conversions

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use proptest::prelude::*;
use voltage_readbuf::DecodeBuffer;

proptest! {
    #[test]
    fn prop_cursor_advances_by_consumed_bits(
        bytes in prop::collection::vec(any::<u8>(), 0..32),
        widths in prop::collection::vec(0u8..=70, 0..24),
        little_endian in any::<bool>(),
    ) {
        let total_bits = bytes.len() * 8;
        let mut buffer = DecodeBuffer::new(bytes, little_endian);
        let mut expected = 0usize;

        for width in widths {
            let before = buffer.bit_position();
            match buffer.read_long(width) {
                Ok(_) => expected += usize::from(width),
                Err(e) => {
                    prop_assert!(e.is_parse());
                    prop_assert_eq!(buffer.bit_position(), before);
                }
            }
            prop_assert_eq!(buffer.bit_position(), expected);
            prop_assert!(buffer.bit_position() <= total_bits);
        }
    }

    #[test]
    fn prop_failed_reads_leave_cursor(
        bytes in prop::collection::vec(any::<u8>(), 0..6),
        skip in 0usize..48,
    ) {
        let mut buffer = DecodeBuffer::new(bytes.clone(), false);
        let skip = skip.min(bytes.len() * 8);
        for _ in 0..skip {
            buffer.read_bit().unwrap();
        }
        let before = buffer.bit_position();

        // every read below needs more bits than can possibly remain
        let too_wide = (bytes.len() * 8 - before) + 1;
        if too_wide <= 64 {
            prop_assert!(buffer.read_long(too_wide as u8).is_err());
        }
        if too_wide <= 16 {
            prop_assert!(buffer.read_short(too_wide as u8).is_err());
        }
        prop_assert!(buffer.read_unsigned_byte(0).is_err());
        prop_assert!(buffer.read_unsigned_short(16).is_err());
        prop_assert!(buffer.read_big_integer(8).is_err());
        prop_assert!(buffer.read_double(32).is_err());
        prop_assert_eq!(buffer.bit_position(), before);
    }

    #[test]
    fn prop_peek_is_stable(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
        skip_bits in 0usize..256,
        offset in 0isize..40,
    ) {
        let mut buffer = DecodeBuffer::new(bytes.clone(), false);
        let skip_bits = skip_bits.min(bytes.len() * 8);
        for _ in 0..skip_bits {
            buffer.read_bit().unwrap();
        }
        let before = buffer.bit_position();

        let first = buffer.peek_byte(offset);
        let second = buffer.peek_byte(offset);
        prop_assert_eq!(buffer.bit_position(), before);

        let index = buffer.position() + offset as usize;
        if index < bytes.len() {
            prop_assert_eq!(first.unwrap(), bytes[index]);
            prop_assert_eq!(second.unwrap(), bytes[index]);
        } else {
            prop_assert!(first.is_err());
            prop_assert!(second.is_err());
        }
    }

    #[test]
    fn prop_aligned_u32_matches_std(raw in any::<[u8; 4]>()) {
        let mut big = DecodeBuffer::new(raw.to_vec(), false);
        let mut little = DecodeBuffer::new(raw.to_vec(), true);
        prop_assert_eq!(big.read_unsigned_int(32).unwrap(), u32::from_be_bytes(raw));
        prop_assert_eq!(little.read_unsigned_int(32).unwrap(), u32::from_le_bytes(raw));
    }

    #[test]
    fn prop_aligned_u16_matches_std(raw in any::<[u8; 2]>()) {
        let mut little = DecodeBuffer::new(raw.to_vec(), true);
        prop_assert_eq!(
            little.read_unsigned_int(16).unwrap(),
            u32::from(u16::from_le_bytes(raw))
        );
    }

    #[test]
    fn prop_signed_reads_match_std(raw in any::<[u8; 8]>()) {
        let mut big = DecodeBuffer::new(raw.to_vec(), false);
        let mut little = DecodeBuffer::new(raw.to_vec(), true);
        prop_assert_eq!(big.read_long(64).unwrap(), i64::from_be_bytes(raw));
        prop_assert_eq!(little.read_long(64).unwrap(), i64::from_le_bytes(raw));

        let mut big = DecodeBuffer::new(raw.to_vec(), false);
        prop_assert_eq!(
            big.read_unsigned_big_integer(64).unwrap(),
            u128::from(u64::from_be_bytes(raw))
        );
    }

    #[test]
    fn prop_double_bits_roundtrip(value in any::<f64>()) {
        let mut buffer = DecodeBuffer::new(value.to_be_bytes().to_vec(), false);
        let decoded = buffer.read_double(64).unwrap();
        prop_assert_eq!(decoded.to_bits(), value.to_bits());
    }
}

proptest! {
    #[test]
    fn prop_le_unsigned_long_shifts_by_fixed_32(
        raw in any::<[u8; 8]>(),
        width in 1u8..=63,
    ) {
        let mut buffer = DecodeBuffer::new(raw.to_vec(), true);
        let native = u64::from_be_bytes(raw) >> (64 - u32::from(width));
        prop_assert_eq!(
            buffer.read_unsigned_long(width).unwrap(),
            native.swap_bytes() >> 32
        );
        prop_assert_eq!(buffer.bit_position(), usize::from(width));
    }

    #[test]
    fn prop_le_unsigned_int_shifts_by_field_padding(
        raw in any::<[u8; 4]>(),
        width in 1u8..=32,
    ) {
        let mut buffer = DecodeBuffer::new(raw.to_vec(), true);
        let native = u32::from_be_bytes(raw) >> (32 - u32::from(width));
        prop_assert_eq!(
            buffer.read_unsigned_int(width).unwrap(),
            native.swap_bytes() >> (32 - u32::from(width))
        );
    }

    #[test]
    fn prop_unsigned_big_integer_sign_extends_narrow_fields(
        raw in any::<[u8; 8]>(),
        width in 1u8..64,
        little_endian in any::<bool>(),
    ) {
        let mut buffer = DecodeBuffer::new(raw.to_vec(), little_endian);
        let native = u64::from_be_bytes(raw) >> (64 - u32::from(width));

        let shift = 64 - u32::from(width);
        let mut signed = ((native << shift) as i64) >> shift;
        if little_endian {
            signed = signed.swap_bytes();
        }
        let expected = if signed < 0 {
            (i128::from(signed) + (1i128 << 64)) as u128
        } else {
            signed as u128
        };

        prop_assert_eq!(buffer.read_unsigned_big_integer(width).unwrap(), expected);
    }
}
