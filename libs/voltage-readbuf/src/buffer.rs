//! Bit-addressable decode buffer
//!
//! `DecodeBuffer` wraps one complete message body and hands out typed fields
//! in the order a driver's layout dictates. The cursor counts bits and only
//! ever moves forward; a read that fails leaves it where it was.
//!
//! # Endianness
//!
//! Fields are extracted MSB-first. In little-endian mode the natively read
//! value is byte-reversed across the full register width (16/32/64 bits).
//! Unsigned int reads then shift right by the padding of the field width.
//! Unsigned long reads always shift right by 32, so only 32-bit fields come
//! out exact. Existing drivers depend on both, including for odd widths.

use std::ops::{Deref, DerefMut};

use bytes::Bytes;
use tracing::debug;

use crate::bit_ops::{extract_bits, sign_extend};
use crate::byte_order::ByteOrder;
use crate::charset::Charset;
use crate::error::{BitSourceError, ReadBufError, Result};
use crate::float::{decode_half, f32_from_signed, f64_from_signed};
use crate::hooks::{FieldKind, ReadEvent, ReadObserver, ReadValue};

/// Read cursor over an immutable message body
///
/// Not synchronized: confine a buffer to one decode pass on one thread.
pub struct DecodeBuffer {
    bytes: Bytes,
    bit_cursor: usize,
    byte_order: ByteOrder,
    observer: Option<Box<dyn ReadObserver>>,
}

impl std::fmt::Debug for DecodeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeBuffer")
            .field("total_bytes", &self.bytes.len())
            .field("bit_cursor", &self.bit_cursor)
            .field("byte_order", &self.byte_order)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// Temporary cursor position, restored when dropped
struct CursorGuard<'a> {
    buffer: &'a mut DecodeBuffer,
    saved: usize,
}

impl<'a> CursorGuard<'a> {
    fn new(buffer: &'a mut DecodeBuffer) -> Self {
        let saved = buffer.bit_cursor;
        Self { buffer, saved }
    }
}

impl Deref for CursorGuard<'_> {
    type Target = DecodeBuffer;

    fn deref(&self) -> &DecodeBuffer {
        self.buffer
    }
}

impl DerefMut for CursorGuard<'_> {
    fn deref_mut(&mut self) -> &mut DecodeBuffer {
        self.buffer
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        self.buffer.bit_cursor = self.saved;
    }
}

/// Reject bit lengths outside `1..=max`
fn check_bit_length(type_name: &str, bit_length: u8, max: u8) -> Result<()> {
    if bit_length == 0 {
        return Err(ReadBufError::parse(format!(
            "{} must contain at least 1 bit",
            type_name
        )));
    }
    if bit_length > max {
        return Err(ReadBufError::parse(format!(
            "{} can only contain max {} bits",
            type_name, max
        )));
    }
    Ok(())
}

impl DecodeBuffer {
    /// Wrap a message body
    ///
    /// # Arguments
    /// * `bytes` - Complete message body; never mutated afterwards
    /// * `little_endian` - Byte order for every multi-byte numeric read
    pub fn new(bytes: impl Into<Bytes>, little_endian: bool) -> Self {
        Self::with_byte_order(bytes, ByteOrder::from_little_endian(little_endian))
    }

    /// Wrap a message body with an explicit byte order
    pub fn with_byte_order(bytes: impl Into<Bytes>, byte_order: ByteOrder) -> Self {
        let bytes = bytes.into();
        debug!("Creating read buffer: {} bytes, {}", bytes.len(), byte_order);
        Self {
            bytes,
            bit_cursor: 0,
            byte_order,
            observer: None,
        }
    }

    /// Attach an observer notified after every successful typed read
    pub fn with_observer(mut self, observer: impl ReadObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    // ==================== Position & Bounds ====================

    /// Cursor position in whole bytes (truncated)
    pub fn position(&self) -> usize {
        self.bit_cursor / 8
    }

    /// Cursor position in bits
    pub fn bit_position(&self) -> usize {
        self.bit_cursor
    }

    /// Total byte length of the wrapped data
    pub fn total_length(&self) -> usize {
        self.bytes.len()
    }

    /// Bits left after the cursor
    pub fn remaining_bits(&self) -> usize {
        self.bytes.len() * 8 - self.bit_cursor
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn is_little_endian(&self) -> bool {
        self.byte_order.is_little_endian()
    }

    /// Byte-granular availability check
    ///
    /// Compares `bits / 8` (truncated) with the whole bytes left after
    /// `position()`. A sub-byte remainder in `bits` is ignored, so this can
    /// answer true for a request that needs more bits than remain.
    pub fn has_more(&self, bits: usize) -> bool {
        bits / 8 <= self.total_length() - self.position()
    }

    /// Raw bytes in `[start, end)`, independent of the cursor
    pub fn get_bytes(&self, start: usize, end: usize) -> Result<Bytes> {
        let len = self.bytes.len();
        if start > end || end > len {
            let index = if start > len { start } else { end };
            return Err(BitSourceError::OutOfRange {
                index: index as isize,
                len,
            }
            .into());
        }
        Ok(self.bytes.slice(start..end))
    }

    /// Read the byte at `position() + offset` without moving the cursor
    pub fn peek_byte(&mut self, offset: isize) -> Result<u8> {
        let len = self.total_length();
        let index = (self.position() as isize).saturating_add(offset);

        let mut guard = CursorGuard::new(self);
        let target = usize::try_from(index)
            .ok()
            .filter(|&i| i < len)
            .ok_or(BitSourceError::OutOfRange { index, len })?;

        guard.bit_cursor = target * 8;
        let value = guard.take_bits(8)?;
        Ok(value as u8)
    }

    // ==================== Unsigned Reads ====================

    pub fn read_bit(&mut self) -> Result<bool> {
        let start = self.bit_cursor;
        let value = self.take_bits(1)? != 0;
        self.emit(FieldKind::Bit, 1, start, || ReadValue::Bool(value));
        Ok(value)
    }

    /// Unsigned value of 1-7 bits
    pub fn read_unsigned_byte(&mut self, bit_length: u8) -> Result<u8> {
        check_bit_length("unsigned byte", bit_length, 7)?;
        let start = self.bit_cursor;
        let value = self.take_bits(bit_length)? as u8;
        self.emit(FieldKind::UnsignedByte, usize::from(bit_length), start, || {
            ReadValue::Unsigned(u128::from(value))
        });
        Ok(value)
    }

    /// Unsigned value of 1-15 bits, never byte-swapped
    pub fn read_unsigned_short(&mut self, bit_length: u8) -> Result<u16> {
        check_bit_length("unsigned short", bit_length, 15)?;
        let start = self.bit_cursor;
        let value = self.take_bits(bit_length)? as u16;
        self.emit(FieldKind::UnsignedShort, usize::from(bit_length), start, || {
            ReadValue::Unsigned(u128::from(value))
        });
        Ok(value)
    }

    /// Unsigned value of 1-32 bits
    pub fn read_unsigned_int(&mut self, bit_length: u8) -> Result<u32> {
        check_bit_length("unsigned int", bit_length, 32)?;
        let start = self.bit_cursor;
        let raw = self.take_bits(bit_length)? as u32;
        let value = if self.is_little_endian() {
            raw.swap_bytes() >> (32 - u32::from(bit_length))
        } else {
            raw
        };
        self.emit(FieldKind::UnsignedInt, usize::from(bit_length), start, || {
            ReadValue::Unsigned(u128::from(value))
        });
        Ok(value)
    }

    /// Unsigned value of 1-63 bits
    ///
    /// Little-endian: the 64-bit reversal is shifted right by a fixed 32,
    /// whatever the field width.
    pub fn read_unsigned_long(&mut self, bit_length: u8) -> Result<u64> {
        check_bit_length("unsigned long", bit_length, 63)?;
        let start = self.bit_cursor;
        let raw = self.take_bits(bit_length)?;
        let value = if self.is_little_endian() {
            raw.swap_bytes() >> 32
        } else {
            raw
        };
        self.emit(FieldKind::UnsignedLong, usize::from(bit_length), start, || {
            ReadValue::Unsigned(u128::from(value))
        });
        Ok(value)
    }

    /// Unsigned value of 1-64 bits
    ///
    /// The bits are sign-extended to a signed 64-bit quantity, byte-reversed
    /// in little-endian mode, and corrected by 2^64 when negative. A narrow
    /// field with its top bit set therefore lands near 2^64.
    pub fn read_unsigned_big_integer(&mut self, bit_length: u8) -> Result<u128> {
        check_bit_length("unsigned big integer", bit_length, 64)?;
        let start = self.bit_cursor;
        let mut signed = sign_extend(self.take_bits(bit_length)?, bit_length);
        if self.is_little_endian() {
            signed = signed.swap_bytes();
        }
        let wide = if signed >= 0 {
            i128::from(signed)
        } else {
            // 2 * i64::MAX + 2 == 2^64
            i128::from(signed) + 2 * i128::from(i64::MAX) + 2
        };
        let value = wide as u128;
        self.emit(FieldKind::UnsignedBigInteger, usize::from(bit_length), start, || {
            ReadValue::Unsigned(value)
        });
        Ok(value)
    }

    // ==================== Signed Reads ====================

    /// Signed value of 1-8 bits, never byte-swapped
    pub fn read_byte(&mut self, bit_length: u8) -> Result<i8> {
        check_bit_length("byte", bit_length, 8)?;
        let start = self.bit_cursor;
        let value = sign_extend(self.take_bits(bit_length)?, bit_length) as i8;
        self.emit(FieldKind::Byte, usize::from(bit_length), start, || {
            ReadValue::Signed(i64::from(value))
        });
        Ok(value)
    }

    /// Signed value of 1-16 bits
    pub fn read_short(&mut self, bit_length: u8) -> Result<i16> {
        check_bit_length("short", bit_length, 16)?;
        let start = self.bit_cursor;
        let mut value = sign_extend(self.take_bits(bit_length)?, bit_length) as i16;
        if self.is_little_endian() {
            value = value.swap_bytes();
        }
        self.emit(FieldKind::Short, usize::from(bit_length), start, || {
            ReadValue::Signed(i64::from(value))
        });
        Ok(value)
    }

    /// Signed value of 1-32 bits
    pub fn read_int(&mut self, bit_length: u8) -> Result<i32> {
        let start = self.bit_cursor;
        let value = self.take_int(bit_length)?;
        self.emit(FieldKind::Int, usize::from(bit_length), start, || {
            ReadValue::Signed(i64::from(value))
        });
        Ok(value)
    }

    /// Signed value of 1-64 bits
    pub fn read_long(&mut self, bit_length: u8) -> Result<i64> {
        let start = self.bit_cursor;
        let value = self.take_long(bit_length)?;
        self.emit(FieldKind::Long, usize::from(bit_length), start, || ReadValue::Signed(value));
        Ok(value)
    }

    /// Signed arbitrary-width integers are not supported
    pub fn read_big_integer(&mut self, _bit_length: u8) -> Result<i128> {
        Err(ReadBufError::unsupported("not implemented yet"))
    }

    // ==================== Floating Point ====================

    /// Half (16) or single (32) precision float
    pub fn read_float(&mut self, bit_length: u8) -> Result<f32> {
        let start = self.bit_cursor;
        let value = match bit_length {
            16 => self.take_half()?,
            32 => f32_from_signed(self.take_int(32)?),
            _ => {
                return Err(ReadBufError::unsupported(
                    "unsupported bit length (only 16 and 32 supported)",
                ))
            },
        };
        self.emit(FieldKind::Float, usize::from(bit_length), start, || {
            ReadValue::Float(f64::from(value))
        });
        Ok(value)
    }

    /// Double precision float, 64 bits only
    pub fn read_double(&mut self, bit_length: u8) -> Result<f64> {
        if bit_length != 64 {
            return Err(ReadBufError::unsupported(
                "unsupported bit length (only 64 supported)",
            ));
        }
        let start = self.bit_cursor;
        let value = f64_from_signed(self.take_long(64)?);
        self.emit(FieldKind::Double, usize::from(bit_length), start, || ReadValue::Float(value));
        Ok(value)
    }

    /// Decimal values are not supported
    pub fn read_big_decimal(&mut self, _bit_length: u8) -> Result<f64> {
        Err(ReadBufError::unsupported("not implemented yet"))
    }

    // ==================== Strings ====================

    /// Fixed-length string of `bit_length / 8` bytes
    ///
    /// Stops early once `has_more(8)` turns false, so a truncated body
    /// yields the bytes that are there. A byte read that fails inside the
    /// loop surfaces as `ReadBufError::Runtime` and the cursor is restored.
    pub fn read_string(&mut self, bit_length: usize, encoding: &str) -> Result<String> {
        let charset = Charset::for_name(encoding)?;
        let start = self.bit_cursor;
        let byte_count = bit_length / 8;

        let mut raw = Vec::with_capacity(byte_count.min(self.total_length()));
        for _ in 0..byte_count {
            if !self.has_more(8) {
                break;
            }
            match self.take_bits(8) {
                Ok(byte) => raw.push(byte as u8),
                Err(e) => {
                    self.bit_cursor = start;
                    return Err(ReadBufError::runtime(e));
                },
            }
        }

        let value = charset.decode(&raw);
        self.emit(FieldKind::String, raw.len() * 8, start, || {
            ReadValue::Text(value.clone())
        });
        Ok(value)
    }

    // ==================== Internals ====================

    /// Consume `bit_length` bits, or fail without moving the cursor
    fn take_bits(&mut self, bit_length: u8) -> Result<u64> {
        let value = extract_bits(&self.bytes, self.bit_cursor, bit_length)?;
        self.bit_cursor += usize::from(bit_length);
        Ok(value)
    }

    fn take_int(&mut self, bit_length: u8) -> Result<i32> {
        check_bit_length("int", bit_length, 32)?;
        let value = sign_extend(self.take_bits(bit_length)?, bit_length) as i32;
        Ok(if self.is_little_endian() {
            value.swap_bytes()
        } else {
            value
        })
    }

    fn take_long(&mut self, bit_length: u8) -> Result<i64> {
        check_bit_length("long", bit_length, 64)?;
        let value = sign_extend(self.take_bits(bit_length)?, bit_length);
        Ok(if self.is_little_endian() {
            value.swap_bytes()
        } else {
            value
        })
    }

    /// Sign (1), exponent (5) and fraction (10) read as one 16-bit unit
    fn take_half(&mut self) -> Result<f32> {
        let start = self.bit_cursor;
        let bits = self.take_bits(16)?;
        let sign = bits >> 15 != 0;
        let exponent = ((bits >> 10) & 0x1F) as u8;
        let fraction = (bits & 0x3FF) as u16;
        decode_half(sign, exponent, fraction).inspect_err(|_| self.bit_cursor = start)
    }

    fn emit<F>(&self, kind: FieldKind, bit_length: usize, start: usize, value: F)
    where
        F: FnOnce() -> ReadValue,
    {
        if let Some(observer) = &self.observer {
            observer.on_read(&ReadEvent {
                kind,
                bit_length,
                bit_position: start,
                value: value(),
            });
        }
    }
}
