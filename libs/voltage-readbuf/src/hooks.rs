//! Read event hooks
//!
//! The buffer does not log. Drivers that want per-field diagnostics attach
//! a [`ReadObserver`]; every successful typed read is reported with its
//! value, width and starting bit position.

use std::fmt;
use tracing::trace;

/// Kind of field produced by a typed read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bit,
    UnsignedByte,
    UnsignedShort,
    UnsignedInt,
    UnsignedLong,
    UnsignedBigInteger,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bit => "bit",
            Self::UnsignedByte => "unsigned_byte",
            Self::UnsignedShort => "unsigned_short",
            Self::UnsignedInt => "unsigned_int",
            Self::UnsignedLong => "unsigned_long",
            Self::UnsignedBigInteger => "unsigned_big_integer",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded value carried by a [`ReadEvent`]
#[derive(Debug, Clone, PartialEq)]
pub enum ReadValue {
    Bool(bool),
    Unsigned(u128),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ReadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Unsigned(v) => write!(f, "{}", v),
            Self::Signed(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "{:?}", v),
        }
    }
}

/// One successful typed read
#[derive(Debug, Clone, PartialEq)]
pub struct ReadEvent {
    pub kind: FieldKind,
    /// Bits consumed by the read
    pub bit_length: usize,
    /// Cursor position (in bits) before the read
    pub bit_position: usize,
    pub value: ReadValue,
}

/// Receiver of read events
pub trait ReadObserver: Send + Sync {
    fn on_read(&self, event: &ReadEvent);
}

impl<F> ReadObserver for F
where
    F: Fn(&ReadEvent) + Send + Sync,
{
    fn on_read(&self, event: &ReadEvent) {
        self(event)
    }
}

/// Observer forwarding events to `tracing` at TRACE level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ReadObserver for TracingObserver {
    fn on_read(&self, event: &ReadEvent) {
        trace!(
            kind = event.kind.as_str(),
            bits = event.bit_length,
            position = event.bit_position,
            value = %event.value,
            "Read field"
        );
    }
}
