//! VoltageEMS Decode Buffer
//!
//! Bit-addressable read cursor used by field-device protocol drivers to
//! pull typed fields out of a received message body.
//!
//! # Key Components
//!
//! - **DecodeBuffer**: bit cursor, bounds checks, peek-ahead and typed reads
//! - **ReadBufError**: parse / runtime / unsupported failure kinds
//! - **ReadObserver**: optional per-field read events (see `TracingObserver`)
//!
//! # Example
//! ```
//! use voltage_readbuf::DecodeBuffer;
//!
//! let mut buffer = DecodeBuffer::new(vec![0b1010_0000, 0x01, 0x00], true);
//! assert!(buffer.read_bit().unwrap());
//! assert_eq!(buffer.read_unsigned_byte(7).unwrap(), 0b010_0000);
//! assert_eq!(buffer.read_unsigned_int(16).unwrap(), 1);
//! ```

pub mod bit_ops;
pub mod buffer;
pub mod byte_order;
pub mod charset;
pub mod error;
pub mod float;
pub mod hooks;

// Re-exports
pub use bytes::Bytes;
pub use buffer::DecodeBuffer;
pub use byte_order::ByteOrder;
pub use charset::{sanitize_encoding_name, Charset};
pub use error::{BitSourceError, ReadBufError, Result};
pub use hooks::{FieldKind, ReadEvent, ReadObserver, ReadValue, TracingObserver};
