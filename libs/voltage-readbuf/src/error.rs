//! Decode buffer error types
//!
//! Three failure kinds are kept apart so that drivers can match on them:
//! parse failures, runtime failures raised by string decoding, and
//! operations that are not supported at all.

use thiserror::Error;

/// Result type for voltage-readbuf operations
pub type Result<T> = std::result::Result<T, ReadBufError>;

/// Low-level failure of the underlying bit source
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitSourceError {
    /// Fewer bits remain than the read requires
    #[error("Bit source exhausted: requested {requested} bits, {available} available")]
    Exhausted { requested: usize, available: usize },

    /// Seek target lies outside the wrapped bytes
    #[error("Byte index {index} out of range for {len} bytes")]
    OutOfRange { index: isize, len: usize },
}

/// Decode buffer errors
#[derive(Debug, Error, Clone)]
pub enum ReadBufError {
    /// Invalid bit length, exhausted source or malformed value
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<BitSourceError>,
    },

    /// Per-byte failure inside `read_string`
    #[error("Runtime error: {source}")]
    Runtime {
        #[source]
        source: Box<ReadBufError>,
    },

    /// Operation or width not supported
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl From<BitSourceError> for ReadBufError {
    fn from(err: BitSourceError) -> Self {
        ReadBufError::Parse {
            message: "Error reading".to_string(),
            source: Some(err),
        }
    }
}

// Helper methods for creating errors
impl ReadBufError {
    pub fn parse(msg: impl Into<String>) -> Self {
        ReadBufError::Parse {
            message: msg.into(),
            source: None,
        }
    }

    pub fn runtime(inner: ReadBufError) -> Self {
        ReadBufError::Runtime {
            source: Box::new(inner),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        ReadBufError::Unsupported(msg.into())
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ReadBufError::Parse { .. })
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, ReadBufError::Runtime { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, ReadBufError::Unsupported(_))
    }

    /// Underlying bit source failure, if any
    pub fn bit_source(&self) -> Option<&BitSourceError> {
        match self {
            ReadBufError::Parse { source, .. } => source.as_ref(),
            ReadBufError::Runtime { source } => source.bit_source(),
            ReadBufError::Unsupported(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_parse_error_display() {
        let err = ReadBufError::parse("byte must contain at least 1 bit");
        assert_eq!(
            err.to_string(),
            "Parse error: byte must contain at least 1 bit"
        );
        assert!(err.is_parse());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_bit_source_keeps_cause() {
        let err: ReadBufError = BitSourceError::Exhausted {
            requested: 8,
            available: 3,
        }
        .into();
        assert!(err.is_parse());
        assert_eq!(
            err.source().unwrap().to_string(),
            "Bit source exhausted: requested 8 bits, 3 available"
        );
    }

    #[test]
    fn test_runtime_wraps_parse() {
        let inner: ReadBufError = BitSourceError::Exhausted {
            requested: 8,
            available: 4,
        }
        .into();
        let err = ReadBufError::runtime(inner);
        assert!(err.is_runtime());
        assert!(!err.is_parse());
        assert!(err.source().unwrap().to_string().starts_with("Parse error"));
        assert!(matches!(
            err.bit_source(),
            Some(BitSourceError::Exhausted { available: 4, .. })
        ));
    }

    #[test]
    fn test_unsupported_display() {
        let err = ReadBufError::unsupported("not implemented yet");
        assert!(err.is_unsupported());
        assert_eq!(err.to_string(), "Unsupported operation: not implemented yet");
        assert!(err.bit_source().is_none());
    }
}
