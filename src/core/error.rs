//! Error types for the ATP segment core.

use thiserror::Error;

/// Errors produced when decoding or mutating a segment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// Buffer is shorter than the header requires.
    #[error("segment too short: expected at least {expected} bytes, got {actual}")]
    TooShort {
        /// Minimum expected size.
        expected: usize,
        /// Actual size received.
        actual: usize,
    },

    /// Header offset is smaller than the header the flags describe.
    #[error("invalid header offset {offset}: flags require at least {minimum} bytes")]
    InvalidHeaderOffset {
        /// Header offset read from the buffer.
        offset: usize,
        /// Minimum header size implied by the flags.
        minimum: usize,
    },

    /// Segment header has no room for a window size field.
    #[error("segment header ({header_size} bytes) has no window size field")]
    NoWindowField {
        /// Header size of the segment.
        header_size: usize,
    },
}

/// Errors in the process-wide configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration was already installed.
    #[error("configuration already installed")]
    AlreadyInitialized,

    /// MTU leaves no room for a payload.
    #[error("mtu {mtu} too small: must exceed the {minimum}-byte header")]
    MtuTooSmall {
        /// Requested MTU.
        mtu: usize,
        /// Header size that must fit below it.
        minimum: usize,
    },

    /// MTU exceeds what a single datagram can carry.
    #[error("mtu {mtu} too large: maximum datagram size is {maximum}")]
    MtuTooLarge {
        /// Requested MTU.
        mtu: usize,
        /// Largest allowed datagram.
        maximum: usize,
    },
}

/// Top-level ATP errors.
#[derive(Debug, Error)]
pub enum AtpError {
    /// Segment error.
    #[error("segment error: {0}")]
    Segment(#[from] SegmentError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    /// I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for segment operations.
pub type SegmentResult<T> = Result<T, SegmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SegmentError::TooShort {
            expected: 10,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "segment too short: expected at least 10 bytes, got 4"
        );

        let err = SegmentError::InvalidHeaderOffset {
            offset: 6,
            minimum: 10,
        };
        assert!(err.to_string().contains("at least 10"));
    }

    #[test]
    fn test_atp_error_from() {
        let err: AtpError = SegmentError::NoWindowField { header_size: 6 }.into();
        assert!(matches!(err, AtpError::Segment(_)));

        let err: AtpError = ConfigError::AlreadyInitialized.into();
        assert!(matches!(err, AtpError::Config(ConfigError::AlreadyInitialized)));
    }
}
