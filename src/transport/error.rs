//! Datagram adapter error types.

use std::io;

use thiserror::Error;

use crate::core::SegmentError;

/// Errors from sending or receiving segments over a socket.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Received datagram is not a valid segment.
    #[error("segment error: {0}")]
    Segment(#[from] SegmentError),

    /// I/O error (socket operations).
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Outgoing segment does not fit in one datagram.
    #[error("segment of {size} bytes exceeds mtu {mtu}")]
    DatagramTooLarge {
        /// Segment size on the wire.
        size: usize,
        /// Configured MTU.
        mtu: usize,
    },
}

impl TransportError {
    /// Check if a receive loop should drop the datagram and keep going.
    pub fn is_silent_drop(&self) -> bool {
        matches!(self, TransportError::Segment(_))
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_drop_errors() {
        let malformed = TransportError::from(SegmentError::TooShort {
            expected: 6,
            actual: 1,
        });
        assert!(malformed.is_silent_drop());

        assert!(!TransportError::Io(io::Error::other("test")).is_silent_drop());
        assert!(
            !TransportError::DatagramTooLarge {
                size: 2000,
                mtu: 1400
            }
            .is_silent_drop()
        );
    }
}
