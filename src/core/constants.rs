//! Wire and bookkeeping constants for ATP segments.
//!
//! The byte positions are fixed by the wire format and MUST NOT be changed;
//! any peer speaking ATP lays its headers out the same way.

use std::ops::Range;

// =============================================================================
// FLAGS
// =============================================================================

/// Segment is an acknowledgment and carries a window size field.
pub const FLAG_ACK: u8 = 0x01;

/// Segment initiates a connection.
pub const FLAG_SYN: u8 = 0x02;

/// Segment is subject to retransmission and must not be used to measure RTT.
pub const FLAG_RTO: u8 = 0x08;

// =============================================================================
// HEADER LAYOUT
// =============================================================================

/// Header offset byte (index where the payload begins).
pub const HEADER_OFFSET_POSITION: Range<usize> = 0..1;

/// Flags byte.
pub const FLAGS_POSITION: Range<usize> = 1..2;

/// Sequence number (big-endian u32).
pub const SEQUENCE_NUMBER_POSITION: Range<usize> = 2..6;

/// Window size (big-endian u32), only present on ACK segments.
pub const WINDOW_SIZE_POSITION: Range<usize> = 6..10;

/// Header size of a segment without the ACK flag (offset + flags + sequence).
pub const DATA_HEADER_SIZE: usize = SEQUENCE_NUMBER_POSITION.end;

/// Header size of a segment with the ACK flag (data header + window size).
pub const ACK_HEADER_SIZE: usize = WINDOW_SIZE_POSITION.end;

/// Size of the acknowledged sequence number carried in an ACK payload.
pub const ACK_PAYLOAD_SIZE: usize = 4;

// =============================================================================
// DEFAULTS
// =============================================================================

/// Default datagram MTU used to size outgoing payloads.
pub const DEFAULT_MTU: usize = 1400;

/// Largest payload a single UDP datagram can carry over IPv4.
pub const MAX_DATAGRAM_SIZE: usize = 65507;

/// Default number of retransmissions before the connection gives up on a segment.
pub const DEFAULT_RETRANSMIT_THRESHOLD: u32 = 3;
