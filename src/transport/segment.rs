//! Segment encoding and decoding.
//!
//! A [`Segment`] owns exactly one byte buffer holding the header and payload
//! as they appear on the wire. Every accessor reads from or writes into that
//! buffer, so a decoded segment and a freshly built one behave the same and
//! the payload is never copied out.
//!
//! Wire format (big-endian multi-byte fields):
//! ```text
//! +--------+--------+------------------+------------------+-----------+
//! | Offset | Flags  | Sequence Number  | Window Size      | Payload   |
//! | 1 byte | 1 byte | 4 bytes (BE32)   | 4 bytes (BE32)   | variable  |
//! +--------+--------+------------------+------------------+-----------+
//!                                       ^ only with ACK    ^ at Offset
//! ```

use std::borrow::Cow;
use std::ops::BitOr;
use std::str::Utf8Error;
use std::time::{Duration, Instant};

use crate::core::{
    ACK_HEADER_SIZE, ACK_PAYLOAD_SIZE, DATA_HEADER_SIZE, FLAG_ACK, FLAG_RTO, FLAG_SYN,
    FLAGS_POSITION, HEADER_OFFSET_POSITION, SEQUENCE_NUMBER_POSITION, SegmentConfig,
    SegmentError, SegmentResult, WINDOW_SIZE_POSITION,
};

/// Segment flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SegmentFlags(u8);

impl SegmentFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Acknowledgment; the header carries a window size.
    pub const ACK: Self = Self(FLAG_ACK);
    /// Connection initiation.
    pub const SYN: Self = Self(FLAG_SYN);
    /// Retransmission-eligible; excluded from RTT measurement.
    pub const RTO: Self = Self(FLAG_RTO);

    /// Create flags from a raw byte.
    pub fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Get the raw byte value.
    pub fn as_byte(self) -> u8 {
        self.0
    }

    /// Check if every bit of `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check if ACK flag is set.
    pub fn is_ack(self) -> bool {
        self.contains(Self::ACK)
    }

    /// Check if SYN flag is set.
    pub fn is_syn(self) -> bool {
        self.contains(Self::SYN)
    }

    /// Check if RTO flag is set.
    pub fn is_rto(self) -> bool {
        self.contains(Self::RTO)
    }

    /// Return these flags with `other` added.
    pub fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Header size a segment with these flags needs.
    pub fn header_size(self) -> usize {
        if self.is_ack() {
            ACK_HEADER_SIZE
        } else {
            DATA_HEADER_SIZE
        }
    }
}

impl BitOr for SegmentFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}

impl From<u8> for SegmentFlags {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

/// A decoded view over one owned wire buffer.
#[derive(Debug, Clone)]
pub struct Segment {
    buffer: Vec<u8>,
    timestamp: Instant,
    retransmit_threshold: u32,
}

impl Segment {
    /// Decode a received datagram.
    ///
    /// The buffer is validated against its own header offset byte and flags;
    /// a malformed buffer is rejected rather than read out of bounds.
    pub fn decode(buffer: Vec<u8>) -> SegmentResult<Self> {
        if buffer.len() < DATA_HEADER_SIZE {
            return reject(SegmentError::TooShort {
                expected: DATA_HEADER_SIZE,
                actual: buffer.len(),
            });
        }

        let offset = buffer[HEADER_OFFSET_POSITION.start] as usize;
        let flags = SegmentFlags::from_byte(buffer[FLAGS_POSITION.start]);
        let minimum = flags.header_size();
        if offset < minimum {
            return reject(SegmentError::InvalidHeaderOffset { offset, minimum });
        }
        if buffer.len() < offset {
            return reject(SegmentError::TooShort {
                expected: offset,
                actual: buffer.len(),
            });
        }

        Ok(Self::bind(buffer))
    }

    /// Build an outgoing segment around a copy of `payload`.
    pub fn data(sequence_number: u32, flags: SegmentFlags, payload: &[u8]) -> Self {
        let header_size = flags.header_size();
        let mut buffer = vec![0u8; header_size + payload.len()];
        buffer[HEADER_OFFSET_POSITION.start] = header_size as u8;
        buffer[FLAGS_POSITION.start] = flags.as_byte();
        buffer[SEQUENCE_NUMBER_POSITION].copy_from_slice(&sequence_number.to_be_bytes());
        buffer[header_size..].copy_from_slice(payload);

        tracing::trace!(
            sequence_number,
            flags = flags.as_byte(),
            len = buffer.len(),
            "built segment"
        );
        Self::bind(buffer)
    }

    /// Build an acknowledgment.
    ///
    /// The header's sequence number carries `last_in_order`, the last
    /// in-order sequence number received. The acknowledged sequence number
    /// travels in the 4-byte payload.
    pub fn ack(last_in_order: u32, acked_sequence_number: u32, window_size: u32) -> Self {
        let mut segment = Self::data(
            last_in_order,
            SegmentFlags::ACK,
            &acked_sequence_number.to_be_bytes(),
        );
        segment.write_window_size(window_size);
        segment
    }

    fn bind(buffer: Vec<u8>) -> Self {
        Self {
            buffer,
            timestamp: Instant::now(),
            retransmit_threshold: SegmentConfig::current().retransmit_threshold,
        }
    }

    /// Get the header offset byte.
    pub fn header_offset(&self) -> u8 {
        self.buffer[HEADER_OFFSET_POSITION.start]
    }

    /// Get the header size (the payload's starting index).
    pub fn header_size(&self) -> usize {
        self.header_offset() as usize
    }

    /// Get the flags.
    pub fn flags(&self) -> SegmentFlags {
        SegmentFlags::from_byte(self.buffer[FLAGS_POSITION.start])
    }

    /// Replace the whole flags byte.
    pub fn set_flags(&mut self, flags: SegmentFlags) {
        self.buffer[FLAGS_POSITION.start] = flags.as_byte();
    }

    /// Add `flag` to the existing flags.
    pub fn add_flag(&mut self, flag: SegmentFlags) {
        self.set_flags(self.flags().with(flag));
    }

    /// Check whether every bit of `flag` is set.
    pub fn is_flagged_as(&self, flag: SegmentFlags) -> bool {
        self.flags().contains(flag)
    }

    /// Get the sequence number.
    pub fn sequence_number(&self) -> u32 {
        read_u32(&self.buffer[SEQUENCE_NUMBER_POSITION])
    }

    /// Get the advertised window size, if the header carries one.
    pub fn window_size(&self) -> Option<u32> {
        self.has_window_field()
            .then(|| read_u32(&self.buffer[WINDOW_SIZE_POSITION]))
    }

    /// ACK is set and the header is long enough to hold the window size.
    fn has_window_field(&self) -> bool {
        self.is_flagged_as(SegmentFlags::ACK) && self.header_size() >= ACK_HEADER_SIZE
    }

    /// Overwrite the window size in place.
    ///
    /// Fails unless the segment is an ACK whose header holds a window size.
    pub fn set_window_size(&mut self, window_size: u32) -> SegmentResult<()> {
        if !self.has_window_field() {
            return Err(SegmentError::NoWindowField {
                header_size: self.header_size(),
            });
        }
        self.write_window_size(window_size);
        Ok(())
    }

    fn write_window_size(&mut self, window_size: u32) {
        self.buffer[WINDOW_SIZE_POSITION].copy_from_slice(&window_size.to_be_bytes());
    }

    /// Get the payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.buffer[self.header_size()..]
    }

    /// Get the payload as UTF-8 text.
    pub fn payload_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.payload())
    }

    /// Get the payload as text, replacing invalid UTF-8 sequences.
    pub fn payload_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.payload())
    }

    /// Get the sequence number an ACK acknowledges (carried in its payload).
    pub fn acked_sequence_number(&self) -> Option<u32> {
        let payload = self.payload();
        if !self.has_window_field() || payload.len() < ACK_PAYLOAD_SIZE {
            return None;
        }
        Some(read_u32(&payload[..ACK_PAYLOAD_SIZE]))
    }

    /// Whether this segment's round trip may feed an RTT estimate.
    pub fn is_rtt_eligible(&self) -> bool {
        !self.is_flagged_as(SegmentFlags::RTO)
    }

    /// Get the full wire buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the segment, returning its wire buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Size of the segment on the wire.
    pub fn wire_len(&self) -> usize {
        self.buffer.len()
    }

    /// When the segment was built, decoded, or last touched.
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Set the capture time.
    pub fn set_timestamp(&mut self, timestamp: Instant) {
        self.timestamp = timestamp;
    }

    /// Reset the capture time to now (e.g., when the segment is sent).
    pub fn touch(&mut self) {
        self.timestamp = Instant::now();
    }

    /// Time since the capture time.
    pub fn elapsed(&self) -> Duration {
        self.timestamp.elapsed()
    }

    /// Get the retransmit threshold.
    pub fn retransmit_threshold(&self) -> u32 {
        self.retransmit_threshold
    }

    /// Set the retransmit threshold.
    pub fn set_retransmit_threshold(&mut self, threshold: u32) {
        self.retransmit_threshold = threshold;
    }
}

impl AsRef<[u8]> for Segment {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

impl TryFrom<Vec<u8>> for Segment {
    type Error = SegmentError;

    fn try_from(buffer: Vec<u8>) -> SegmentResult<Self> {
        Self::decode(buffer)
    }
}

impl From<Segment> for Vec<u8> {
    fn from(segment: Segment) -> Self {
        segment.into_bytes()
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn reject<T>(err: SegmentError) -> SegmentResult<T> {
    tracing::debug!(%err, "rejecting malformed segment");
    Err(err)
}
