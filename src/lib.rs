//! # ATP Protocol
//!
//! **A**RQ **T**ransport **P**rotocol segment core.
//!
//! ATP runs a reliable, ordered byte stream over an unreliable datagram
//! channel. This crate provides the pieces every ATP connection is built
//! from:
//!
//! - **Wire format**: a compact, self-describing segment header with a
//!   byte-exact layout, decoded without copying the payload
//! - **Segment queues**: ordered, duplicate-free segment collections for
//!   reassembly and retransmission
//! - **Configuration**: the process-wide MTU and retransmit threshold
//!
//! ## Feature Flags
//!
//! - `socket` (default): async UDP socket that sends and receives segments
//!
//! ## Modules
//!
//! - [`core`]: Constants, configuration, and error types
//! - [`transport`]: Segments, segment queues, and the socket adapter
//!
//! ## Example Usage
//!
//! ```rust
//! use atp_protocol::prelude::*;
//!
//! // Receiver side: decode what came off the wire and queue it
//! let wire = Segment::data(2, SegmentFlags::NONE, b"world").into_bytes();
//! let mut reassembly = Vec::new();
//! insert_in_order(&mut reassembly, Segment::decode(wire).unwrap());
//! insert_in_order(&mut reassembly, Segment::data(1, SegmentFlags::NONE, b"hello "));
//!
//! let first = pop_front(&mut reassembly);
//! assert_eq!(first.payload_str().unwrap(), "hello ");
//!
//! // Acknowledge it, advertising a window of 64 segments
//! let ack = Segment::ack(1, first.sequence_number(), 64);
//! assert_eq!(ack.header_size(), 10);
//! assert_eq!(ack.acked_sequence_number(), Some(1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod core;
pub mod transport;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::transport::*;
}

pub use crate::core::{AtpError, ConfigError, SegmentConfig, SegmentError};
pub use crate::transport::{Segment, SegmentFlags, TransportError};

#[cfg(feature = "socket")]
#[cfg_attr(docsrs, doc(cfg(feature = "socket")))]
pub use crate::transport::{SegmentSocket, SegmentSocketBuilder};
