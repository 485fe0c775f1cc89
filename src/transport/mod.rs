//! ATP Protocol - Segment Layer
//!
//! This module provides:
//!
//! - **Segment encoding/decoding**: [`Segment`] and [`SegmentFlags`]
//! - **Ordered segment queues**: [`insert_in_order`], [`remove`],
//!   [`remove_all_where`], [`pop_front`]
//! - **Async sockets**: [`SegmentSocket`] wrapper for tokio UDP (requires
//!   the `socket` feature)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Connection (caller-provided)       │
//! │  retransmission, RTT, window policy     │
//! ├─────────────────────────────────────────┤
//! │          Segment Layer                  │  ← This module
//! │   wire codec, ordered segment queues    │
//! ├─────────────────────────────────────────┤
//! │              UDP                        │
//! └─────────────────────────────────────────┘
//! ```

mod error;
mod queue;
mod segment;

#[cfg(feature = "socket")]
mod socket;

pub use error::*;
pub use queue::*;
pub use segment::*;

#[cfg(feature = "socket")]
pub use socket::*;
