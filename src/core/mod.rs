//! ATP Protocol - Core constants, configuration, and error types.
//!
//! This module has no I/O dependencies. It defines the wire constants every
//! segment is laid out with and the process-wide sizing configuration.

mod config;
mod constants;
mod error;

pub use config::*;
pub use constants::*;
pub use error::*;
