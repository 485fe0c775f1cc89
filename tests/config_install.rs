//! Process-wide configuration installation.
//!
//! Lives in its own test binary: installing configuration is global and
//! would leak into every other test in the process.

use atp_protocol::core::{self as atp_core, ConfigError, SegmentConfig};
use atp_protocol::{Segment, SegmentFlags};

#[test]
fn test_install_once() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let config = SegmentConfig::new().mtu(576).retransmit_threshold(5);
    config.install().unwrap();

    assert_eq!(SegmentConfig::current(), config);
    assert_eq!(atp_core::mtu(), 576);
    assert_eq!(atp_core::payload_size_budget(), 570);

    // New segments pick up the installed threshold
    let segment = Segment::data(1, SegmentFlags::NONE, b"");
    assert_eq!(segment.retransmit_threshold(), 5);

    // A second install is refused and leaves the first in place
    assert_eq!(
        SegmentConfig::new().mtu(9000).install(),
        Err(ConfigError::AlreadyInitialized)
    );
    assert_eq!(atp_core::mtu(), 576);
}
