//! Process-wide segment configuration.
//!
//! The MTU and the default retransmit threshold are shared by every
//! connection in the process. They may be installed once, before traffic
//! begins; until then the defaults apply.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::constants::{
    DATA_HEADER_SIZE, DEFAULT_MTU, DEFAULT_RETRANSMIT_THRESHOLD, MAX_DATAGRAM_SIZE,
};
use super::error::ConfigError;

static CONFIG: OnceLock<SegmentConfig> = OnceLock::new();

/// Segment sizing and retransmission defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// Datagram MTU in bytes (header + payload).
    pub mtu: usize,
    /// Retransmit threshold stamped onto new segments.
    pub retransmit_threshold: u32,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            mtu: DEFAULT_MTU,
            retransmit_threshold: DEFAULT_RETRANSMIT_THRESHOLD,
        }
    }
}

impl SegmentConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the MTU.
    pub fn mtu(mut self, mtu: usize) -> Self {
        self.mtu = mtu;
        self
    }

    /// Set the retransmit threshold.
    pub fn retransmit_threshold(mut self, threshold: u32) -> Self {
        self.retransmit_threshold = threshold;
        self
    }

    /// Check that the MTU can carry a data header plus at least one payload byte.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mtu <= DATA_HEADER_SIZE {
            return Err(ConfigError::MtuTooSmall {
                mtu: self.mtu,
                minimum: DATA_HEADER_SIZE,
            });
        }
        if self.mtu > MAX_DATAGRAM_SIZE {
            return Err(ConfigError::MtuTooLarge {
                mtu: self.mtu,
                maximum: MAX_DATAGRAM_SIZE,
            });
        }
        Ok(())
    }

    /// Payload bytes that fit in one unfragmented datagram.
    pub fn payload_size_budget(&self) -> usize {
        self.mtu.saturating_sub(DATA_HEADER_SIZE)
    }

    /// Install this configuration for the whole process.
    ///
    /// Fails with [`ConfigError::AlreadyInitialized`] on every call after
    /// the first successful one.
    pub fn install(self) -> Result<(), ConfigError> {
        self.validate()?;
        CONFIG
            .set(self)
            .map_err(|_| ConfigError::AlreadyInitialized)?;
        tracing::info!(
            mtu = self.mtu,
            retransmit_threshold = self.retransmit_threshold,
            "segment configuration installed"
        );
        Ok(())
    }

    /// The installed configuration, or the defaults if none was installed.
    pub fn current() -> Self {
        CONFIG.get().copied().unwrap_or_default()
    }
}

/// Configured MTU.
pub fn mtu() -> usize {
    SegmentConfig::current().mtu
}

/// Payload bytes that fit in one datagram under the configured MTU.
pub fn payload_size_budget() -> usize {
    SegmentConfig::current().payload_size_budget()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SegmentConfig::default();
        assert_eq!(config.mtu, DEFAULT_MTU);
        assert_eq!(config.retransmit_threshold, 3);
        assert_eq!(config.payload_size_budget(), DEFAULT_MTU - 6);
    }

    #[test]
    fn test_builder() {
        let config = SegmentConfig::new().mtu(512).retransmit_threshold(5);
        assert_eq!(config.mtu, 512);
        assert_eq!(config.retransmit_threshold, 5);
        assert_eq!(config.payload_size_budget(), 506);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(SegmentConfig::new().validate().is_ok());
        assert!(SegmentConfig::new().mtu(7).validate().is_ok());

        assert_eq!(
            SegmentConfig::new().mtu(6).validate(),
            Err(ConfigError::MtuTooSmall { mtu: 6, minimum: 6 })
        );
        assert!(matches!(
            SegmentConfig::new().mtu(70_000).validate(),
            Err(ConfigError::MtuTooLarge { .. })
        ));
    }

    #[test]
    fn test_invalid_config_not_installed() {
        let result = SegmentConfig::new().mtu(0).install();
        assert!(matches!(result, Err(ConfigError::MtuTooSmall { .. })));
        assert_eq!(SegmentConfig::current(), SegmentConfig::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SegmentConfig = serde_json::from_str(r#"{ "mtu": 1200 }"#).unwrap();
        assert_eq!(config.mtu, 1200);
        assert_eq!(config.retransmit_threshold, DEFAULT_RETRANSMIT_THRESHOLD);

        let json = serde_json::to_string(&config).unwrap();
        let back: SegmentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
