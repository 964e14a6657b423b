//! Client configuration.
//!
//! Plain options struct with builder-style setters. Defaults reproduce the
//! deployed beacon behavior: one connect attempt per second while down, one
//! probe every twenty seconds while up.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use beacon_client::ClientConfig;
//!
//! let config = ClientConfig::new("127.0.0.1:4001".parse().unwrap())
//!     .with_retry_interval(Duration::from_millis(500))
//!     .with_greeting(b"hello".to_vec());
//! assert!(config.validate().is_ok());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::probe::ProbeSet;

// ============================================================================
// Constants
// ============================================================================

/// Default beacon server address.
pub const DEFAULT_ADDR: SocketAddr = SocketAddr::new(
    IpAddr::V4(Ipv4Addr::new(192, 168, 1, 222)),
    4001,
);

/// Default delay between reconnect checks. No backoff, fixed interval.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Default delay between probe sends.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(20);

// ============================================================================
// ClientConfig
// ============================================================================

/// Beacon client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server address to connect to.
    pub addr: SocketAddr,

    /// Delay between reconnect checks while disconnected.
    pub retry_interval: Duration,

    /// Delay between probe sends while connected.
    pub probe_interval: Duration,

    /// Candidate probe payloads.
    pub probes: ProbeSet,

    /// Optional payload written once, immediately after connecting.
    pub greeting: Option<Vec<u8>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDR)
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl ClientConfig {
    /// Creates a configuration for the given server address with default
    /// intervals and the default probe set.
    #[must_use]
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            probe_interval: DEFAULT_PROBE_INTERVAL,
            probes: ProbeSet::default(),
            greeting: None,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ClientConfig {
    /// Sets the delay between reconnect checks.
    #[inline]
    #[must_use]
    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Sets the delay between probe sends.
    #[inline]
    #[must_use]
    pub fn with_probe_interval(mut self, interval: Duration) -> Self {
        self.probe_interval = interval;
        self
    }

    /// Sets the candidate probe payloads.
    #[inline]
    #[must_use]
    pub fn with_probes(mut self, probes: ProbeSet) -> Self {
        self.probes = probes;
        self
    }

    /// Sets a payload written once, immediately after connecting.
    #[inline]
    #[must_use]
    pub fn with_greeting(mut self, greeting: Vec<u8>) -> Self {
        self.greeting = Some(greeting);
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ClientConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when an interval is zero. The probe set is
    /// non-empty by construction.
    pub fn validate(&self) -> Result<()> {
        if self.retry_interval.is_zero() {
            return Err(Error::config("retry interval must be non-zero"));
        }
        if self.probe_interval.is_zero() {
            return Err(Error::config("probe interval must be non-zero"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.addr, DEFAULT_ADDR);
        assert_eq!(config.retry_interval, Duration::from_secs(1));
        assert_eq!(config.probe_interval, Duration::from_secs(20));
        assert_eq!(config.probes.len(), 1);
        assert!(config.greeting.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = ClientConfig::new("127.0.0.1:9000".parse().unwrap())
            .with_retry_interval(Duration::from_millis(250))
            .with_probe_interval(Duration::from_secs(5))
            .with_greeting(vec![0x01, 0x02]);

        assert_eq!(config.retry_interval, Duration::from_millis(250));
        assert_eq!(config.probe_interval, Duration::from_secs(5));
        assert_eq!(config.greeting.as_deref(), Some(&[0x01, 0x02][..]));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = ClientConfig::default().with_retry_interval(Duration::ZERO);
        assert!(matches!(
            config.validate().unwrap_err(),
            Error::Config { .. }
        ));

        let config = ClientConfig::default().with_probe_interval(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
