//! Error types for the beacon client.
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`].
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::EmptyProbeSet`] |
//! | Connection | [`Error::ServerUnavailable`], [`Error::Connect`], [`Error::ConnectionClosed`] |
//! | Probing | [`Error::NotConnected`] |
//! | External | [`Error::Io`] |
//!
//! None of the connection errors is fatal to the client: the reconnect loop
//! maps every connect failure to the same retry action and only the log text
//! differs. The sole error surfaced to callers at build time is a rejected
//! configuration.

// ============================================================================
// Imports
// ============================================================================

use std::io::{Error as IoError, ErrorKind};
use std::net::SocketAddr;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when client configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// The probe payload set is empty.
    ///
    /// Returned at build time; the prober requires at least one payload.
    #[error("Probe set must contain at least one payload")]
    EmptyProbeSet,

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// The server is not reachable.
    ///
    /// Connection refused, host/network unreachable, or connect timed out.
    /// Recovered by the reconnect loop on its next tick.
    #[error("Server not up at {addr}, retrying")]
    ServerUnavailable {
        /// Address the connect attempt targeted.
        addr: SocketAddr,
    },

    /// Any other connection failure.
    ///
    /// Logged generically and retried identically to
    /// [`Error::ServerUnavailable`].
    #[error("Connection failed: {message}")]
    Connect {
        /// Description of the connection error.
        message: String,
    },

    /// The connection was closed by the remote end.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Probing Errors
    // ========================================================================
    /// A probe was attempted without an active connection.
    ///
    /// The prober treats this as a skipped tick, never a fault.
    #[error("Not connected")]
    NotConnected,

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a generic connection error.
    #[inline]
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }

    /// Classifies a failed connect attempt into the two retry outcomes.
    ///
    /// Refused, unreachable and timed-out connects become
    /// [`Error::ServerUnavailable`]; everything else becomes
    /// [`Error::Connect`]. Both are recovered by the reconnect loop; the
    /// distinction only drives the log message.
    #[must_use]
    pub fn classify_connect(addr: SocketAddr, err: &IoError) -> Self {
        match err.kind() {
            ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
            | ErrorKind::HostUnreachable
            | ErrorKind::NetworkUnreachable
            | ErrorKind::TimedOut => Self::ServerUnavailable { addr },
            _ => Self::connect(err.to_string()),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::ServerUnavailable { .. } | Self::Connect { .. } | Self::ConnectionClosed
        )
    }

    /// Returns `true` if this error is recovered by retrying.
    ///
    /// Only configuration errors are not; every runtime failure is absorbed
    /// by the reconnect loop or skipped by the prober.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config { .. } | Self::EmptyProbeSet)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "192.168.1.222:4001".parse().unwrap()
    }

    #[test]
    fn test_error_display() {
        let err = Error::ServerUnavailable { addr: addr() };
        assert_eq!(
            err.to_string(),
            "Server not up at 192.168.1.222:4001, retrying"
        );

        let err = Error::connect("broken pipe");
        assert_eq!(err.to_string(), "Connection failed: broken pipe");
    }

    #[test]
    fn test_classify_refused() {
        let io_err = IoError::new(ErrorKind::ConnectionRefused, "refused");
        let err = Error::classify_connect(addr(), &io_err);
        assert!(matches!(err, Error::ServerUnavailable { .. }));
    }

    #[test]
    fn test_classify_unreachable() {
        let io_err = IoError::new(ErrorKind::HostUnreachable, "unreachable");
        let err = Error::classify_connect(addr(), &io_err);
        assert!(matches!(err, Error::ServerUnavailable { .. }));
    }

    #[test]
    fn test_classify_other() {
        let io_err = IoError::new(ErrorKind::PermissionDenied, "denied");
        let err = Error::classify_connect(addr(), &io_err);
        assert!(matches!(err, Error::Connect { .. }));
    }

    #[test]
    fn test_is_connection_error() {
        assert!(Error::ServerUnavailable { addr: addr() }.is_connection_error());
        assert!(Error::ConnectionClosed.is_connection_error());
        assert!(!Error::EmptyProbeSet.is_connection_error());
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::ConnectionClosed.is_recoverable());
        assert!(Error::NotConnected.is_recoverable());
        assert!(!Error::config("bad interval").is_recoverable());
        assert!(!Error::EmptyProbeSet.is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
