//! Shared connection state.
//!
//! The reconnect loop and the prober coordinate through one atomic state
//! object instead of separate "connected" and "transport" fields. The status
//! carries the outbound handle only while a connection is live, so the prober
//! can never observe a handle the manager has already invalidated: it reads
//! through a single accessor ([`ClientState::probe_sink`]) that yields
//! nothing unless the status is `Connected`.
//!
//! # Thread Safety
//!
//! `ClientState` is shared as `Arc<ClientState>` between the manager loop,
//! the prober loop and each connection I/O task. The mutex guard is never
//! held across an await point.

// ============================================================================
// Imports
// ============================================================================

use parking_lot::Mutex;

use crate::transport::ProbeSink;

// ============================================================================
// ConnectionStatus
// ============================================================================

/// Observable connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No connection; the reconnect loop will attempt on its next tick.
    Disconnected,
    /// A connect attempt is in flight.
    Connecting,
    /// A connection is established and accepting outbound bytes.
    Connected,
}

// ============================================================================
// ClientState
// ============================================================================

/// Internal status, carrying the outbound handle while connected.
enum Status {
    Disconnected,
    Connecting,
    Connected(ProbeSink),
}

/// Shared state between the connection manager and the prober.
///
/// Owned mutations come from the manager and the connection I/O task; the
/// prober only reads.
pub struct ClientState {
    status: Mutex<Status>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientState {
    /// Creates a new state object in the `Disconnected` status.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: Mutex::new(Status::Disconnected),
        }
    }

    /// Returns the current observable status.
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        match *self.status.lock() {
            Status::Disconnected => ConnectionStatus::Disconnected,
            Status::Connecting => ConnectionStatus::Connecting,
            Status::Connected(_) => ConnectionStatus::Connected,
        }
    }

    /// Returns `true` if a connection is currently established.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.status() == ConnectionStatus::Connected
    }

    /// Transitions `Disconnected` → `Connecting`.
    ///
    /// Returns `false` without changing anything if a connect attempt is
    /// already in flight or a connection is live. This is what keeps at most
    /// one attempt in flight at a time.
    pub fn begin_connect(&self) -> bool {
        let mut status = self.status.lock();
        match *status {
            Status::Disconnected => {
                *status = Status::Connecting;
                true
            }
            Status::Connecting | Status::Connected(_) => false,
        }
    }

    /// Records an established connection and its outbound handle.
    pub fn mark_connected(&self, sink: ProbeSink) {
        *self.status.lock() = Status::Connected(sink);
    }

    /// Resets to `Disconnected`, dropping any stored handle.
    ///
    /// Called on remote close, transport error, or a failed connect attempt.
    pub fn mark_disconnected(&self) {
        *self.status.lock() = Status::Disconnected;
    }

    /// Returns the outbound handle, only while `Connected`.
    ///
    /// The prober's sole view of the connection: anything other than
    /// `Connected` yields `None` and the probe tick becomes a no-op.
    #[must_use]
    pub fn probe_sink(&self) -> Option<ProbeSink> {
        match *self.status.lock() {
            Status::Connected(ref sink) => Some(sink.clone()),
            _ => None,
        }
    }
}

impl std::fmt::Debug for ClientState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientState")
            .field("status", &self.status())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
