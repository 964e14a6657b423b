//! Beacon client - reconnecting TCP keepalive client.
//!
//! Maintains a persistent connection to a fixed host/port, periodically
//! sends a fixed probe payload, and logs connection lifecycle events.
//!
//! # Architecture
//!
//! Two loops share one atomic state object:
//!
//! - **Connection manager**: attempts a connect once per second while down;
//!   fixed interval, no backoff. Remote close resets state and the loop
//!   recovers on its next tick.
//! - **Periodic prober**: every twenty seconds, sends one payload from the
//!   configured probe set, only while a connection is live.
//!
//! Key design points:
//!
//! - Status and transport handle live in one object
//!   (`Disconnected | Connecting | Connected(handle)`), read by the prober
//!   through a single accessor that yields nothing unless connected
//! - Connect failures split into exactly two outcomes (server unavailable,
//!   anything else), both mapped to the same retry action
//! - No failure is ever fatal: every runtime error is logged and absorbed
//!
//! # Quick Start
//!
//! ```no_run
//! use beacon_client::{BeaconClient, ClientConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::new("192.168.1.222:4001".parse().unwrap());
//!     let client = BeaconClient::start(config)?;
//!
//!     tokio::signal::ctrl_c().await?;
//!     client.shutdown_and_wait().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`BeaconClient`] facade, reconnect and probe loops |
//! | [`config`] | [`ClientConfig`] and interval defaults |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`probe`] | Probe payloads and selection |
//! | [`state`] | Shared connection state |
//! | [`transport`] | TCP connection and its I/O task (internal) |

// ============================================================================
// Modules
// ============================================================================

/// Beacon client facade and its two loops.
pub mod client;

/// Client configuration.
///
/// Use [`ClientConfig::new`] or [`ClientConfig::default`].
pub mod config;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Probe payloads and payload selection.
pub mod probe;

/// Shared connection state.
pub mod state;

/// TCP transport layer.
///
/// Internal module owning the per-connection I/O task.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::BeaconClient;

// Configuration types
pub use config::{ClientConfig, DEFAULT_ADDR, DEFAULT_PROBE_INTERVAL, DEFAULT_RETRY_INTERVAL};

// Error types
pub use error::{Error, Result};

// Probe types
pub use probe::{KEEPALIVE_PROBE, ProbeSet};

// State types
pub use state::{ClientState, ConnectionStatus};
