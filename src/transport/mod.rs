//! TCP transport layer.
//!
//! One established connection at a time, owned by a dedicated I/O task.
//!
//! ```text
//! ┌──────────────────┐                         ┌─────────────┐
//! │  Manager (Rust)  │          TCP            │   Server    │
//! │                  │◄───────────────────────►│             │
//! │  connect →       │       host:port         │  beacon     │
//! │  Connection      │                         │  receiver   │
//! └──────────────────┘                         └─────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. Manager resolves the configured address and connects
//! 2. `Connection::spawn` - take ownership of the stream, start the I/O task
//! 3. Outbound bytes flow through the [`ProbeSink`] channel
//! 4. Remote close or transport error ends the task and resets shared state

// ============================================================================
// Submodules
// ============================================================================

/// TCP connection and its I/O task.
pub mod connection;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{Connection, ProbeSink};
