//! Beacon client: reconnect loop + periodic prober behind one facade.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ BeaconClient                                 │
//! │                                              │
//! │  manager loop ──connect──► Connection task   │
//! │       │                        │             │
//! │       └────► ClientState ◄─────┘             │
//! │                   ▲                          │
//! │  prober loop ─────┘ (single accessor)        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Both loops and every connection task observe one shutdown signal.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `manager` | Fixed-interval reconnect loop |
//! | `prober` | Fixed-interval probe loop |

// ============================================================================
// Submodules
// ============================================================================

/// Fixed-interval reconnect loop.
mod manager;

/// Fixed-interval probe loop.
mod prober;

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::state::{ClientState, ConnectionStatus};

// ============================================================================
// BeaconClient
// ============================================================================

/// A running beacon client.
///
/// Spawns the reconnect loop and the probe loop on construction; both run
/// until [`BeaconClient::shutdown`] or process exit.
///
/// # Example
///
/// ```no_run
/// use beacon_client::{BeaconClient, ClientConfig};
///
/// #[tokio::main]
/// async fn main() -> beacon_client::Result<()> {
///     let client = BeaconClient::start(ClientConfig::default())?;
///     tokio::signal::ctrl_c().await?;
///     client.shutdown_and_wait().await;
///     Ok(())
/// }
/// ```
pub struct BeaconClient {
    state: Arc<ClientState>,
    shutdown_tx: watch::Sender<bool>,
    manager: JoinHandle<()>,
    prober: JoinHandle<()>,
}

impl BeaconClient {
    /// Validates the configuration and starts both loops.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] for a zero interval. Runtime
    /// failures never surface here; they are logged and retried.
    pub fn start(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let state = Arc::new(ClientState::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let manager = tokio::spawn(manager::run(
            config.clone(),
            Arc::clone(&state),
            shutdown_rx.clone(),
        ));
        let prober = tokio::spawn(prober::run(config, Arc::clone(&state), shutdown_rx));

        Ok(Self {
            state,
            shutdown_tx,
            manager,
            prober,
        })
    }

    /// Returns the current connection status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.state.status()
    }

    /// Returns `true` if a connection is currently established.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Signals both loops and any live connection to stop.
    pub fn shutdown(&self) {
        debug!("Shutdown requested");
        let _ = self.shutdown_tx.send(true);
    }

    /// Signals shutdown and waits for both loops to finish.
    pub async fn shutdown_and_wait(self) {
        self.shutdown();
        let _ = self.manager.await;
        let _ = self.prober.await;
    }
}

// ============================================================================
// Tests
// ============================================================================
