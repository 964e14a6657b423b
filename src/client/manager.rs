//! Reconnect loop.
//!
//! Sleeps one retry interval, checks the shared status, and attempts a
//! connect only while disconnected. Connect failures split into two
//! outcomes (server unavailable vs. everything else) with different log
//! messages and the same fixed-interval retry. The loop has no terminal
//! state other than the shutdown signal.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::state::ClientState;
use crate::transport::Connection;

// ============================================================================
// Reconnect Loop
// ============================================================================

/// Runs the reconnect loop until the shutdown signal fires.
pub(crate) async fn run(
    config: ClientConfig,
    state: Arc<ClientState>,
    mut shutdown: watch::Receiver<bool>,
) {
    debug!(addr = %config.addr, interval = ?config.retry_interval, "Reconnect loop started");

    loop {
        tokio::select! {
            _ = sleep(config.retry_interval) => {}
            _ = shutdown.changed() => {
                debug!("Reconnect loop shutting down");
                return;
            }
        }

        // `begin_connect` refuses unless status is Disconnected, so at most
        // one attempt is ever in flight.
        if !state.begin_connect() {
            continue;
        }

        match TcpStream::connect(config.addr).await {
            Ok(stream) => {
                // Publishes the sink and queues the greeting before the I/O
                // task starts.
                let _conn = Connection::spawn(
                    stream,
                    config.greeting.clone(),
                    Arc::clone(&state),
                    shutdown.clone(),
                );
                info!(addr = %config.addr, "Connection established");
            }
            Err(e) => {
                state.mark_disconnected();
                match Error::classify_connect(config.addr, &e) {
                    err @ Error::ServerUnavailable { .. } => error!("{err}"),
                    err => error!(addr = %config.addr, "{err}"),
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
