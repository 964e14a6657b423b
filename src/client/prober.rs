//! Periodic probe loop.
//!
//! An interval timer whose first fire is one full interval after start, so a
//! connection held for duration D receives `floor(D / interval)` probes. Each
//! fire reads the shared status through the single accessor: anything other
//! than a live connection makes the tick a no-op. Probe sends are suspended
//! while disconnected; they resume on the first boundary after reconnection.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, trace, warn};

use crate::config::ClientConfig;
use crate::state::ClientState;

// ============================================================================
// Probe Loop
// ============================================================================

/// Runs the probe loop until the shutdown signal fires.
pub(crate) async fn run(
    config: ClientConfig,
    state: Arc<ClientState>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut timer = interval_at(
        Instant::now() + config.probe_interval,
        config.probe_interval,
    );
    // A delayed tick must not burst a second probe into the same window.
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    debug!(interval = ?config.probe_interval, "Probe loop started");

    loop {
        tokio::select! {
            _ = timer.tick() => {}
            _ = shutdown.changed() => {
                debug!("Probe loop shutting down");
                return;
            }
        }

        let Some(sink) = state.probe_sink() else {
            trace!("Not connected, probe skipped");
            continue;
        };

        let payload = config.probes.select();
        if sink.send(payload.to_vec()).is_err() {
            // The connection went away between the accessor read and the
            // send. The reconnect loop recovers; nothing else to do.
            warn!("Connection lost before probe could be sent");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
