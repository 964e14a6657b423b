//! Beacon client entry point.
//!
//! No flags; the server address is a constant here, matching the deployed
//! configuration. Log filtering honors `RUST_LOG` (default `info`). Ctrl-C
//! shuts the loops down cleanly and the process exits 0.

// ============================================================================
// Imports
// ============================================================================

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tracing::info;
use tracing_subscriber::EnvFilter;

use beacon_client::{BeaconClient, ClientConfig, Result};

// ============================================================================
// Constants
// ============================================================================

/// Beacon server host.
const HOST: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 222));

/// Beacon server port.
const PORT: u16 = 4001;

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // One line per event: timestamp, level, source location, message.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    let addr = SocketAddr::new(HOST, PORT);
    info!(%addr, "Starting beacon client");

    let client = BeaconClient::start(ClientConfig::new(addr))?;

    tokio::signal::ctrl_c().await?;
    info!("Interrupt received, shutting down");
    client.shutdown_and_wait().await;

    Ok(())
}
