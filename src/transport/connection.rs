//! TCP connection and I/O task.
//!
//! A [`Connection`] owns an established `TcpStream` through a spawned tokio
//! task that handles:
//!
//! - Incoming bytes from the server (logged verbatim, never parsed)
//! - Outbound payloads from the prober and the greeting
//! - Remote-close detection and shared-state reset
//!
//! # Event Loop
//!
//! The task selects over the socket read half, the outbound channel and the
//! shutdown signal. Any exit path resets [`ClientState`] to disconnected
//! before the task ends, so the prober's next accessor read observes the
//! closure atomically.

// ============================================================================
// Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::probe::hex_bytes;
use crate::state::ClientState;

// ============================================================================
// Constants
// ============================================================================

/// Read buffer size for inbound server bytes.
const READ_BUFFER_SIZE: usize = 4096;

// ============================================================================
// Types
// ============================================================================

/// Cloneable handle for queuing outbound payloads on a live connection.
///
/// Stored inside [`ClientState`] while the connection is up; dropped on
/// disconnect, which closes the channel and makes any stale clone's send
/// fail without faulting the process.
pub type ProbeSink = mpsc::UnboundedSender<Vec<u8>>;

// ============================================================================
// Connection
// ============================================================================

/// An established TCP connection to the beacon server.
///
/// Spawns its I/O task on construction; the task runs until remote close,
/// transport error, or shutdown.
pub struct Connection {
    outbound_tx: ProbeSink,
}

impl Connection {
    /// Takes ownership of an established stream and starts the I/O task.
    ///
    /// An optional greeting is queued ahead of any probe, so the I/O task
    /// writes it as its first payload. The shared state transitions to
    /// connected *before* the task is spawned: the task's disconnect reset
    /// can then never lose a race against the connect path, even when the
    /// remote closes immediately. The task resets `state` to disconnected on
    /// every exit path.
    pub(crate) fn spawn(
        stream: TcpStream,
        greeting: Option<Vec<u8>>,
        state: Arc<ClientState>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let peer = stream.peer_addr().ok();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        if let Some(greeting) = greeting {
            let _ = outbound_tx.send(greeting);
        }
        state.mark_connected(outbound_tx.clone());

        tokio::spawn(Self::run_io_loop(stream, peer, outbound_rx, state, shutdown));

        Self { outbound_tx }
    }

    /// Returns a cloneable outbound handle for this connection.
    #[must_use]
    pub fn sink(&self) -> ProbeSink {
        self.outbound_tx.clone()
    }

    /// Queues a payload for sending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] if the I/O task has already
    /// exited.
    pub fn send(&self, payload: Vec<u8>) -> Result<()> {
        self.outbound_tx
            .send(payload)
            .map_err(|_| Error::ConnectionClosed)
    }

    /// I/O loop: socket reads, outbound writes, shutdown.
    async fn run_io_loop(
        stream: TcpStream,
        peer: Option<SocketAddr>,
        mut outbound_rx: mpsc::UnboundedReceiver<Vec<u8>>,
        state: Arc<ClientState>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let (mut reader, mut writer) = stream.into_split();
        let mut buf = [0u8; READ_BUFFER_SIZE];

        loop {
            tokio::select! {
                read = reader.read(&mut buf) => {
                    if !Self::handle_read(read.map(|n| &buf[..n])) {
                        break;
                    }
                }

                payload = outbound_rx.recv() => {
                    match payload {
                        Some(payload) => {
                            if !Self::handle_write(&mut writer, &payload).await {
                                break;
                            }
                        }
                        None => {
                            debug!("Outbound channel closed");
                            break;
                        }
                    }
                }

                _ = shutdown.changed() => {
                    debug!(?peer, "Shutdown signal received, closing connection");
                    let _ = writer.shutdown().await;
                    break;
                }
            }
        }

        // Status reset happens on every exit path, so the prober's accessor
        // can never hand out this connection's sink again.
        state.mark_disconnected();
        debug!(?peer, "Connection task terminated");
    }

    /// Handles one read completion. Returns `false` when the loop must end.
    fn handle_read(read: std::io::Result<&[u8]>) -> bool {
        match read {
            Ok([]) => {
                info!("The server closed the connection");
                false
            }
            Ok(data) => {
                info!(bytes = %hex_bytes(data), len = data.len(), "Data received");
                true
            }
            Err(e) => {
                warn!(error = %e, "Read failed, dropping connection");
                false
            }
        }
    }

    /// Writes one outbound payload. Returns `false` when the loop must end.
    async fn handle_write(writer: &mut OwnedWriteHalf, payload: &[u8]) -> bool {
        match writer.write_all(payload).await {
            Ok(()) => {
                info!(bytes = %hex_bytes(payload), len = payload.len(), "Data sent");
                true
            }
            Err(e) => {
                warn!(error = %e, "Write failed, dropping connection");
                false
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
