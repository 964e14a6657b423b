//! End-to-end tests against a real TCP listener.
//!
//! Intervals are shortened so each scenario completes in well under a
//! second of wall time; the assertions only rely on ordering and generous
//! lower bounds, not exact timing.

// ============================================================================
// Imports
// ============================================================================

use std::time::{Duration, Instant};

use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::time::{sleep, timeout};

use beacon_client::{BeaconClient, ClientConfig, ConnectionStatus, KEEPALIVE_PROBE};

// ============================================================================
// Helpers
// ============================================================================

const RETRY: Duration = Duration::from_millis(50);
const PROBE: Duration = Duration::from_millis(200);

fn fast_config(addr: std::net::SocketAddr) -> ClientConfig {
    ClientConfig::new(addr)
        .with_retry_interval(RETRY)
        .with_probe_interval(PROBE)
}

async fn wait_connected(client: &BeaconClient) {
    timeout(Duration::from_secs(2), async {
        while !client.is_connected() {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("client did not connect in time");
}

async fn wait_disconnected(client: &BeaconClient) {
    timeout(Duration::from_secs(2), async {
        while client.is_connected() {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("client did not observe the disconnect in time");
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn end_to_end_lifecycle() -> anyhow::Result<()> {
    // Reserve an address, then free it so nothing is listening yet.
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = BeaconClient::start(fast_config(addr))?;

    // Phase 1: no server. The client keeps retrying, never connects, never
    // probes (nothing is there to receive anything), never gives up.
    sleep(RETRY * 6).await;
    assert!(!client.is_connected());

    // Phase 2: server comes up. The next retry tick connects.
    let listener = TcpListener::bind(addr).await?;
    let (mut server, _) = timeout(Duration::from_secs(2), listener.accept()).await??;
    wait_connected(&client).await;

    // The next probe boundary delivers the literal payload.
    let mut buf = [0u8; 32];
    let n = timeout(PROBE * 4, server.read(&mut buf))
        .await
        .expect("no probe arrived within the window")?;
    assert_eq!(&buf[..n], &KEEPALIVE_PROBE);

    // Phase 3: server goes away. State resets and retries resume.
    drop(server);
    wait_disconnected(&client).await;
    let (_server2, _) = timeout(Duration::from_secs(2), listener.accept()).await??;
    wait_connected(&client).await;

    client.shutdown_and_wait().await;
    Ok(())
}

// ============================================================================
// Retry Cadence
// ============================================================================

#[tokio::test]
async fn retry_attempts_are_spaced_by_the_interval() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let client = BeaconClient::start(fast_config(addr)).unwrap();

    // Accept and immediately close each connection, forcing a fresh attempt
    // on every tick. Consecutive accepts must be at least one retry interval
    // apart (minus scheduling slack) and there is never more than one
    // connection in flight.
    let mut accept_times = Vec::new();
    for _ in 0..4 {
        let (server, _) = timeout(Duration::from_secs(2), listener.accept())
            .await
            .unwrap()
            .unwrap();
        accept_times.push(Instant::now());
        drop(server);
    }

    for pair in accept_times.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(
            gap >= RETRY.mul_f64(0.8),
            "attempts {gap:?} apart, expected at least ~{RETRY:?}"
        );
    }

    client.shutdown_and_wait().await;
}

// ============================================================================
// Probe Suspension
// ============================================================================

#[tokio::test]
async fn probes_are_suspended_while_disconnected() {
    // No server at all: run through several probe windows, then bring a
    // server up and confirm the first bytes it ever sees are a single fresh
    // probe, not a backlog.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BeaconClient::start(fast_config(addr)).unwrap();
    sleep(PROBE * 3).await;

    let listener = TcpListener::bind(addr).await.unwrap();
    let (mut server, _) = timeout(Duration::from_secs(2), listener.accept())
        .await
        .unwrap()
        .unwrap();
    wait_connected(&client).await;

    let mut buf = [0u8; 64];
    let n = timeout(PROBE * 4, server.read(&mut buf))
        .await
        .expect("no probe arrived after reconnect")
        .unwrap();
    assert_eq!(&buf[..n], &KEEPALIVE_PROBE, "expected exactly one probe");

    client.shutdown_and_wait().await;
}

// ============================================================================
// Shutdown
// ============================================================================

#[tokio::test]
async fn shutdown_closes_the_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let client = BeaconClient::start(fast_config(addr)).unwrap();
    let (mut server, _) = timeout(Duration::from_secs(2), listener.accept())
        .await
        .unwrap()
        .unwrap();
    wait_connected(&client).await;
    assert_eq!(client.status(), ConnectionStatus::Connected);

    timeout(Duration::from_secs(2), client.shutdown_and_wait())
        .await
        .unwrap();

    // The server observes EOF once the client is gone.
    let mut buf = [0u8; 8];
    let n = timeout(Duration::from_secs(2), server.read(&mut buf))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(n, 0);
}

// ============================================================================
// Inbound Data
// ============================================================================

#[tokio::test]
async fn inbound_data_is_consumed_without_reply() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let client = BeaconClient::start(
        // Long probe interval: any bytes the server sees here would be a bug.
        ClientConfig::new(addr)
            .with_retry_interval(RETRY)
            .with_probe_interval(Duration::from_secs(60)),
    )
    .unwrap();

    let (mut server, _) = timeout(Duration::from_secs(2), listener.accept())
        .await
        .unwrap()
        .unwrap();
    wait_connected(&client).await;

    // Server pushes bytes; the client logs them and stays silent.
    use tokio::io::AsyncWriteExt;
    server.write_all(&[0xDE, 0xAD, 0xBE, 0xEF]).await.unwrap();
    server.flush().await.unwrap();
    sleep(Duration::from_millis(100)).await;

    assert!(client.is_connected(), "inbound data must not drop the link");

    let mut buf = [0u8; 8];
    let read = timeout(Duration::from_millis(100), server.read(&mut buf)).await;
    assert!(read.is_err(), "client must not reply to inbound data");

    client.shutdown_and_wait().await;
}

// ============================================================================
// Type Checks
// ============================================================================

#[test]
fn client_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BeaconClient>();
}
