//! Probe payloads and payload selection.
//!
//! The server expects a fixed 7-byte beacon payload at a fixed cadence. The
//! payload set is configurable and ordered; each probe tick draws one entry
//! uniformly at random. With the default single-entry set the draw is
//! deterministic.

// ============================================================================
// Imports
// ============================================================================

use std::fmt::Write as _;

use rand::Rng;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// The default keepalive probe payload.
///
/// Sent verbatim; the server interprets it, the client never does.
pub const KEEPALIVE_PROBE: [u8; 7] = [0xFF, 0xF4, 0x00, 0x10, 0x40, 0x40, 0x84];

// ============================================================================
// ProbeSet
// ============================================================================

/// An ordered, non-empty set of candidate probe payloads.
///
/// # Example
///
/// ```
/// use beacon_client::probe::{ProbeSet, KEEPALIVE_PROBE};
///
/// let probes = ProbeSet::default();
/// assert_eq!(probes.select(), &KEEPALIVE_PROBE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSet {
    payloads: Vec<Vec<u8>>,
}

impl Default for ProbeSet {
    fn default() -> Self {
        Self {
            payloads: vec![KEEPALIVE_PROBE.to_vec()],
        }
    }
}

impl ProbeSet {
    /// Creates a probe set from the given payloads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyProbeSet`] if `payloads` is empty.
    pub fn new(payloads: Vec<Vec<u8>>) -> Result<Self> {
        if payloads.is_empty() {
            return Err(Error::EmptyProbeSet);
        }
        Ok(Self { payloads })
    }

    /// Creates a probe set holding a single payload.
    #[must_use]
    pub fn single(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payloads: vec![payload.into()],
        }
    }

    /// Returns the number of candidate payloads.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Returns `false`; the set is non-empty by construction.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Selects one payload uniformly at random.
    ///
    /// Deterministic when the set holds a single payload.
    #[must_use]
    pub fn select(&self) -> &[u8] {
        if self.payloads.len() == 1 {
            return &self.payloads[0];
        }
        let idx = rand::rng().random_range(0..self.payloads.len());
        &self.payloads[idx]
    }
}

// ============================================================================
// Hex Formatting
// ============================================================================

/// Formats bytes as space-separated uppercase hex, e.g. `FF F4 00 10 40 40 84`.
///
/// Used by send/receive log lines; received bytes are never interpreted
/// beyond this rendering.
#[must_use]
pub fn hex_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02X}");
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
