//! Identifiers used throughout BoxOffice.
//!
//! Caller identities and transaction IDs are UUIDs (v7 when freshly
//! generated). Occasion and ticket IDs are dense sequential integers
//! assigned by the registry itself.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants;

/// Seat number within an occasion. Valid seats are `1..=max_seats`.
pub type SeatNumber = u32;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Opaque, unforgeable caller identity supplied by the hosting ledger.
///
/// The registry never authenticates anything itself; it only compares
/// identities it is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Identity(pub Uuid);

impl Identity {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Deterministic identity for a human-readable label.
    ///
    /// Every replica derives the **same** identity for the same label, which
    /// is what scripted scenarios rely on.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(constants::IDENTITY_LABEL_DOMAIN);
        hasher.update(label.as_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash[..16]);
        Self(Uuid::from_bytes(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// OccasionId
// ---------------------------------------------------------------------------

/// Sequential occasion identifier, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OccasionId(pub u64);

impl OccasionId {
    /// The first identifier the registry assigns.
    pub const FIRST: Self = Self(constants::FIRST_OCCASION_ID);

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OccasionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "occasion:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TicketId
// ---------------------------------------------------------------------------

/// Sequential ticket (token) identifier, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TicketId(pub u64);

impl TicketId {
    pub const FIRST: Self = Self(constants::FIRST_TICKET_ID);

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ticket:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TxId
// ---------------------------------------------------------------------------

/// Globally unique transaction identifier, used by the host for replay
/// protection and receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TxId(pub Uuid);

impl TxId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for TxId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
