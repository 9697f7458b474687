//! Receipt types for the host ledger's audit trail.
//!
//! Every submitted transaction, committed or reverted, produces a
//! [`Receipt`]. Receipts form an append-only log; the `state_digest` lets any
//! replica check it reached the same registry state at the same height.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Identity, Outcome, TxId};

/// Whether the transaction took effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Committed(Outcome),
    /// Aborted with no state change. `code` is the `BO_ERR_` number.
    Reverted { code: u16, reason: String },
}

impl std::fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Committed(_) => write!(f, "COMMITTED"),
            Self::Reverted { code, .. } => write!(f, "REVERTED({code})"),
        }
    }
}

/// A record that a transaction was processed at a given ledger height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Position in the ledger's total order, starting at 1.
    pub height: u64,
    pub tx_id: TxId,
    pub caller: Identity,
    /// Name of the submitted call.
    pub call: String,
    pub status: ReceiptStatus,
    /// Registry state digest after this transaction (unchanged if reverted).
    #[serde(with = "hex_digest")]
    pub state_digest: [u8; 32],
    /// Wall-clock time the host processed the transaction. Not part of any
    /// digest.
    pub committed_at: DateTime<Utc>,
}

impl Receipt {
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self.status, ReceiptStatus::Committed(_))
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.status {
            ReceiptStatus::Committed(outcome) => Some(outcome),
            ReceiptStatus::Reverted { .. } => None,
        }
    }

    #[must_use]
    pub fn digest_hex(&self) -> String {
        hex::encode(self.state_digest)
    }
}

mod hex_digest {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(digest: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(digest))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = hex::decode(&text).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| D::Error::custom("state digest must be 32 bytes"))
    }
}
