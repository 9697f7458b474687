//! The state-changing call surface of the registry, as submitted to a host.
//!
//! Reads are not calls: they never go through the host's transaction path.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Identity, OccasionId, OccasionListing, SeatNumber, TicketId, TxId};

/// One state-changing registry operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Call {
    /// List a new occasion. Custodian only.
    AddOccasion(OccasionListing),
    /// Buy `seat` on `occasion_id`, attaching `value` as payment.
    Mint {
        occasion_id: OccasionId,
        seat: SeatNumber,
        value: Decimal,
    },
    /// Disburse the entire custodied balance to the custodian.
    Withdraw,
}

impl Call {
    /// Value the caller attaches to this call.
    #[must_use]
    pub fn attached_value(&self) -> Decimal {
        match self {
            Self::Mint { value, .. } => *value,
            Self::AddOccasion(_) | Self::Withdraw => Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddOccasion(_) => "add_occasion",
            Self::Mint { .. } => "mint",
            Self::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A call bound to its caller and a unique transaction ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    pub caller: Identity,
    pub call: Call,
}

impl Transaction {
    #[must_use]
    pub fn new(caller: Identity, call: Call) -> Self {
        Self {
            id: TxId::new(),
            caller,
            call,
        }
    }
}

/// What a committed call produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    OccasionAdded(OccasionId),
    TicketMinted(TicketId),
    Withdrawn(Decimal),
}
