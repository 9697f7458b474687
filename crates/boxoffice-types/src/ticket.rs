//! Ticket model.
//!
//! Each successful mint produces exactly one [`Ticket`]: a token bound to a
//! single (occasion, seat) pair and owned by the buyer. Tickets are never
//! transferred, burned, or refunded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Identity, OccasionId, SeatNumber, TicketId};

/// A minted ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub occasion_id: OccasionId,
    pub seat: SeatNumber,
    pub owner: Identity,
    /// What the buyer actually attached. May exceed the listed cost.
    pub price_paid: Decimal,
}

impl Ticket {
    /// Amount paid above the listed cost. Retained by the registry.
    #[must_use]
    pub fn overpayment(&self, listed_cost: Decimal) -> Decimal {
        (self.price_paid - listed_cost).max(Decimal::ZERO)
    }
}
