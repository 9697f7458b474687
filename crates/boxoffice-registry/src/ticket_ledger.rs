//! Seat-level ticket ledger.
//!
//! Per occasion, the ledger owns:
//! - the seat → owner map (each key written exactly once, never removed)
//! - the (occasion, buyer) purchase flags (set once, never cleared)
//! - the ordered sequence of seats sold, in mint order
//!
//! and, registry-wide, the minted [`Ticket`] records and per-owner holdings.
//!
//! `mint` checks every precondition before its first mutation. The only
//! fallible mutation (the custodian deposit) runs first, so a failure there
//! also leaves the ledger and the occasion untouched.

use std::collections::{BTreeMap, BTreeSet};

use boxoffice_types::{
    BoxOfficeError, Identity, OccasionId, Result, SeatNumber, Ticket, TicketId,
};
use rust_decimal::Decimal;

use crate::{custodian::PaymentCustodian, occasions::OccasionRegistry};

/// Owns bookings, purchase flags, seat sequences, and minted tickets.
#[derive(Debug, Clone, Default)]
pub struct TicketLedger {
    /// (occasion, seat) → buyer.
    bookings: BTreeMap<(OccasionId, SeatNumber), Identity>,
    /// (occasion, buyer) pairs that have bought at least one seat.
    purchases: BTreeSet<(OccasionId, Identity)>,
    /// Seats sold per occasion, in mint order.
    seat_sequences: BTreeMap<OccasionId, Vec<SeatNumber>>,
    /// Minted tickets. The ticket at index `i` has ID `i + 1`.
    tickets: Vec<Ticket>,
    /// Tickets held per owner.
    holdings: BTreeMap<Identity, u64>,
}

impl TicketLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sell `seat` on `occasion_id` to `caller` for `paid`.
    ///
    /// Preconditions, in order:
    /// 1. the occasion exists
    /// 2. it has seats remaining
    /// 3. `seat` is within `1..=max_seats`
    /// 4. `seat` is not already booked
    /// 5. `paid >= cost` (overpayment is kept)
    ///
    /// On success the booking, purchase flag, seat sequence, seat counter,
    /// ticket record, and custodied balance all change together.
    ///
    /// # Errors
    /// `OccasionNotFound`, `SoldOut`, `SeatOutOfRange`, `SeatAlreadyBooked`,
    /// `InsufficientPayment`, or `BalanceOverflow` from the deposit.
    pub fn mint(
        &mut self,
        occasions: &mut OccasionRegistry,
        custodian: &mut PaymentCustodian,
        caller: Identity,
        occasion_id: OccasionId,
        seat: SeatNumber,
        paid: Decimal,
    ) -> Result<TicketId> {
        let occasion = occasions.get_mut(occasion_id)?;

        if occasion.is_sold_out() {
            return Err(BoxOfficeError::SoldOut(occasion_id));
        }
        if !occasion.has_seat(seat) {
            return Err(BoxOfficeError::SeatOutOfRange {
                occasion_id,
                seat,
                max_seats: occasion.max_seats,
            });
        }
        if self.bookings.contains_key(&(occasion_id, seat)) {
            return Err(BoxOfficeError::SeatAlreadyBooked { occasion_id, seat });
        }
        if paid < occasion.cost {
            return Err(BoxOfficeError::InsufficientPayment {
                needed: occasion.cost,
                paid,
            });
        }

        custodian.deposit(paid)?;

        // Nothing below can fail.
        occasion.remaining_seats -= 1;

        let ticket_id = self
            .tickets
            .last()
            .map_or(TicketId::FIRST, |last| last.id.next());
        self.bookings.insert((occasion_id, seat), caller);
        self.purchases.insert((occasion_id, caller));
        self.seat_sequences
            .entry(occasion_id)
            .or_default()
            .push(seat);
        *self.holdings.entry(caller).or_insert(0) += 1;
        let ticket = Ticket {
            id: ticket_id,
            occasion_id,
            seat,
            owner: caller,
            price_paid: paid,
        };

        tracing::debug!(
            ticket = %ticket_id,
            occasion = %occasion_id,
            seat,
            buyer = %caller,
            paid = %paid,
            overpaid = %ticket.overpayment(occasion.cost),
            remaining = occasion.remaining_seats,
            "Ticket minted"
        );
        self.tickets.push(ticket);

        Ok(ticket_id)
    }

    /// Whether `buyer` holds at least one seat on `occasion_id`.
    #[must_use]
    pub fn has_bought(&self, occasion_id: OccasionId, buyer: Identity) -> bool {
        self.purchases.contains(&(occasion_id, buyer))
    }

    /// Owner of a seat, or `None` if it is unsold.
    #[must_use]
    pub fn booked_seat(&self, occasion_id: OccasionId, seat: SeatNumber) -> Option<Identity> {
        self.bookings.get(&(occasion_id, seat)).copied()
    }

    /// Seats sold on an occasion, in mint order. Empty for unseen occasions.
    #[must_use]
    pub fn booked_seats(&self, occasion_id: OccasionId) -> &[SeatNumber] {
        self.seat_sequences
            .get(&occasion_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// # Errors
    /// Returns `TicketNotFound` for an ID that was never minted.
    pub fn ticket(&self, ticket_id: TicketId) -> Result<&Ticket> {
        ticket_id
            .0
            .checked_sub(TicketId::FIRST.0)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|idx| self.tickets.get(idx))
            .ok_or(BoxOfficeError::TicketNotFound(ticket_id))
    }

    /// # Errors
    /// Returns `TicketNotFound` for an ID that was never minted.
    pub fn owner_of(&self, ticket_id: TicketId) -> Result<Identity> {
        self.ticket(ticket_id).map(|t| t.owner)
    }

    /// Number of tickets held by `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: Identity) -> u64 {
        self.holdings.get(&owner).copied().unwrap_or(0)
    }

    /// Number of tickets ever minted.
    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.tickets.len() as u64
    }

    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter()
    }

    /// Number of booking entries for one occasion.
    #[must_use]
    pub fn booking_count(&self, occasion_id: OccasionId) -> usize {
        self.bookings
            .range((occasion_id, SeatNumber::MIN)..=(occasion_id, SeatNumber::MAX))
            .count()
    }

    #[must_use]
    pub fn total_bookings(&self) -> usize {
        self.bookings.len()
    }

    /// Sum of all per-owner holdings.
    #[must_use]
    pub fn total_held(&self) -> u64 {
        self.holdings.values().sum()
    }
}
