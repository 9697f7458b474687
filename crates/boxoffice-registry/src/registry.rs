//! The registry state container.
//!
//! [`TicketRegistry`] composes the four components and is the only public
//! entry point for state changes. It is passed explicitly (`&mut self`) into
//! every operation, and every operation takes the caller identity as a plain
//! argument.

use boxoffice_types::{
    BoxOfficeError, Call, Identity, Occasion, OccasionId, OccasionListing, Outcome,
    RegistryConfig, Result, SeatNumber, Ticket, TicketId,
};
use rust_decimal::Decimal;

use crate::{
    access_gate::AccessGate, custodian::PaymentCustodian, digest, occasions::OccasionRegistry,
    payout::Payout, ticket_ledger::TicketLedger,
};

/// One deployed ticket registry.
#[derive(Debug, Clone)]
pub struct TicketRegistry {
    config: RegistryConfig,
    gate: AccessGate,
    occasions: OccasionRegistry,
    ledger: TicketLedger,
    custodian: PaymentCustodian,
}

impl TicketRegistry {
    /// Deploy a registry. The deployer becomes the custodian.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the name or symbol is malformed.
    pub fn new(config: RegistryConfig, deployer: Identity) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            name = %config.name,
            symbol = %config.symbol,
            custodian = %deployer,
            "Registry deployed"
        );
        Ok(Self {
            config,
            gate: AccessGate::new(deployer),
            occasions: OccasionRegistry::new(),
            ledger: TicketLedger::new(),
            custodian: PaymentCustodian::new(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    #[must_use]
    pub fn custodian(&self) -> Identity {
        self.gate.custodian()
    }

    #[must_use]
    pub fn is_custodian(&self, caller: Identity) -> bool {
        self.gate.is_custodian(caller)
    }

    // -----------------------------------------------------------------
    // Occasions
    // -----------------------------------------------------------------

    /// # Errors
    /// `Unauthorized` or `InvalidArgument`.
    pub fn add_occasion(&mut self, caller: Identity, listing: OccasionListing) -> Result<OccasionId> {
        self.occasions.add_occasion(&self.gate, caller, listing)
    }

    /// # Errors
    /// `OccasionNotFound` if `id` is outside `[1, total_occasions()]`.
    pub fn get_occasion(&self, id: OccasionId) -> Result<&Occasion> {
        self.occasions.get(id)
    }

    #[must_use]
    pub fn total_occasions(&self) -> u64 {
        self.occasions.total()
    }

    pub fn occasions(&self) -> impl Iterator<Item = &Occasion> {
        self.occasions.iter()
    }

    // -----------------------------------------------------------------
    // Tickets
    // -----------------------------------------------------------------

    /// Buy `seat` on `occasion_id` with `paid` attached. Returns the new
    /// ticket's ID.
    ///
    /// # Errors
    /// `OccasionNotFound`, `SoldOut`, `SeatOutOfRange`, `SeatAlreadyBooked`,
    /// `InsufficientPayment`, `BalanceOverflow`.
    pub fn mint(
        &mut self,
        caller: Identity,
        occasion_id: OccasionId,
        seat: SeatNumber,
        paid: Decimal,
    ) -> Result<TicketId> {
        self.ledger.mint(
            &mut self.occasions,
            &mut self.custodian,
            caller,
            occasion_id,
            seat,
            paid,
        )
    }

    #[must_use]
    pub fn has_bought(&self, occasion_id: OccasionId, buyer: Identity) -> bool {
        self.ledger.has_bought(occasion_id, buyer)
    }

    /// Owner of a seat, or `None` while it is unsold.
    #[must_use]
    pub fn booked_seat(&self, occasion_id: OccasionId, seat: SeatNumber) -> Option<Identity> {
        self.ledger.booked_seat(occasion_id, seat)
    }

    /// Seats sold on an occasion, in mint order.
    ///
    /// # Errors
    /// `OccasionNotFound` for an unknown occasion.
    pub fn get_booked_seats(&self, occasion_id: OccasionId) -> Result<&[SeatNumber]> {
        self.occasions.get(occasion_id)?;
        Ok(self.ledger.booked_seats(occasion_id))
    }

    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.ledger.total_supply()
    }

    /// # Errors
    /// `TicketNotFound`.
    pub fn owner_of(&self, ticket_id: TicketId) -> Result<Identity> {
        self.ledger.owner_of(ticket_id)
    }

    /// # Errors
    /// `TicketNotFound`.
    pub fn ticket(&self, ticket_id: TicketId) -> Result<&Ticket> {
        self.ledger.ticket(ticket_id)
    }

    #[must_use]
    pub fn balance_of(&self, owner: Identity) -> u64 {
        self.ledger.balance_of(owner)
    }

    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.ledger.tickets()
    }

    // -----------------------------------------------------------------
    // Custody
    // -----------------------------------------------------------------

    #[must_use]
    pub fn custodied_balance(&self) -> Decimal {
        self.custodian.balance()
    }

    #[must_use]
    pub fn payments(&self) -> &PaymentCustodian {
        &self.custodian
    }

    /// Disburse the whole custodied balance to the custodian.
    ///
    /// The balance is zeroed **before** `payout` runs. If the payout fails,
    /// the registry is restored to exactly its state before this call,
    /// including anything a re-entrant caller did in between.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the custodian
    /// - `TransferFailed` if the payout fails
    pub fn withdraw<P>(&mut self, caller: Identity, payout: &mut P) -> Result<Decimal>
    where
        P: Payout + ?Sized,
    {
        self.gate.ensure_custodian(caller)?;
        let checkpoint = self.clone();

        let amount = self.custodian.withdraw();
        let to = self.gate.custodian();

        if let Err(err) = payout.pay(self, to, amount) {
            *self = checkpoint;
            tracing::warn!(
                custodian = %to,
                amount = %amount,
                error = %err,
                "Withdrawal payout failed, state restored"
            );
            return Err(match err {
                failed @ BoxOfficeError::TransferFailed { .. } => failed,
                other => BoxOfficeError::TransferFailed {
                    reason: other.to_string(),
                },
            });
        }

        tracing::info!(custodian = %to, amount = %amount, "Proceeds withdrawn");
        Ok(amount)
    }

    // -----------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------

    /// Execute one state-changing [`Call`] on behalf of `caller`.
    ///
    /// For `Call::Mint` the attached `value` is taken as already paid; the
    /// host is responsible for having debited it from the caller.
    ///
    /// # Errors
    /// Whatever the dispatched operation returns.
    pub fn apply<P>(&mut self, caller: Identity, call: &Call, payout: &mut P) -> Result<Outcome>
    where
        P: Payout + ?Sized,
    {
        match call {
            Call::AddOccasion(listing) => self
                .add_occasion(caller, listing.clone())
                .map(Outcome::OccasionAdded),
            Call::Mint {
                occasion_id,
                seat,
                value,
            } => self
                .mint(caller, *occasion_id, *seat, *value)
                .map(Outcome::TicketMinted),
            Call::Withdraw => self.withdraw(caller, payout).map(Outcome::Withdrawn),
        }
    }

    // -----------------------------------------------------------------
    // Verification
    // -----------------------------------------------------------------

    /// Check every registry invariant:
    /// - occasion and ticket IDs are dense from their first ID
    /// - per occasion, `remaining_seats == max_seats - bookings` and the seat
    ///   sequence matches the bookings
    /// - tickets, bookings, and holdings all agree on the supply
    /// - `custodied == received - withdrawn`, and `received` equals the sum
    ///   of every ticket's price paid
    ///
    /// # Errors
    /// Returns `InvariantViolation` naming the first broken invariant.
    pub fn verify_invariants(&self) -> Result<()> {
        let mut expected_id = OccasionId::FIRST;
        for (idx, occasion) in self.occasions.iter().enumerate() {
            if occasion.id != expected_id {
                return Err(violation(format!(
                    "occasion at position {idx} has {} (expected {expected_id})",
                    occasion.id
                )));
            }
            expected_id = expected_id.next();

            let booked = self.ledger.booking_count(occasion.id);
            let sequence = self.ledger.booked_seats(occasion.id).len();
            let sold = occasion.sold_seats() as usize;
            if occasion.remaining_seats > occasion.max_seats || booked != sold || sequence != sold {
                return Err(violation(format!(
                    "{}: remaining={} max={} bookings={booked} sequence={sequence}",
                    occasion.id, occasion.remaining_seats, occasion.max_seats
                )));
            }
        }

        let mut expected_ticket = TicketId::FIRST;
        for ticket in self.ledger.tickets() {
            if ticket.id != expected_ticket {
                return Err(violation(format!(
                    "found {} where {expected_ticket} was expected",
                    ticket.id
                )));
            }
            expected_ticket = expected_ticket.next();
        }

        let supply = self.ledger.total_supply();
        let bookings = self.ledger.total_bookings() as u64;
        let held = self.ledger.total_held();
        if supply != bookings || supply != held {
            return Err(violation(format!(
                "supply={supply} bookings={bookings} held={held}"
            )));
        }

        self.custodian.verify()?;

        let paid: Decimal = self.ledger.tickets().map(|t| t.price_paid).sum();
        if paid != self.custodian.total_received() {
            return Err(violation(format!(
                "tickets paid {paid} != custodian received {}",
                self.custodian.total_received()
            )));
        }
        Ok(())
    }

    /// SHA-256 digest of the full registry state. Identical on every replica
    /// that applied the same calls in the same order.
    #[must_use]
    pub fn state_digest(&self) -> [u8; 32] {
        digest::compute_state_digest(self)
    }
}

fn violation(reason: String) -> BoxOfficeError {
    tracing::error!(reason = %reason, "Registry invariant violated");
    BoxOfficeError::InvariantViolation { reason }
}
