//! # boxoffice-registry
//!
//! The ticket registry state machine: occasion listing, seat-level ticket
//! minting, and custody of the proceeds.
//!
//! ## Architecture
//!
//! Four components, composed by [`TicketRegistry`] into one state container:
//! 1. **AccessGate**: holds the custodian identity, guards privileged calls
//! 2. **OccasionRegistry**: append-only table of occasions, sequential IDs
//! 3. **TicketLedger**: seat bookings, purchase flags, seat sequences, tickets
//! 4. **PaymentCustodian**: the custodied balance, deposits and withdrawal
//!
//! ## Call Flow
//!
//! ```text
//! add_occasion → AccessGate.ensure_custodian() → OccasionRegistry.add()
//! mint         → OccasionRegistry.get_mut() → checks → PaymentCustodian.deposit() → TicketLedger.record()
//! withdraw     → AccessGate.ensure_custodian() → PaymentCustodian.withdraw() (zeroes) → Payout.pay()
//! ```
//!
//! Every operation is all-or-nothing. Preconditions are checked before the
//! first mutation, and the only step that can fail after a mutation (the
//! external payout in `withdraw`) restores the prior state on failure.

pub mod access_gate;
pub mod custodian;
pub mod digest;
pub mod occasions;
pub mod payout;
pub mod registry;
pub mod ticket_ledger;

pub use access_gate::AccessGate;
pub use custodian::PaymentCustodian;
pub use digest::{compute_state_digest, verify_state_digest};
pub use occasions::OccasionRegistry;
pub use payout::Payout;
pub use registry::TicketRegistry;
pub use ticket_ledger::TicketLedger;
