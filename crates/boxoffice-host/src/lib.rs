//! # boxoffice-host
//!
//! The execution substrate a ticket registry lives in: external account
//! balances, replay protection, and a ledger that applies one transaction
//! at a time, all-or-nothing.
//!
//! ## Architecture
//!
//! 1. **AccountBook**: external balances per identity; the registry's payout target
//! 2. **ReplayGuard**: refuses any transaction ID already processed
//! 3. **ValueConservation**: `Σ accounts + custodied == Σ funded`
//! 4. **Ledger**: snapshot → debit attached value → dispatch → verify → commit or restore
//!
//! ## Transaction Flow
//!
//! ```text
//! Transaction → ReplayGuard.consume() → snapshot → AccountBook.debit(value)
//!     → TicketRegistry.apply(call, &mut AccountBook) → verify → Receipt
//! ```

pub mod account_book;
pub mod conservation;
pub mod ledger;
pub mod replay;

pub use account_book::AccountBook;
pub use conservation::ValueConservation;
pub use ledger::Ledger;
pub use replay::ReplayGuard;
