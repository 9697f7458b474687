//! The seam through which value leaves the registry.
//!
//! The hosting environment moves value between accounts; the registry only
//! decides *that* value should move. A payout receives the registry itself
//! because, on a real ledger, paying an account hands control to that
//! account's code, which may call straight back into the registry.

use boxoffice_types::{Identity, Result};
use rust_decimal::Decimal;

use crate::registry::TicketRegistry;

/// Atomic-or-fails value transfer provided by the environment.
///
/// An `Err` means nothing moved. The registry maps any error into
/// `TransferFailed` and restores its own state.
pub trait Payout {
    /// Transfer `amount` to `to`. `registry` is already in its post-effect
    /// state when this runs.
    fn pay(&mut self, registry: &mut TicketRegistry, to: Identity, amount: Decimal) -> Result<()>;
}

impl<F> Payout for F
where
    F: FnMut(&mut TicketRegistry, Identity, Decimal) -> Result<()>,
{
    fn pay(&mut self, registry: &mut TicketRegistry, to: Identity, amount: Decimal) -> Result<()> {
        self(registry, to, amount)
    }
}
