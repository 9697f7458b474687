//! Payment custody.
//!
//! Tracks the registry's aggregate held balance together with running
//! totals, so that the conservation invariant can be checked at any time:
//! ```text
//! balance == Σ(accepted payments) - Σ(withdrawn amounts)
//! ```

use boxoffice_types::{BoxOfficeError, Result};
use rust_decimal::Decimal;

/// Owns the custodied balance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentCustodian {
    balance: Decimal,
    total_received: Decimal,
    total_withdrawn: Decimal,
}

impl PaymentCustodian {
    #[must_use]
    pub fn new() -> Self {
        Self {
            balance: Decimal::ZERO,
            total_received: Decimal::ZERO,
            total_withdrawn: Decimal::ZERO,
        }
    }

    /// Accept a payment. Called only from within a mint.
    ///
    /// # Errors
    /// - `InvalidArgument` if `amount` is negative
    /// - `BalanceOverflow` if the balance or running total would overflow
    pub fn deposit(&mut self, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(BoxOfficeError::InvalidArgument {
                reason: format!("deposit amount must be non-negative, got {amount}"),
            });
        }
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(BoxOfficeError::BalanceOverflow)?;
        let received = self
            .total_received
            .checked_add(amount)
            .ok_or(BoxOfficeError::BalanceOverflow)?;

        self.balance = balance;
        self.total_received = received;
        Ok(())
    }

    /// Empty the balance and return what was held.
    ///
    /// This only performs the internal effect. The caller has already passed
    /// the access gate. Moving the value out is the caller's job and must
    /// happen **after** this returns, so that anything re-entering during the
    /// transfer already sees a zero balance.
    pub fn withdraw(&mut self) -> Decimal {
        let amount = std::mem::replace(&mut self.balance, Decimal::ZERO);
        self.total_withdrawn += amount;
        amount
    }

    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    #[must_use]
    pub fn total_received(&self) -> Decimal {
        self.total_received
    }

    #[must_use]
    pub fn total_withdrawn(&self) -> Decimal {
        self.total_withdrawn
    }

    /// # Errors
    /// Returns `InvariantViolation` if the balance has drifted from
    /// `received - withdrawn`.
    pub fn verify(&self) -> Result<()> {
        let expected = self.total_received - self.total_withdrawn;
        if self.balance != expected {
            return Err(BoxOfficeError::InvariantViolation {
                reason: format!(
                    "custodied balance {} != expected {expected} \
                     (received={}, withdrawn={})",
                    self.balance, self.total_received, self.total_withdrawn
                ),
            });
        }
        Ok(())
    }
}
