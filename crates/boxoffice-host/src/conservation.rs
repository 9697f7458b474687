//! Value conservation invariant checker.
//!
//! The host never creates or destroys value except through explicit
//! funding, so after every transaction:
//! ```text
//! Σ(external accounts) + custodied balance == Σ(funded)
//! ```
//!
//! If this ever breaks, the transaction that broke it is reverted.

use boxoffice_types::{BoxOfficeError, Result};
use rust_decimal::Decimal;

/// Tracks how much value has entered the system.
#[derive(Debug, Clone, Default)]
pub struct ValueConservation {
    funded: Decimal,
}

impl ValueConservation {
    #[must_use]
    pub fn new() -> Self {
        Self {
            funded: Decimal::ZERO,
        }
    }

    /// # Errors
    /// Returns [`BoxOfficeError::BalanceOverflow`] if the running total
    /// would overflow; the total is then unchanged.
    pub fn record_funding(&mut self, amount: Decimal) -> Result<()> {
        self.funded = self
            .funded
            .checked_add(amount)
            .ok_or(BoxOfficeError::BalanceOverflow)?;
        Ok(())
    }

    #[must_use]
    pub fn total_funded(&self) -> Decimal {
        self.funded
    }

    /// # Errors
    /// Returns [`BoxOfficeError::InvariantViolation`] if `accounts + custodied`
    /// differs from the total funded.
    pub fn verify(&self, accounts: Decimal, custodied: Decimal) -> Result<()> {
        if accounts.checked_add(custodied) != Some(self.funded) {
            return Err(BoxOfficeError::InvariantViolation {
                reason: format!(
                    "value not conserved: accounts {accounts} + custodied {custodied} \
                     != funded {}",
                    self.funded
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_balanced() {
        let vc = ValueConservation::new();
        assert!(vc.verify(Decimal::ZERO, Decimal::ZERO).is_ok());
    }

    #[test]
    fn funding_accumulates() {
        let mut vc = ValueConservation::new();
        vc.record_funding(Decimal::new(10, 0)).unwrap();
        vc.record_funding(Decimal::new(5, 0)).unwrap();
        assert_eq!(vc.total_funded(), Decimal::new(15, 0));
    }

    #[test]
    fn moving_value_into_custody_is_conserved() {
        let mut vc = ValueConservation::new();
        vc.record_funding(Decimal::new(10, 0)).unwrap();
        assert!(vc.verify(Decimal::new(9, 0), Decimal::ONE).is_ok());
    }

    #[test]
    fn created_value_detected() {
        let mut vc = ValueConservation::new();
        vc.record_funding(Decimal::new(10, 0)).unwrap();
        let err = vc.verify(Decimal::new(10, 0), Decimal::ONE).unwrap_err();
        assert!(matches!(err, BoxOfficeError::InvariantViolation { .. }));
    }

    #[test]
    fn funding_overflow_keeps_total() {
        let mut vc = ValueConservation::new();
        vc.record_funding(Decimal::MAX).unwrap();
        let err = vc.record_funding(Decimal::ONE).unwrap_err();
        assert_eq!(err, BoxOfficeError::BalanceOverflow);
        assert_eq!(vc.total_funded(), Decimal::MAX);
    }

    #[test]
    fn overflowing_sum_is_a_violation() {
        let mut vc = ValueConservation::new();
        vc.record_funding(Decimal::MAX).unwrap();
        let err = vc.verify(Decimal::MAX, Decimal::ONE).unwrap_err();
        assert!(matches!(err, BoxOfficeError::InvariantViolation { .. }));
    }
}
