//! External account balances.
//!
//! These are the balances the registry does *not* own: what buyers pay from
//! and what the custodian is paid into. Every mutation is atomic: either the
//! full operation succeeds or the balance is unchanged.

use std::collections::{BTreeMap, BTreeSet};

use boxoffice_registry::{Payout, TicketRegistry};
use boxoffice_types::{BoxOfficeError, Identity, Result};
use rust_decimal::Decimal;

/// Per-identity external balances.
#[derive(Debug, Clone, Default)]
pub struct AccountBook {
    balances: BTreeMap<Identity, Decimal>,
    /// Accounts whose receive hook fails: any credit to them is refused.
    rejecting: BTreeSet<Identity>,
}

impl AccountBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create value in an account out of thin air (genesis funding).
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a negative amount, or `BalanceOverflow`
    /// if the account cannot hold it.
    pub fn fund(&mut self, owner: Identity, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(BoxOfficeError::InvalidArgument {
                reason: format!("funding amount must be non-negative, got {amount}"),
            });
        }
        self.add(owner, amount)
    }

    /// Take value out of an account to attach it to a call.
    ///
    /// # Errors
    /// Returns `InsufficientFunds` if the balance is below `amount`, or
    /// `InvalidArgument` for a negative amount.
    pub fn debit(&mut self, owner: Identity, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(BoxOfficeError::InvalidArgument {
                reason: format!("debit amount must be non-negative, got {amount}"),
            });
        }
        let available = self.balance(owner);
        if available < amount {
            return Err(BoxOfficeError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        self.balances.insert(owner, available - amount);
        Ok(())
    }

    /// Move value into an account.
    ///
    /// # Errors
    /// Returns `TransferFailed` if the account refuses incoming payments,
    /// or `BalanceOverflow` if it cannot hold `amount`.
    pub fn credit(&mut self, owner: Identity, amount: Decimal) -> Result<()> {
        if self.rejecting.contains(&owner) {
            return Err(BoxOfficeError::TransferFailed {
                reason: format!("{owner} refuses incoming payments"),
            });
        }
        self.add(owner, amount)
    }

    fn add(&mut self, owner: Identity, amount: Decimal) -> Result<()> {
        let updated = self
            .balance(owner)
            .checked_add(amount)
            .ok_or(BoxOfficeError::BalanceOverflow)?;
        self.balances.insert(owner, updated);
        Ok(())
    }

    #[must_use]
    pub fn balance(&self, owner: Identity) -> Decimal {
        self.balances.get(&owner).copied().unwrap_or(Decimal::ZERO)
    }

    /// Sum of every external balance.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.balances.values().copied().sum()
    }

    /// Make every future credit to `owner` fail.
    pub fn reject_incoming(&mut self, owner: Identity) {
        self.rejecting.insert(owner);
    }

    pub fn accept_incoming(&mut self, owner: Identity) {
        self.rejecting.remove(&owner);
    }
}

impl Payout for AccountBook {
    fn pay(&mut self, _registry: &mut TicketRegistry, to: Identity, amount: Decimal) -> Result<()> {
        self.credit(to, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fund_increases_balance() {
        let mut book = AccountBook::new();
        let user = Identity::new();
        book.fund(user, Decimal::new(1000, 0)).unwrap();
        assert_eq!(book.balance(user), Decimal::new(1000, 0));
        assert_eq!(book.total(), Decimal::new(1000, 0));
    }

    #[test]
    fn negative_funding_rejected() {
        let mut book = AccountBook::new();
        let err = book.fund(Identity::new(), Decimal::new(-5, 0)).unwrap_err();
        assert!(matches!(err, BoxOfficeError::InvalidArgument { .. }));
    }

    #[test]
    fn debit_insufficient_fails() {
        let mut book = AccountBook::new();
        let user = Identity::new();
        book.fund(user, Decimal::new(100, 0)).unwrap();
        let err = book.debit(user, Decimal::new(200, 0)).unwrap_err();
        assert_eq!(
            err,
            BoxOfficeError::InsufficientFunds {
                needed: Decimal::new(200, 0),
                available: Decimal::new(100, 0),
            }
        );
        assert_eq!(book.balance(user), Decimal::new(100, 0));
    }

    #[test]
    fn debit_reduces_balance() {
        let mut book = AccountBook::new();
        let user = Identity::new();
        book.fund(user, Decimal::new(100, 0)).unwrap();
        book.debit(user, Decimal::new(40, 0)).unwrap();
        assert_eq!(book.balance(user), Decimal::new(60, 0));
    }

    #[test]
    fn rejecting_account_refuses_credit() {
        let mut book = AccountBook::new();
        let user = Identity::new();
        book.reject_incoming(user);
        let err = book.credit(user, Decimal::ONE).unwrap_err();
        assert!(matches!(err, BoxOfficeError::TransferFailed { .. }));
        assert_eq!(book.balance(user), Decimal::ZERO);

        book.accept_incoming(user);
        book.credit(user, Decimal::ONE).unwrap();
        assert_eq!(book.balance(user), Decimal::ONE);
    }

    #[test]
    fn overflowing_credit_leaves_balance() {
        let mut book = AccountBook::new();
        let user = Identity::new();
        book.fund(user, Decimal::MAX).unwrap();

        assert_eq!(book.credit(user, Decimal::ONE).unwrap_err(), BoxOfficeError::BalanceOverflow);
        assert_eq!(book.fund(user, Decimal::ONE).unwrap_err(), BoxOfficeError::BalanceOverflow);
        assert_eq!(book.balance(user), Decimal::MAX);
    }

    #[test]
    fn unknown_account_is_zero() {
        let book = AccountBook::new();
        assert_eq!(book.balance(Identity::new()), Decimal::ZERO);
        assert_eq!(book.total(), Decimal::ZERO);
    }
}
