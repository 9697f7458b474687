//! The host ledger: applies transactions to a registry one at a time.
//!
//! Every submission is all-or-nothing:
//! 1. Consume the transaction ID (replays are refused outright)
//! 2. Snapshot registry and accounts
//! 3. Debit the value attached to the call from the caller's account
//! 4. Dispatch the call, with the account book as payout target
//! 5. Verify registry invariants and value conservation
//! 6. Commit, or restore the snapshot if any step failed
//! 7. Append a [`Receipt`] either way

use boxoffice_registry::TicketRegistry;
use boxoffice_types::{
    Call, Identity, LedgerConfig, Outcome, Receipt, ReceiptStatus, RegistryConfig,
    Result, Transaction,
};
use chrono::Utc;
use rust_decimal::Decimal;

use crate::account_book::AccountBook;
use crate::conservation::ValueConservation;
use crate::replay::ReplayGuard;

/// Single-threaded, totally ordered transaction executor.
#[derive(Debug)]
pub struct Ledger {
    config: LedgerConfig,
    registry: TicketRegistry,
    accounts: AccountBook,
    replay: ReplayGuard,
    conservation: ValueConservation,
    receipts: Vec<Receipt>,
}

impl Ledger {
    /// Deploy a new registry with `deployer` as its custodian.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the registry config is invalid.
    pub fn deploy(
        registry_config: RegistryConfig,
        deployer: Identity,
        config: LedgerConfig,
    ) -> Result<Self> {
        let registry = TicketRegistry::new(registry_config, deployer)?;
        tracing::info!(
            custodian = %deployer,
            verify_invariants = config.verify_invariants,
            "Ledger deployed"
        );
        Ok(Self {
            config,
            registry,
            accounts: AccountBook::new(),
            replay: ReplayGuard::new(),
            conservation: ValueConservation::new(),
            receipts: Vec::new(),
        })
    }

    /// Genesis funding of an external account.
    ///
    /// Either both the account and the funded total grow, or neither does.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a negative amount, or `BalanceOverflow`
    /// if the account or the funded total would overflow.
    pub fn fund(&mut self, owner: Identity, amount: Decimal) -> Result<()> {
        let mut conservation = self.conservation.clone();
        conservation.record_funding(amount)?;
        self.accounts.fund(owner, amount)?;
        self.conservation = conservation;
        tracing::debug!(owner = %owner, amount = %amount, "Account funded");
        Ok(())
    }

    /// Make every payout to `owner` fail, as a contract whose receive hook
    /// reverts would.
    pub fn reject_incoming(&mut self, owner: Identity) {
        self.accounts.reject_incoming(owner);
    }

    pub fn accept_incoming(&mut self, owner: Identity) {
        self.accounts.accept_incoming(owner);
    }

    /// Build a fresh transaction for `call` and submit it.
    ///
    /// # Errors
    /// As [`Self::submit`].
    pub fn execute(&mut self, caller: Identity, call: Call) -> Result<Outcome> {
        self.submit(Transaction::new(caller, call))
    }

    /// Apply one transaction atomically.
    ///
    /// A replayed transaction ID is refused before anything runs and leaves
    /// no receipt. Any other failure reverts every effect of the call and
    /// records a `Reverted` receipt.
    ///
    /// # Errors
    /// - `DuplicateTransaction` if the ID was already submitted
    /// - `InsufficientFunds` if the caller cannot cover the attached value
    /// - any error the registry operation returns
    /// - `InvariantViolation` if post-execution verification fails
    pub fn submit(&mut self, tx: Transaction) -> Result<Outcome> {
        self.replay.consume(tx.id)?;

        let registry_snapshot = self.registry.clone();
        let accounts_snapshot = self.accounts.clone();

        let result = self.run(&tx);
        if result.is_err() {
            self.registry = registry_snapshot;
            self.accounts = accounts_snapshot;
        }

        let height = self.receipts.len() as u64 + 1;
        let state_digest = self.registry.state_digest();
        let status = match &result {
            Ok(outcome) => {
                tracing::info!(
                    height,
                    tx_id = %tx.id,
                    caller = %tx.caller,
                    call = %tx.call,
                    digest = %hex::encode(&state_digest[..8]),
                    "Transaction committed"
                );
                ReceiptStatus::Committed(outcome.clone())
            }
            Err(err) => {
                tracing::warn!(
                    height,
                    tx_id = %tx.id,
                    caller = %tx.caller,
                    call = %tx.call,
                    code = err.code(),
                    error = %err,
                    "Transaction reverted"
                );
                ReceiptStatus::Reverted {
                    code: err.code(),
                    reason: err.to_string(),
                }
            }
        };

        self.receipts.push(Receipt {
            height,
            tx_id: tx.id,
            caller: tx.caller,
            call: tx.call.name().to_string(),
            status,
            state_digest,
            committed_at: Utc::now(),
        });
        result
    }

    fn run(&mut self, tx: &Transaction) -> Result<Outcome> {
        self.accounts.debit(tx.caller, tx.call.attached_value())?;
        let outcome = self
            .registry
            .apply(tx.caller, &tx.call, &mut self.accounts)?;
        if self.config.verify_invariants {
            self.verify()?;
        }
        Ok(outcome)
    }

    /// Check registry invariants and global value conservation.
    ///
    /// # Errors
    /// Returns `InvariantViolation` naming the first broken invariant.
    pub fn verify(&self) -> Result<()> {
        self.registry.verify_invariants()?;
        self.conservation
            .verify(self.accounts.total(), self.registry.custodied_balance())
    }

    // -----------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------

    #[must_use]
    pub fn registry(&self) -> &TicketRegistry {
        &self.registry
    }

    #[must_use]
    pub fn accounts(&self) -> &AccountBook {
        &self.accounts
    }

    #[must_use]
    pub fn balance(&self, owner: Identity) -> Decimal {
        self.accounts.balance(owner)
    }

    #[must_use]
    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// Number of processed (committed or reverted) transactions.
    #[must_use]
    pub fn height(&self) -> u64 {
        self.receipts.len() as u64
    }

    #[must_use]
    pub fn total_funded(&self) -> Decimal {
        self.conservation.total_funded()
    }
}
