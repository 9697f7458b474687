//! Replay protection for submitted transactions.
//!
//! A transaction ID is consumed the first time the ledger sees it, whether
//! the call then commits or reverts, and it stays consumed for the life of
//! the ledger. The ledger keeps a receipt for every processed transaction
//! anyway, so this set never outgrows the receipt log.

use std::collections::HashSet;

use boxoffice_types::{BoxOfficeError, Result, TxId};

/// Every transaction ID the ledger has processed.
#[derive(Debug, Clone, Default)]
pub struct ReplayGuard {
    consumed: HashSet<TxId>,
}

impl ReplayGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume `tx_id`.
    ///
    /// # Errors
    /// Returns [`BoxOfficeError::DuplicateTransaction`] if it was consumed
    /// before, however long ago.
    pub fn consume(&mut self, tx_id: TxId) -> Result<()> {
        if self.consumed.insert(tx_id) {
            Ok(())
        } else {
            Err(BoxOfficeError::DuplicateTransaction(tx_id))
        }
    }

    #[must_use]
    pub fn is_consumed(&self, tx_id: &TxId) -> bool {
        self.consumed.contains(tx_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_use_is_refused() {
        let mut guard = ReplayGuard::new();
        let tx = TxId::new();
        guard.consume(tx).unwrap();
        assert_eq!(
            guard.consume(tx).unwrap_err(),
            BoxOfficeError::DuplicateTransaction(tx)
        );
        assert_eq!(guard.len(), 1);
    }

    #[test]
    fn old_ids_never_expire() {
        let mut guard = ReplayGuard::new();
        let first = TxId::from_bytes([0xFF; 16]);
        guard.consume(first).unwrap();
        for i in 0..10_000u32 {
            let mut bytes = [0u8; 16];
            bytes[..4].copy_from_slice(&i.to_be_bytes());
            guard.consume(TxId::from_bytes(bytes)).unwrap();
        }

        assert!(guard.is_consumed(&first));
        assert!(matches!(
            guard.consume(first),
            Err(BoxOfficeError::DuplicateTransaction(id)) if id == first
        ));
    }

    #[test]
    fn fresh_guard_is_empty() {
        let guard = ReplayGuard::new();
        assert!(guard.is_empty());
        assert!(!guard.is_consumed(&TxId::new()));
    }
}
