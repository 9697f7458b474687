//! Custodian access gate.
//!
//! Holds the single privileged identity fixed at construction. Every
//! custodian-only operation passes through [`AccessGate::ensure_custodian`]
//! before it touches any state.

use boxoffice_types::{BoxOfficeError, Identity, Result};

/// Answers "is this caller the custodian?". Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    custodian: Identity,
}

impl AccessGate {
    #[must_use]
    pub fn new(custodian: Identity) -> Self {
        Self { custodian }
    }

    #[must_use]
    pub fn custodian(&self) -> Identity {
        self.custodian
    }

    #[must_use]
    pub fn is_custodian(&self, caller: Identity) -> bool {
        caller == self.custodian
    }

    /// Guard a privileged call.
    ///
    /// # Errors
    /// Returns [`BoxOfficeError::Unauthorized`] if `caller` is not the custodian.
    pub fn ensure_custodian(&self, caller: Identity) -> Result<()> {
        if self.is_custodian(caller) {
            Ok(())
        } else {
            tracing::warn!(
                caller = %caller,
                custodian = %self.custodian,
                "Privileged call rejected"
            );
            Err(BoxOfficeError::Unauthorized { caller })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custodian_passes() {
        let owner = Identity::new();
        let gate = AccessGate::new(owner);
        assert!(gate.is_custodian(owner));
        assert!(gate.ensure_custodian(owner).is_ok());
        assert_eq!(gate.custodian(), owner);
    }

    #[test]
    fn stranger_is_unauthorized() {
        let gate = AccessGate::new(Identity::new());
        let stranger = Identity::new();
        assert!(!gate.is_custodian(stranger));
        let err = gate.ensure_custodian(stranger).unwrap_err();
        assert_eq!(err, BoxOfficeError::Unauthorized { caller: stranger });
    }
}
