//! Configuration types for registries, host ledgers, and scripted scenarios.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BoxOfficeError, Call, Identity, Result, constants, occasion::check_len};

/// Construction parameters of a ticket registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Collection name, e.g. "TokenMaster".
    pub name: String,
    /// Collection symbol, e.g. "TM".
    pub symbol: String,
}

impl RegistryConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    /// # Errors
    /// Returns `InvalidArgument` if the name or symbol is empty or too long.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BoxOfficeError::invalid("registry name must not be empty"));
        }
        if self.symbol.trim().is_empty() {
            return Err(BoxOfficeError::invalid("registry symbol must not be empty"));
        }
        check_len("registry name", &self.name, constants::MAX_REGISTRY_NAME_LEN)?;
        check_len("registry symbol", &self.symbol, constants::MAX_REGISTRY_SYMBOL_LEN)?;
        Ok(())
    }
}

/// Host ledger tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Re-check registry invariants and value conservation after every
    /// transaction, reverting it on violation.
    #[serde(default = "default_verify_invariants")]
    pub verify_invariants: bool,
}

fn default_verify_invariants() -> bool {
    true
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            verify_invariants: default_verify_invariants(),
        }
    }
}

/// An externally funded account in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundedAccount {
    pub label: String,
    pub balance: Decimal,
}

/// One scripted transaction. Callers are referred to by label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioStep {
    pub caller: String,
    pub call: Call,
}

/// A complete scripted run: deploy a registry, fund accounts, replay calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub registry: RegistryConfig,
    /// Label of the deploying identity, which becomes the custodian.
    pub custodian: String,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub accounts: Vec<FundedAccount>,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
}

impl ScenarioConfig {
    /// # Errors
    /// Returns `Serialization` for malformed JSON and `Configuration` for a
    /// scenario that parses but cannot run.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// # Errors
    /// As [`Self::from_json_str`], plus `Io` if the file cannot be read.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// # Errors
    /// Returns `Configuration` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.registry
            .validate()
            .map_err(|err| BoxOfficeError::Configuration(err.to_string()))?;
        if self.custodian.trim().is_empty() {
            return Err(BoxOfficeError::Configuration(
                "custodian label must not be empty".into(),
            ));
        }
        if let Some(account) = self.accounts.iter().find(|a| a.balance < Decimal::ZERO) {
            return Err(BoxOfficeError::Configuration(format!(
                "account {} has a negative balance",
                account.label
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn custodian_identity(&self) -> Identity {
        Identity::from_label(&self.custodian)
    }
}
