//! Scenario runner behind the `boxoffice` binary.
//!
//! A scenario deploys one registry on a fresh [`Ledger`], funds labelled
//! accounts, then submits each scripted call in order. A call that reverts
//! is recorded in its receipt and the run carries on; only a broken setup
//! or a failed final verification aborts the run.

use std::collections::BTreeMap;

use boxoffice_host::Ledger;
use boxoffice_types::{Identity, Receipt, Result, ScenarioConfig};
use rust_decimal::Decimal;
use serde::Serialize;

/// Summary of a completed scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub symbol: String,
    pub custodian: Identity,
    pub total_occasions: u64,
    pub total_supply: u64,
    pub custodied_balance: Decimal,
    /// Paid above listed cost across every ticket, retained in custody
    /// until withdrawn.
    pub total_overpaid: Decimal,
    pub committed: usize,
    pub reverted: usize,
    /// External balance of every labelled account after the run.
    pub balances: BTreeMap<String, Decimal>,
    /// Hex SHA-256 of the final registry state.
    pub final_digest: String,
    pub receipts: Vec<Receipt>,
}

/// Run `scenario` to completion.
///
/// # Errors
/// Returns `Configuration` for an invalid scenario, any error from deploying
/// or funding, or `InvariantViolation` if the final state fails verification.
pub fn run_scenario(scenario: &ScenarioConfig) -> Result<ScenarioReport> {
    scenario.validate()?;

    let custodian = scenario.custodian_identity();
    let mut ledger = Ledger::deploy(
        scenario.registry.clone(),
        custodian,
        scenario.ledger.clone(),
    )?;

    for account in &scenario.accounts {
        ledger.fund(Identity::from_label(&account.label), account.balance)?;
    }

    for (index, step) in scenario.steps.iter().enumerate() {
        let caller = Identity::from_label(&step.caller);
        if let Err(err) = ledger.execute(caller, step.call.clone()) {
            tracing::debug!(step = index, caller = %step.caller, error = %err, "Step reverted");
        }
    }

    ledger.verify()?;

    let mut balances = BTreeMap::new();
    balances.insert(scenario.custodian.clone(), ledger.balance(custodian));
    for account in &scenario.accounts {
        balances.insert(
            account.label.clone(),
            ledger.balance(Identity::from_label(&account.label)),
        );
    }

    let receipts = ledger.receipts().to_vec();
    let committed = receipts.iter().filter(|r| r.is_committed()).count();
    let registry = ledger.registry();
    let mut total_overpaid = Decimal::ZERO;
    for ticket in registry.tickets() {
        let cost = registry.get_occasion(ticket.occasion_id)?.cost;
        total_overpaid += ticket.overpayment(cost);
    }
    let report = ScenarioReport {
        name: registry.name().to_string(),
        symbol: registry.symbol().to_string(),
        custodian,
        total_occasions: registry.total_occasions(),
        total_supply: registry.total_supply(),
        custodied_balance: registry.custodied_balance(),
        total_overpaid,
        committed,
        reverted: receipts.len() - committed,
        balances,
        final_digest: hex::encode(registry.state_digest()),
        receipts,
    };

    tracing::info!(
        name = %report.name,
        committed = report.committed,
        reverted = report.reverted,
        digest = %report.final_digest,
        "Scenario complete"
    );
    Ok(report)
}
