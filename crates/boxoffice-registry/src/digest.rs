//! Deterministic state digests for cross-replica consistency.
//!
//! Every replica applying the same calls in the same order must hold the
//! same registry state. The digest is a SHA-256 over that state in canonical
//! order, so replicas can compare 32 bytes instead of whole tables.

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use boxoffice_types::constants;

use crate::registry::TicketRegistry;

/// Compute the state digest of a registry.
///
/// Covers, in order:
/// - name, symbol, custodian
/// - every occasion (all fields, including `remaining_seats`)
/// - every ticket in mint order (which also fixes bookings, purchase flags,
///   seat sequences, and holdings)
/// - custodied balance and running totals
#[must_use]
pub fn compute_state_digest(registry: &TicketRegistry) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(constants::STATE_DIGEST_DOMAIN);

    update_str(&mut hasher, registry.name());
    update_str(&mut hasher, registry.symbol());
    hasher.update(registry.custodian().as_bytes());

    hasher.update(registry.total_occasions().to_le_bytes());
    for occasion in registry.occasions() {
        hasher.update(occasion.id.0.to_le_bytes());
        update_str(&mut hasher, &occasion.name);
        update_decimal(&mut hasher, occasion.cost);
        hasher.update(occasion.max_seats.to_le_bytes());
        hasher.update(occasion.remaining_seats.to_le_bytes());
        update_str(&mut hasher, &occasion.date);
        update_str(&mut hasher, &occasion.time);
        update_str(&mut hasher, &occasion.location);
    }

    hasher.update(registry.total_supply().to_le_bytes());
    for ticket in registry.tickets() {
        hasher.update(ticket.id.0.to_le_bytes());
        hasher.update(ticket.occasion_id.0.to_le_bytes());
        hasher.update(ticket.seat.to_le_bytes());
        hasher.update(ticket.owner.as_bytes());
        update_decimal(&mut hasher, ticket.price_paid);
    }

    let payments = registry.payments();
    update_decimal(&mut hasher, payments.balance());
    update_decimal(&mut hasher, payments.total_received());
    update_decimal(&mut hasher, payments.total_withdrawn());

    let result = hasher.finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}

/// Recompute the digest and compare it with `expected`.
#[must_use]
pub fn verify_state_digest(registry: &TicketRegistry, expected: &[u8; 32]) -> bool {
    compute_state_digest(registry) == *expected
}

// Length-prefixed so that adjacent fields cannot run into each other.
fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

// `1` and `1.0` are the same amount and must hash the same.
fn update_decimal(hasher: &mut Sha256, value: Decimal) {
    update_str(hasher, &value.normalize().to_string());
}
