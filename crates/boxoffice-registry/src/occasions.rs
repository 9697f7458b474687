//! Append-only occasion table.
//!
//! Occasion IDs are dense: the occasion at index `i` always has ID `i + 1`,
//! so `total()` is both the count and the highest assigned ID. There is no
//! update or delete.

use boxoffice_types::{BoxOfficeError, Identity, Occasion, OccasionId, OccasionListing, Result};

use crate::access_gate::AccessGate;

/// Owns every listed occasion.
#[derive(Debug, Clone, Default)]
pub struct OccasionRegistry {
    occasions: Vec<Occasion>,
}

impl OccasionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            occasions: Vec::new(),
        }
    }

    /// List a new occasion with `remaining_seats == max_seats`.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the custodian
    /// - `InvalidArgument` if the listing fails validation
    pub fn add_occasion(
        &mut self,
        gate: &AccessGate,
        caller: Identity,
        listing: OccasionListing,
    ) -> Result<OccasionId> {
        gate.ensure_custodian(caller)?;
        listing.validate()?;

        let id = self
            .occasions
            .last()
            .map_or(OccasionId::FIRST, |last| last.id.next());
        let occasion = Occasion::from_listing(id, listing);

        tracing::info!(
            occasion = %id,
            name = %occasion.name,
            cost = %occasion.cost,
            max_seats = occasion.max_seats,
            "Occasion listed"
        );

        self.occasions.push(occasion);
        Ok(id)
    }

    /// # Errors
    /// Returns `OccasionNotFound` if `id` is outside `[1, total()]`.
    pub fn get(&self, id: OccasionId) -> Result<&Occasion> {
        Self::index_of(id)
            .and_then(|idx| self.occasions.get(idx))
            .ok_or(BoxOfficeError::OccasionNotFound(id))
    }

    /// Mutable access for the ticket ledger, which owns `remaining_seats`.
    pub(crate) fn get_mut(&mut self, id: OccasionId) -> Result<&mut Occasion> {
        Self::index_of(id)
            .and_then(|idx| self.occasions.get_mut(idx))
            .ok_or(BoxOfficeError::OccasionNotFound(id))
    }

    #[must_use]
    pub fn exists(&self, id: OccasionId) -> bool {
        self.get(id).is_ok()
    }

    /// Number of occasions ever listed.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.occasions.len() as u64
    }

    pub fn iter(&self) -> impl Iterator<Item = &Occasion> {
        self.occasions.iter()
    }

    fn index_of(id: OccasionId) -> Option<usize> {
        id.0
            .checked_sub(OccasionId::FIRST.0)
            .and_then(|i| usize::try_from(i).ok())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn setup() -> (OccasionRegistry, AccessGate, Identity) {
        let owner = Identity::new();
        (OccasionRegistry::new(), AccessGate::new(owner), owner)
    }

    #[test]
    fn add_assigns_sequential_ids() {
        let (mut reg, gate, owner) = setup();
        let a = reg
            .add_occasion(&gate, owner, OccasionListing::dummy(Decimal::ONE, 100))
            .unwrap();
        let b = reg
            .add_occasion(&gate, owner, OccasionListing::dummy(Decimal::TWO, 5))
            .unwrap();
        assert_eq!(a, OccasionId::FIRST);
        assert_eq!(b, OccasionId::FIRST.next());
        assert_eq!(reg.total(), 2);
    }

    #[test]
    fn rejected_listing_does_not_consume_an_id() {
        let (mut reg, gate, owner) = setup();
        reg.add_occasion(&gate, owner, OccasionListing::dummy(Decimal::ONE, 0))
            .unwrap_err();
        let id = reg
            .add_occasion(&gate, owner, OccasionListing::dummy(Decimal::ONE, 10))
            .unwrap();
        assert_eq!(id, OccasionId(1));
        assert_eq!(reg.get(id).unwrap().id, id);
    }

    #[test]
    fn get_returns_fields_verbatim() {
        let (mut reg, gate, owner) = setup();
        let listing = OccasionListing::dummy(Decimal::ONE, 100);
        let id = reg.add_occasion(&gate, owner, listing.clone()).unwrap();

        let occasion = reg.get(id).unwrap();
        assert_eq!(occasion.id, OccasionId(1));
        assert_eq!(occasion.name, listing.name);
        assert_eq!(occasion.cost, listing.cost);
        assert_eq!(occasion.max_seats, 100);
        assert_eq!(occasion.remaining_seats, 100);
        assert_eq!(occasion.date, listing.date);
        assert_eq!(occasion.time, listing.time);
        assert_eq!(occasion.location, listing.location);
    }

    #[test]
    fn non_custodian_cannot_list() {
        let (mut reg, gate, _owner) = setup();
        let err = reg
            .add_occasion(&gate, Identity::new(), OccasionListing::dummy(Decimal::ONE, 10))
            .unwrap_err();
        assert!(matches!(err, BoxOfficeError::Unauthorized { .. }));
        assert_eq!(reg.total(), 0);
    }

    #[test]
    fn invalid_listing_leaves_table_unchanged() {
        let (mut reg, gate, owner) = setup();
        let err = reg
            .add_occasion(&gate, owner, OccasionListing::dummy(Decimal::ONE, 0))
            .unwrap_err();
        assert!(matches!(err, BoxOfficeError::InvalidArgument { .. }));
        assert_eq!(reg.total(), 0);
    }

    #[test]
    fn out_of_range_ids_not_found() {
        let (mut reg, gate, owner) = setup();
        reg.add_occasion(&gate, owner, OccasionListing::dummy(Decimal::ONE, 10))
            .unwrap();

        for id in [0, 2, u64::MAX] {
            let err = reg.get(OccasionId(id)).unwrap_err();
            assert_eq!(err, BoxOfficeError::OccasionNotFound(OccasionId(id)));
        }
        assert!(reg.exists(OccasionId(1)));
    }
}
