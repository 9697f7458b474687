//! Occasion model: a registered event with price, capacity, and metadata.
//!
//! Occasions are append-only. Once listed, every field is frozen except
//! `remaining_seats`, which only the ticket ledger decrements.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BoxOfficeError, OccasionId, Result, constants};

/// The custodian-supplied parameters for a new occasion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccasionListing {
    pub name: String,
    /// Unit price per seat. Zero is a free occasion; negative is rejected.
    pub cost: Decimal,
    pub max_seats: u32,
    pub date: String,
    pub time: String,
    pub location: String,
}

impl OccasionListing {
    /// Check the listing before it is allowed into the registry.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a zero capacity, a negative price, an
    /// empty name, or any text field over its length limit.
    pub fn validate(&self) -> Result<()> {
        if self.max_seats == 0 {
            return Err(BoxOfficeError::invalid("max_seats must be greater than zero"));
        }
        if self.cost < Decimal::ZERO {
            return Err(BoxOfficeError::invalid(format!(
                "cost must be non-negative, got {}",
                self.cost
            )));
        }
        if self.name.trim().is_empty() {
            return Err(BoxOfficeError::invalid("occasion name must not be empty"));
        }
        check_len("name", &self.name, constants::MAX_OCCASION_NAME_LEN)?;
        check_len("date", &self.date, constants::MAX_OCCASION_DATE_LEN)?;
        check_len("time", &self.time, constants::MAX_OCCASION_TIME_LEN)?;
        check_len("location", &self.location, constants::MAX_OCCASION_LOCATION_LEN)?;
        Ok(())
    }
}

pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(BoxOfficeError::invalid(format!(
            "{field} is {} bytes, limit is {max}",
            value.len()
        )));
    }
    Ok(())
}

/// A listed occasion as stored by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occasion {
    pub id: OccasionId,
    pub name: String,
    pub cost: Decimal,
    pub max_seats: u32,
    /// Seats not yet sold. Always `max_seats - sold`.
    pub remaining_seats: u32,
    pub date: String,
    pub time: String,
    pub location: String,
}

impl Occasion {
    /// Materialize a validated listing under its assigned identifier.
    #[must_use]
    pub fn from_listing(id: OccasionId, listing: OccasionListing) -> Self {
        Self {
            id,
            name: listing.name,
            cost: listing.cost,
            max_seats: listing.max_seats,
            remaining_seats: listing.max_seats,
            date: listing.date,
            time: listing.time,
            location: listing.location,
        }
    }

    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.remaining_seats == 0
    }

    #[must_use]
    pub fn sold_seats(&self) -> u32 {
        self.max_seats - self.remaining_seats
    }

    /// Whether `seat` is a sellable seat number for this occasion.
    #[must_use]
    pub fn has_seat(&self, seat: u32) -> bool {
        (constants::FIRST_SEAT..=self.max_seats).contains(&seat)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl OccasionListing {
    pub fn dummy(cost: Decimal, max_seats: u32) -> Self {
        Self {
            name: "ETH Texas".to_string(),
            cost,
            max_seats,
            date: "Apr 27".to_string(),
            time: "10:00AM CST".to_string(),
            location: "Austin, Texas".to_string(),
        }
    }
}
