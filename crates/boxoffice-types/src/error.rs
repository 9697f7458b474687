//! Error types for the BoxOffice registry.
//!
//! All errors use the `BO_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Access errors
//! - 2xx: Occasion errors
//! - 3xx: Ticket errors
//! - 4xx: Custody errors
//! - 5xx: Host ledger errors
//! - 9xx: General / internal errors
//!
//! Every failure aborts the operation that raised it with no partial state
//! change. Nothing here is retried by the registry.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Identity, OccasionId, SeatNumber, TicketId, TxId};

/// Central error enum for all BoxOffice operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoxOfficeError {
    // =================================================================
    // Access Errors (1xx)
    // =================================================================
    /// The caller is not the registry custodian.
    #[error("BO_ERR_100: Unauthorized: {caller} is not the custodian")]
    Unauthorized { caller: Identity },

    // =================================================================
    // Occasion Errors (2xx)
    // =================================================================
    /// The referenced occasion does not exist.
    #[error("BO_ERR_200: Occasion not found: {0}")]
    OccasionNotFound(OccasionId),

    /// Occasion or registry parameters are malformed.
    #[error("BO_ERR_201: Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // =================================================================
    // Ticket Errors (3xx)
    // =================================================================
    /// No seats remain for this occasion.
    #[error("BO_ERR_300: Occasion sold out: {0}")]
    SoldOut(OccasionId),

    /// Seat number lies outside `1..=max_seats`.
    #[error("BO_ERR_301: Seat {seat} out of range for {occasion_id} (max {max_seats})")]
    SeatOutOfRange {
        occasion_id: OccasionId,
        seat: SeatNumber,
        max_seats: u32,
    },

    /// The seat was already sold.
    #[error("BO_ERR_302: Seat {seat} already booked for {occasion_id}")]
    SeatAlreadyBooked {
        occasion_id: OccasionId,
        seat: SeatNumber,
    },

    /// Attached payment is below the listed price.
    #[error("BO_ERR_303: Insufficient payment: need {needed}, paid {paid}")]
    InsufficientPayment { needed: Decimal, paid: Decimal },

    /// The referenced ticket does not exist.
    #[error("BO_ERR_304: Ticket not found: {0}")]
    TicketNotFound(TicketId),

    // =================================================================
    // Custody Errors (4xx)
    // =================================================================
    /// The external value transfer during withdrawal failed.
    #[error("BO_ERR_400: Transfer failed: {reason}")]
    TransferFailed { reason: String },

    /// Adding to the custodied balance would overflow.
    #[error("BO_ERR_401: Custodied balance overflow")]
    BalanceOverflow,

    // =================================================================
    // Host Ledger Errors (5xx)
    // =================================================================
    /// The caller's external account cannot cover the attached value.
    #[error("BO_ERR_500: Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },

    /// A transaction with this ID was already executed.
    #[error("BO_ERR_501: Duplicate transaction: {0}")]
    DuplicateTransaction(TxId),

    /// A registry or ledger invariant no longer holds. Critical safety alert.
    #[error("BO_ERR_502: Invariant violation: {reason}")]
    InvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("BO_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("BO_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("BO_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error.
    #[error("BO_ERR_903: I/O error: {0}")]
    Io(String),
}

impl BoxOfficeError {
    /// The numeric `BO_ERR_` code of this error.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::Unauthorized { .. } => 100,
            Self::OccasionNotFound(_) => 200,
            Self::InvalidArgument { .. } => 201,
            Self::SoldOut(_) => 300,
            Self::SeatOutOfRange { .. } => 301,
            Self::SeatAlreadyBooked { .. } => 302,
            Self::InsufficientPayment { .. } => 303,
            Self::TicketNotFound(_) => 304,
            Self::TransferFailed { .. } => 400,
            Self::BalanceOverflow => 401,
            Self::InsufficientFunds { .. } => 500,
            Self::DuplicateTransaction(_) => 501,
            Self::InvariantViolation { .. } => 502,
            Self::Internal(_) => 900,
            Self::Serialization(_) => 901,
            Self::Configuration(_) => 902,
            Self::Io(_) => 903,
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, BoxOfficeError>;

impl From<std::io::Error> for BoxOfficeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BoxOfficeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
