//! # boxoffice-types
//!
//! Shared types, errors, and configuration for the **BoxOffice** ticket
//! registry.
//!
//! This crate is the leaf dependency of the workspace: every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Identity`], [`OccasionId`], [`TicketId`], [`TxId`], [`SeatNumber`]
//! - **Occasion model**: [`Occasion`], [`OccasionListing`]
//! - **Ticket model**: [`Ticket`]
//! - **Call model**: [`Call`], [`Transaction`], [`Outcome`]
//! - **Receipt model**: [`Receipt`], [`ReceiptStatus`]
//! - **Configuration**: [`RegistryConfig`], [`LedgerConfig`], [`ScenarioConfig`]
//! - **Errors**: [`BoxOfficeError`] with `BO_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod call;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod occasion;
pub mod receipt;
pub mod ticket;

// Re-export all primary types at crate root for ergonomic imports:
//   use boxoffice_types::{Identity, Occasion, Ticket, ...};

pub use call::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use occasion::*;
pub use receipt::*;
pub use ticket::*;

// Constants are accessed via `boxoffice_types::constants::FOO`
// (not re-exported to avoid name collisions).
