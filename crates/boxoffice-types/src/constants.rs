//! System-wide constants for the BoxOffice registry.

/// Maximum length of a registry name, in bytes.
pub const MAX_REGISTRY_NAME_LEN: usize = 64;

/// Maximum length of a registry symbol, in bytes.
pub const MAX_REGISTRY_SYMBOL_LEN: usize = 16;

/// Maximum length of an occasion name, in bytes.
pub const MAX_OCCASION_NAME_LEN: usize = 200;

/// Maximum length of an occasion date string, in bytes.
pub const MAX_OCCASION_DATE_LEN: usize = 64;

/// Maximum length of an occasion time string, in bytes.
pub const MAX_OCCASION_TIME_LEN: usize = 64;

/// Maximum length of an occasion location string, in bytes.
pub const MAX_OCCASION_LOCATION_LEN: usize = 200;

/// First identifier handed out by the occasion registry.
pub const FIRST_OCCASION_ID: u64 = 1;

/// First ticket identifier handed out by the ticket ledger.
pub const FIRST_TICKET_ID: u64 = 1;

/// Lowest sellable seat number within an occasion.
pub const FIRST_SEAT: u32 = 1;

/// Domain separator for registry state digests.
pub const STATE_DIGEST_DOMAIN: &[u8] = b"boxoffice:state:v1:";

/// Domain separator for identities derived from labels.
pub const IDENTITY_LABEL_DOMAIN: &[u8] = b"boxoffice:identity:v1:";
