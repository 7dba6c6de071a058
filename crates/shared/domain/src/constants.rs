//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Field Names
// =============================================================================

/// Request field carrying the phone number
pub const FIELD_PHONE_NO: &str = "phone_no";

/// Request field carrying the full name
pub const FIELD_FULL_NAME: &str = "full_name";

/// Request field carrying the plain text password
pub const FIELD_PASSWORD: &str = "password";

// =============================================================================
// Validation
// =============================================================================

/// Country code every phone number must start with (Indonesia)
pub const PHONE_COUNTRY_CODE: &str = "+62";

/// Minimum phone number length, country code included
pub const MIN_PHONE_NO_LENGTH: usize = 10;

/// Maximum phone number length, country code included
pub const MAX_PHONE_NO_LENGTH: usize = 13;

/// Minimum full name length
pub const MIN_FULL_NAME_LENGTH: usize = 3;

/// Maximum full name length
pub const MAX_FULL_NAME_LENGTH: usize = 60;

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length requirement
pub const MAX_PASSWORD_LENGTH: usize = 64;

// =============================================================================
// Authentication
// =============================================================================

/// Default session token lifetime in minutes
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 10;

/// Default RSA modulus size for generated signing keys
pub const DEFAULT_RSA_KEY_BITS: usize = 2048;

/// Seconds per minute (for token expiration calculation)
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";
