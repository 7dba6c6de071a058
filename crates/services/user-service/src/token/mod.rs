//! Session tokens: RS256 JWTs carrying the user id and an expiry.

mod jwt;
mod keys;

pub use jwt::{JwtTokenService, TokenService};
pub use keys::{KeyError, SigningKeys};

#[cfg(any(test, feature = "test-utils"))]
pub use jwt::MockTokenService;

/// One key pair for the whole test binary; generation is slow.
#[cfg(test)]
pub(crate) static TEST_KEYS: once_cell::sync::Lazy<SigningKeys> =
    once_cell::sync::Lazy::new(|| {
        SigningKeys::generate(domain::DEFAULT_RSA_KEY_BITS).expect("generate test keys")
    });
