//! JWT session token issuing and validation.

use std::collections::HashSet;
use std::fmt;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use common::{AppError, AppResult};
use domain::{UserId, SECONDS_PER_MINUTE};

use super::keys::{KeyError, SigningKeys};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload.
///
/// Both claims are optional on the wire so a missing one is reported as an
/// invalid token rather than a decode error.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Token service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token for the given user
    fn issue(&self, user_id: UserId) -> AppResult<String>;

    /// Verify a token and return the user it was issued for
    fn validate(&self, token: &str) -> AppResult<UserId>;
}

/// RS256 implementation of TokenService.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
    validation: Validation,
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl JwtTokenService {
    /// Create a token service signing with `keys`; tokens live `ttl_minutes`.
    ///
    /// The TTL must be positive and representable in seconds.
    pub fn new(keys: &SigningKeys, ttl_minutes: i64) -> Result<Self, KeyError> {
        let ttl_seconds = ttl_minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .filter(|seconds| *seconds > 0)
            .ok_or(KeyError::InvalidTtl(ttl_minutes))?;

        // Expiry and subject are checked by hand below
        let mut validation = Validation::new(Algorithm::RS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;
        validation.validate_aud = false;

        Ok(Self {
            encoding_key: keys.encoding_key().clone(),
            decoding_key: keys.decoding_key().clone(),
            ttl_seconds,
            validation,
        })
    }

    fn issue_at(&self, user_id: UserId, now: i64) -> AppResult<String> {
        let exp = now
            .checked_add(self.ttl_seconds)
            .ok_or_else(|| AppError::internal("token expiry overflows"))?;
        let claims = Claims {
            sub: Some(user_id.to_string()),
            exp: Some(exp),
        };

        Ok(encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    fn validate_at(&self, token: &str, now: i64) -> AppResult<UserId> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Rejected token: {}", e);
                AppError::InvalidToken
            })?
            .claims;

        match claims.exp {
            Some(exp) if exp > now => {}
            _ => return Err(AppError::InvalidToken),
        }

        claims
            .sub
            .as_deref()
            .and_then(parse_subject)
            .ok_or(AppError::InvalidToken)
    }
}

/// Subjects are non-negative decimal integers.
fn parse_subject(sub: &str) -> Option<UserId> {
    if sub.is_empty() || !sub.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id: u64 = sub.parse().ok()?;
    UserId::try_from(id).ok()
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: UserId) -> AppResult<String> {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    fn validate(&self, token: &str) -> AppResult<UserId> {
        self.validate_at(token, Utc::now().timestamp())
    }
}
