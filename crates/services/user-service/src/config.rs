//! User service configuration.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use common::{DatabaseConfig, TokenConfig};

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    pub database: DatabaseConfig,
    pub token: TokenConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
            token: TokenConfig {
                ttl_minutes: parse_var("TOKEN_TTL_MINUTES").unwrap_or(defaults.token.ttl_minutes),
                rsa_key_bits: parse_var("TOKEN_RSA_KEY_BITS")
                    .unwrap_or(defaults.token.rsa_key_bits),
                private_key_path: env::var("TOKEN_PRIVATE_KEY_PATH")
                    .ok()
                    .filter(|path| !path.is_empty())
                    .map(PathBuf::from),
            },
        }
    }
}

/// Read and parse an environment variable, ignoring unset or malformed values.
fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}
