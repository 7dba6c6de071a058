//! Gateway configuration.

use std::env;

use common::ServerConfig;
use user_service::UserServiceConfig;

/// Gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Database and token settings of the user core
    pub users: UserServiceConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = ServerConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.host),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.port),
                request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.request_timeout_seconds),
            },
            users: UserServiceConfig::from_env(),
        }
    }
}
