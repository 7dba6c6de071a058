//! User Service Library
//!
//! User account core: field validation, password hashing, RS256 session
//! tokens and the Postgres-backed user repository. Adapters drive it through
//! the [`UserUsecases`] trait.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;
pub mod token;

use std::sync::Arc;

use tracing::info;

use domain::Argon2Hasher;

pub use crate::config::UserServiceConfig;
pub use crate::infra::Database;
pub use crate::service::{UserManager, UserUsecases};
pub use crate::token::{JwtTokenService, KeyError, SigningKeys, TokenService};

use crate::repository::UserStore;

/// Wire the production use cases on top of an open database.
pub fn build_usecases(
    db: &Database,
    config: &UserServiceConfig,
) -> Result<Arc<dyn UserUsecases>, KeyError> {
    let keys = SigningKeys::from_config(&config.token)?;

    let user_repo = Arc::new(UserStore::new(db.get_connection()));
    let tokens = Arc::new(JwtTokenService::new(&keys, config.token.ttl_minutes)?);
    let hasher = Arc::new(Argon2Hasher::new());

    Ok(Arc::new(UserManager::new(user_repo, tokens, hasher)))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
