//! Application state for dependency injection.

use std::sync::Arc;

use user_service::{Database, UserUsecases};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserUsecases>,
    pub database: Database,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserUsecases>, database: Database) -> Self {
        Self { users, database }
    }
}
