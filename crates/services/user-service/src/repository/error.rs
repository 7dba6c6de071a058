//! Repository failures.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use common::AppError;

/// Outcome kinds a repository reports besides success.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No record matched the lookup
    #[error("record not found")]
    NotFound,

    /// A unique column already holds the written value
    #[error("record conflict")]
    Conflict,

    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => RepositoryError::Conflict,
            _ => RepositoryError::Database(err),
        }
    }
}

/// Default mapping for callers that have no better policy error.
impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => AppError::UserNotFound,
            RepositoryError::Conflict => AppError::UserConflict,
            RepositoryError::Database(e) => AppError::Database(e),
        }
    }
}
