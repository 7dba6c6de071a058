//! Repository layer for data access.

pub mod entities;
mod error;
mod user_repository;

pub use error::RepositoryError;
pub use user_repository::{NewUser, UserChanges, UserLookup, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
