//! Service layer - user account use cases.

mod user_usecases;

pub use user_usecases::{UserManager, UserUsecases};

#[cfg(any(test, feature = "test-utils"))]
pub use user_usecases::MockUserUsecases;
