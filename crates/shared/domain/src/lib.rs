//! Domain layer - Core business entities and rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user entity, use-case payloads, field validators and the password
//! hashing contract.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::ValidationErrors;
pub use password::{Argon2Hasher, PasswordError, PasswordHasher};
pub use user::{
    GetUserProfile, LoginUser, LoginUserOutput, RegisterUser, RegisterUserOutput, UpdateUserProfile,
    User, UserId, UserProfile, ValidateUserToken, ValidateUserTokenOutput,
};
pub use validation::{validate_full_name, validate_password, validate_phone_no};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockPasswordHasher;
