//! User use cases - registration, login, token validation and profile access.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{
    validate_full_name, validate_password, validate_phone_no, GetUserProfile, LoginUser,
    LoginUserOutput, PasswordHasher, RegisterUser, RegisterUserOutput, UpdateUserProfile,
    UserProfile, ValidateUserToken, ValidateUserTokenOutput, ValidationErrors, FIELD_FULL_NAME,
    FIELD_PASSWORD, FIELD_PHONE_NO,
};

use crate::repository::{NewUser, RepositoryError, UserChanges, UserLookup, UserRepository};
use crate::token::TokenService;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User use case trait, the surface adapters call.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserUsecases: Send + Sync {
    /// Create an account after validating every field
    async fn register(&self, input: RegisterUser) -> AppResult<RegisterUserOutput>;

    /// Check credentials, count the login and issue a session token
    async fn login(&self, input: LoginUser) -> AppResult<LoginUserOutput>;

    /// Resolve a session token to its user
    async fn validate_token(&self, input: ValidateUserToken)
        -> AppResult<ValidateUserTokenOutput>;

    /// Read the public profile of a user
    async fn get_profile(&self, input: GetUserProfile) -> AppResult<UserProfile>;

    /// Change phone number and/or full name
    async fn update_profile(&self, input: UpdateUserProfile) -> AppResult<()>;
}

/// Concrete implementation of UserUsecases.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserManager {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenService>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            repo,
            tokens,
            hasher,
        }
    }
}

#[async_trait]
impl UserUsecases for UserManager {
    async fn register(&self, input: RegisterUser) -> AppResult<RegisterUserOutput> {
        let mut errors = ValidationErrors::new();
        errors.add(FIELD_PHONE_NO, validate_phone_no(&input.phone_no));
        errors.add(FIELD_FULL_NAME, validate_full_name(&input.full_name));
        errors.add(FIELD_PASSWORD, validate_password(&input.password));
        errors.into_result()?;

        let password_hash = self.hasher.hash(&input.password)?;

        let user_id = self
            .repo
            .create(NewUser {
                phone_no: input.phone_no,
                full_name: input.full_name,
                password_hash,
            })
            .await?;

        tracing::info!(user_id, "User registered");
        Ok(RegisterUserOutput { user_id })
    }

    async fn login(&self, input: LoginUser) -> AppResult<LoginUserOutput> {
        // Unknown phone and wrong password are indistinguishable to the caller
        let user = match self.repo.get(UserLookup::PhoneNo(input.phone_no)).await {
            Ok(user) => user,
            Err(RepositoryError::NotFound) => return Err(AppError::InvalidLogin),
            Err(e) => return Err(e.into()),
        };

        if !self.hasher.verify(&user.password_hash, &input.password) {
            tracing::debug!(user_id = user.id, "Login rejected");
            return Err(AppError::InvalidLogin);
        }

        self.repo
            .update(UserChanges {
                successful_login_count: Some(user.successful_login_count + 1),
                ..UserChanges::new(user.id)
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Database(db) => AppError::Database(db),
                other => AppError::internal(format!("failed to record login: {}", other)),
            })?;

        let jwt_token = self.tokens.issue(user.id)?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok(LoginUserOutput { jwt_token })
    }

    async fn validate_token(
        &self,
        input: ValidateUserToken,
    ) -> AppResult<ValidateUserTokenOutput> {
        let user_id = self.tokens.validate(&input.jwt_token)?;
        Ok(ValidateUserTokenOutput { user_id })
    }

    async fn get_profile(&self, input: GetUserProfile) -> AppResult<UserProfile> {
        let user = self.repo.get(UserLookup::Id(input.user_id)).await?;
        Ok(user.into())
    }

    async fn update_profile(&self, input: UpdateUserProfile) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        if let Some(phone_no) = &input.phone_no {
            errors.add(FIELD_PHONE_NO, validate_phone_no(phone_no));
        }
        if let Some(full_name) = &input.full_name {
            errors.add(FIELD_FULL_NAME, validate_full_name(full_name));
        }
        errors.into_result()?;

        self.repo
            .update(UserChanges {
                phone_no: input.phone_no,
                full_name: input.full_name,
                ..UserChanges::new(input.user_id)
            })
            .await?;

        tracing::info!(user_id = input.user_id, "User profile updated");
        Ok(())
    }
}
