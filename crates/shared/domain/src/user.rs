//! User domain entity and use-case payloads.

use serde::{Deserialize, Serialize};

/// Opaque numeric user handle
pub type UserId = i64;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub phone_no: String,
    pub full_name: String,
    #[serde(skip_serializing)]
    pub password_hash: Vec<u8>,
    pub successful_login_count: i64,
}

/// User profile (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserProfile {
    /// Unique user identifier
    pub user_id: UserId,
    /// Phone number used to log in
    pub phone_no: String,
    /// User display name
    pub full_name: String,
    /// Number of successful logins so far
    pub successful_login_count: i64,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            phone_no: user.phone_no,
            full_name: user.full_name,
            successful_login_count: user.successful_login_count,
        }
    }
}

/// Registration input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUser {
    pub phone_no: String,
    pub full_name: String,
    pub password: String,
}

/// Registration result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserOutput {
    pub user_id: UserId,
}

/// Login input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginUser {
    pub phone_no: String,
    pub password: String,
}

/// Login result carrying the signed session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginUserOutput {
    pub jwt_token: String,
}

/// Token validation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateUserToken {
    pub jwt_token: String,
}

/// Token validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateUserTokenOutput {
    pub user_id: UserId,
}

/// Profile lookup input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetUserProfile {
    pub user_id: UserId,
}

/// Partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserProfile {
    pub user_id: UserId,
    pub phone_no: Option<String>,
    pub full_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_drops_password_hash() {
        let user = User {
            id: 7,
            phone_no: "+62812141733".to_string(),
            full_name: "John Smith".to_string(),
            password_hash: b"secret-hash".to_vec(),
            successful_login_count: 3,
        };

        let profile = UserProfile::from(user);
        assert_eq!(
            profile,
            UserProfile {
                user_id: 7,
                phone_no: "+62812141733".to_string(),
                full_name: "John Smith".to_string(),
                successful_login_count: 3,
            }
        );
    }
}
