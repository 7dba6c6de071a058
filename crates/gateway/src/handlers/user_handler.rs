//! User handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::AppResult;
use domain::{
    GetUserProfile, LoginUser, RegisterUser, UpdateUserProfile, UserId, UserProfile,
};

use crate::extractors::{null_as_empty, JsonBody};
use crate::middleware::{auth_middleware, CurrentUser};
use crate::state::AppState;

/// Registration request. Missing or null fields are treated as empty and rejected by validation.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    /// Phone number starting with +62
    #[serde(deserialize_with = "null_as_empty")]
    #[schema(example = "+62812141733")]
    pub phone_no: String,
    /// Display name
    #[serde(deserialize_with = "null_as_empty")]
    #[schema(example = "John Smith")]
    pub full_name: String,
    /// Plain text password
    #[serde(deserialize_with = "null_as_empty")]
    #[schema(example = "SomeP@ssw0rdHere")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub user_id: UserId,
}

/// Login request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "null_as_empty")]
    #[schema(example = "+62812141733")]
    pub phone_no: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[schema(example = "SomeP@ssw0rdHere")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Session token for the `Authorization: Bearer` header
    pub jwt_token: String,
}

/// Profile update request. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[schema(example = "+628121417330")]
    pub phone_no: Option<String>,
    #[schema(example = "Jane Smith")]
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create user routes
pub fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/user",
            get(get_profile)
                .patch(update_profile)
                .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
                // Registration stays public
                .post(register),
        )
        .route("/user/session", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Validation error or malformed body"),
        (status = 409, description = "Phone number already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> AppResult<Json<RegisterResponse>> {
    let output = state
        .users
        .register(RegisterUser {
            phone_no: payload.phone_no,
            full_name: payload.full_name,
            password: payload.password,
        })
        .await?;

    Ok(Json(RegisterResponse {
        user_id: output.user_id,
    }))
}

/// Log in and create a session token
#[utoipa::path(
    post,
    path = "/user/session",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session created", body = LoginResponse),
        (status = 400, description = "Invalid phone number or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let output = state
        .users
        .login(LoginUser {
            phone_no: payload.phone_no,
            password: payload.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        jwt_token: output.jwt_token,
    }))
}

/// Get the logged-in user's profile
#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserProfile),
        (status = 403, description = "Invalid or expired token"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserProfile>> {
    let profile = state
        .users
        .get_profile(GetUserProfile {
            user_id: current_user.id,
        })
        .await?;

    Ok(Json(profile))
}

/// Update the logged-in user's profile
#[utoipa::path(
    patch,
    path = "/user",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Validation error or malformed body"),
        (status = 403, description = "Invalid or expired token"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Phone number already registered")
    )
)]
pub async fn update_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UpdateProfileRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .users
        .update_profile(UpdateUserProfile {
            user_id: current_user.id,
            phone_no: payload.phone_no,
            full_name: payload.full_name,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "profile updated".to_string(),
    }))
}
