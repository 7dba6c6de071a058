//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};

use common::{AppError, AppResult};
use domain::{UserId, ValidateUserToken, BEARER_TOKEN_PREFIX};

use crate::state::AppState;

/// Current authenticated user extracted from the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
}

/// Authentication middleware that validates session tokens.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let jwt_token = extract_token(&request)?;

    let output = state
        .users
        .validate_token(ValidateUserToken { jwt_token })
        .await?;

    request
        .extensions_mut()
        .insert(CurrentUser { id: output.user_id });

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::to_string)
        .ok_or(AppError::InvalidToken)
}
