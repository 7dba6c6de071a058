//! JSON body extractor with uniform rejections.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use common::AppError;

/// JSON extractor that reports any unreadable body as `InvalidJsonBody`.
///
/// The `Content-Type` header is not checked; the body is decoded as JSON
/// whatever the client declared.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Unreadable request body: {}", e);
            AppError::InvalidJsonBody
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            AppError::InvalidJsonBody
        })?;

        Ok(JsonBody(value))
    }
}

/// Decode a JSON `null` string field as the empty string.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
