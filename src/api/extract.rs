//! Validating extractors
//!
//! Same as axum's `Json` and `Path`, but every rejection becomes
//! `ApiError::Validation` so malformed input never reaches storage.

use super::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// JSON body that must be an object.
///
/// serde's derived `Deserialize` also accepts a sequence in field order, so the
/// body is checked as a `Value` before it is converted to `T`.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<serde_json::Value>::from_request(req, state).await?;
        if !value.is_object() {
            return Err(ApiError::Validation(
                "request body must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map(ValidJson)
            .map_err(|e| ApiError::Validation(format!("invalid request body: {}", e)))
    }
}

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ValidPath<T>(pub T);
