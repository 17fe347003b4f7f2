//! Owner resolution
//!
//! There is no login: every request acts as the single owner configured in
//! `auth.owner_id`. Handlers take an [`Owner`] argument instead of reading the
//! configuration, so a real authentication layer only has to replace this
//! extractor.

use super::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Identity that new records are attributed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

#[async_trait]
impl FromRequestParts<AppState> for Owner {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Owner(state.owner_id.to_string()))
    }
}
