use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::auth::service;
use crate::error::ApiError;
use crate::state::AppState;

/// Requires a resolvable bearer token; rejects with 401 otherwise.
#[derive(Debug)]
pub struct CurrentUser(pub crate::store::User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::Unauthenticated)?;
        let user = service::resolve_current_user(state.store.as_ref(), &token).await?;
        Ok(CurrentUser(user))
    }
}

/// Hands over whatever bearer token the request carried, if any.
/// Never rejects; logout accepts unauthenticated callers.
#[derive(Debug)]
pub struct MaybeBearer(pub Option<String>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeBearer {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeBearer(bearer_token(parts)))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}
