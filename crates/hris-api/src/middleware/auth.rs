//! Bearer token extractor
//!
//! Handlers that take an `AuthUser` reject requests without a valid
//! `Authorization: Bearer <token>` header.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use hris_core::services::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller of the current request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                warn!(uri = %parts.uri, "Missing authorization header");
                ApiError::Unauthorized("missing authorization header".into())
            })?;

        let token = bearer_token(header)
            .ok_or_else(|| ApiError::Unauthorized("invalid authorization header".into()))?;

        let principal = state.auth.authenticate(token)?;
        let user = AuthUser(principal);
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
