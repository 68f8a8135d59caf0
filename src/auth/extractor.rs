//! Bearer token extractor guarding write endpoints.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use crate::api::AppState;
use crate::error::{ApiError, AuthError};

/// Authenticated caller, extracted from `Authorization: Bearer <token>`.
///
/// Adding this as a handler argument makes the route reject requests without
/// a valid token with 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub role: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let state = AppState::from_ref(state);
        let claims = state.auth.verify(token)?;
        debug!(username = %claims.sub, role = %claims.role, "request authenticated");

        Ok(AuthUser {
            username: claims.sub,
            role: claims.role,
        })
    }
}
