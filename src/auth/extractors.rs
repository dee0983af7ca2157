use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::{error::ApiError, state::AppState, users::User};

/// Extracts and validates the bearer token, resolving it to the stored user.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default();

        // Expect "Bearer <token>"
        let mut words = header.split_whitespace();
        let scheme = words.next();
        let token = words.next().ok_or(ApiError::MissingToken)?;
        if !scheme.is_some_and(|s| s.eq_ignore_ascii_case("bearer")) {
            warn!("unsupported auth scheme");
            return Err(ApiError::InvalidToken);
        }

        let claims = state.keys.verify(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            ApiError::from(e)
        })?;

        let user = state.users.find_by_id(claims.sub).await.ok_or_else(|| {
            warn!(user_id = %claims.sub, "token subject no longer exists");
            ApiError::UserNotFound
        })?;

        Ok(AuthUser(user))
    }
}
