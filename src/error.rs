//! HTTP-facing error type.
//!
//! Every failure a handler or extractor can produce ends up here and is
//! rendered as `{error, message}` (plus `details` for validation failures).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::{auth::jwt::TokenError, news::UpstreamError, users::StoreError};

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("user already exists")]
    AlreadyExists,

    #[error("access token required")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("route {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::AlreadyExists => StatusCode::BAD_REQUEST,
            Self::MissingToken
            | Self::InvalidToken
            | Self::UserNotFound
            | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label returned in the `error` field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Validation failed",
            Self::AlreadyExists => "User already exists",
            Self::MissingToken => "Access token required",
            Self::InvalidToken => "Invalid token",
            Self::UserNotFound => "User not found",
            Self::InvalidCredentials => "Invalid credentials",
            Self::Upstream(_) => "Failed to fetch news",
            Self::NotFound(_) => "Not Found",
            Self::Internal(_) => "Internal Server Error",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Please check your input data".into(),
            Self::AlreadyExists => "A user with this email already exists".into(),
            Self::MissingToken => "Please provide a valid authentication token".into(),
            Self::InvalidToken => "The provided token is invalid or expired".into(),
            Self::UserNotFound => "The user associated with this token no longer exists".into(),
            Self::InvalidCredentials => "Email or password is incorrect".into(),
            Self::Upstream(_) => "Unable to retrieve news articles at this time".into(),
            Self::NotFound(path) => format!("Route {} not found", path),
            Self::Internal(_) => "Something went wrong on the server".into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::NotFound => Self::UserNotFound,
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(_: TokenError) -> Self {
        Self::InvalidToken
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Internal(e) => error!(error = ?e, "internal error"),
            Self::Upstream(e) => warn!(error = %e, "upstream failure"),
            _ => {}
        }

        let mut body = json!({
            "error": self.label(),
            "message": self.user_message(),
        });
        if let Self::Validation(details) = &self {
            body["details"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(ApiError::Validation(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::AlreadyExists.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Upstream(UpstreamError::Transport("boom".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(ApiError::NotFound("/x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("secret detail")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_message_hides_source() {
        let err = ApiError::Internal(anyhow::anyhow!("db password is hunter2"));
        assert_eq!(err.user_message(), "Something went wrong on the server");
    }

    #[test]
    fn expired_and_invalid_tokens_look_the_same() {
        let a: ApiError = TokenError::Expired.into();
        let b: ApiError = TokenError::Invalid.into();
        assert_eq!(a.label(), b.label());
        assert_eq!(a.user_message(), b.user_message());
    }

    #[test]
    fn not_found_names_the_route() {
        assert_eq!(
            ApiError::NotFound("/nope".into()).user_message(),
            "Route /nope not found"
        );
    }
}
