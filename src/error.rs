use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account inactive")]
    AccountInactive,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Wire-level error body. Messages are fixed per error kind so the boundary
/// never echoes which internal case produced the failure.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AuthError {
    /// Map an error kind to its HTTP status and generic client message.
    ///
    /// Revoked, unknown, and expired refresh tokens intentionally share one
    /// message; the same applies to unknown-email vs. wrong-password logins.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AuthError::DuplicateEmail => {
                (StatusCode::CONFLICT, "Email already registered".to_string())
            }
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AuthError::AccountInactive => {
                (StatusCode::UNAUTHORIZED, "Account is inactive".to_string())
            }
            AuthError::InvalidRefreshToken | AuthError::RefreshTokenExpired => (
                StatusCode::UNAUTHORIZED,
                "Invalid refresh token".to_string(),
            ),
            AuthError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Invalid or missing access token".to_string(),
            ),
            AuthError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AuthError::Database(_) | AuthError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

// Conversions from external error types
impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", err);
        AuthError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(err: validator::ValidationErrors) -> Self {
        AuthError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_email_maps_to_conflict() {
        let (status, _) = AuthError::DuplicateEmail.status_and_message();
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_auth_failures_map_to_unauthorized() {
        for err in [
            AuthError::InvalidCredentials,
            AuthError::AccountInactive,
            AuthError::InvalidRefreshToken,
            AuthError::RefreshTokenExpired,
            AuthError::Unauthenticated,
        ] {
            let (status, _) = err.status_and_message();
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_refresh_token_failures_share_one_message() {
        let (_, revoked_or_missing) = AuthError::InvalidRefreshToken.status_and_message();
        let (_, expired) = AuthError::RefreshTokenExpired.status_and_message();
        assert_eq!(revoked_or_missing, expired);
    }

    #[test]
    fn test_internal_errors_do_not_leak_details() {
        let (status, message) =
            AuthError::Database("connection refused on 10.0.0.5".to_string()).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("10.0.0.5"));
    }

    #[test]
    fn test_not_found_maps_to_not_found() {
        let (status, _) = AuthError::NotFound.status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
