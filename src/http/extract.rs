/// Authenticated principal extraction
///
/// Pulls the bearer token from the Authorization header, verifies it with
/// the token signer, loads the subject account, and rejects when the account
/// is missing or inactive. Protected handlers take this as an argument.
use super::AppState;
use crate::error::AuthError;
use crate::models::Account;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

const BEARER_PREFIX: &str = "Bearer ";

/// The account resolved from a verified access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount(pub Account);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedAccount {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::Unauthenticated)?;

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthError::Unauthenticated)?;

        let account = state.auth.authenticate(token).await?;

        Ok(AuthenticatedAccount(account))
    }
}
