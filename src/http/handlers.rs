/// Request handlers and wire shapes for the auth API
use super::extract::AuthenticatedAccount;
use super::AppState;
use crate::error::Result;
use crate::models::Account;
use crate::services::{AuthSession, TokenPair};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ========== Request shapes ==========

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email address format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token must not be empty"))]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LogoutRequest {
    #[validate(length(min = 1, message = "Refresh token must not be empty"))]
    pub refresh_token: String,
}

// ========== Response shapes ==========

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

impl From<TokenPair> for TokenResponse {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: "bearer",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub account: AccountResponse,
    pub token: TokenResponse,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            account: AccountResponse::from(&session.account),
            token: TokenResponse::from(session.tokens),
        }
    }
}

// ========== Handlers ==========

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    payload.validate()?;

    let session = state.auth.signup(&payload.email, &payload.password).await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    payload.validate()?;

    let session = state.auth.login(&payload.email, &payload.password).await?;

    Ok(Json(SessionResponse::from(session)))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>> {
    payload.validate()?;

    let tokens = state.auth.refresh(&payload.refresh_token).await?;

    Ok(Json(TokenResponse::from(tokens)))
}

/// POST /api/v1/auth/logout
///
/// Requires a valid access token; accepts any refresh-token state silently.
pub async fn logout(
    State(state): State<AppState>,
    AuthenticatedAccount(_account): AuthenticatedAccount,
    Json(payload): Json<LogoutRequest>,
) -> Result<StatusCode> {
    payload.validate()?;

    state.auth.logout(&payload.refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/accounts/me
pub async fn get_me(
    AuthenticatedAccount(account): AuthenticatedAccount,
) -> Json<AccountResponse> {
    Json(AccountResponse::from(&account))
}

/// GET /api/v1/accounts/:account_id
pub async fn get_account(
    State(state): State<AppState>,
    AuthenticatedAccount(_account): AuthenticatedAccount,
    Path(account_id): Path<Uuid>,
) -> Result<Json<AccountResponse>> {
    let account = state.auth.get_account(account_id).await?;

    Ok(Json(AccountResponse::from(&account)))
}
