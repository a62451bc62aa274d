/// HTTP API for the account-auth service
///
/// Thin boundary over the service layer: JSON request/response shapes,
/// bearer-token extraction, and error-kind to status mapping. No business
/// rules live here.
mod extract;
mod handlers;

pub use extract::AuthenticatedAccount;

use crate::services::AuthService;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared HTTP state
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
}

/// Build the router with all API endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/auth/signup", post(handlers::signup))
        .route("/api/v1/auth/login", post(handlers::login))
        .route("/api/v1/auth/refresh", post(handlers::refresh))
        .route("/api/v1/auth/logout", post(handlers::logout))
        .route("/api/v1/accounts/me", get(handlers::get_me))
        .route("/api/v1/accounts/:account_id", get(handlers::get_account))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint (no auth required)
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
