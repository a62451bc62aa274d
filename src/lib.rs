/// Account Auth Service Library
///
/// Password-based signup/login, access/refresh token issuance, refresh-token
/// rotation with revocation, and authenticated account lookup.
///
/// ## Modules
///
/// - `config`: Service configuration
/// - `db`: Database repositories (accounts, refresh tokens)
/// - `error`: Error types and HTTP status mapping
/// - `http`: Axum router, handlers, bearer-token extraction
/// - `models`: Data models
/// - `security`: Password hashing, JWT signing, opaque token generation
/// - `services`: Business logic (auth lifecycle)
/// - `validators`: Input validation
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod security;
pub mod services;
pub mod validators;

// Re-export commonly used types
pub use error::{AuthError, Result};
pub use services::AuthService;
