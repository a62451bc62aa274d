/// Service layer for the account-auth service
///
/// Business logic for the authentication lifecycle: signup, login,
/// refresh-token rotation, logout, and authenticated account lookup.
pub mod auth;

pub use auth::{AuthService, AuthSession, TokenPair};
