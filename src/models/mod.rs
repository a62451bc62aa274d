/// Data models for accounts and session tokens
pub mod account;
pub mod refresh_token;

pub use account::Account;
pub use refresh_token::{RefreshToken, RefreshTokenStatus};
