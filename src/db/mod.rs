/// Database operations for the account-auth service
pub mod accounts;
pub mod refresh_tokens;
