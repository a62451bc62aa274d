use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account row as stored in PostgreSQL.
///
/// `credential_hash` is optional: an account without a stored credential
/// exists but cannot log in with a password.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub credential_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Whether this account is fully provisioned for password login.
    pub fn has_credential(&self) -> bool {
        self.credential_hash.is_some()
    }
}
