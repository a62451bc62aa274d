use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Refresh token row as stored in PostgreSQL.
///
/// Tokens are opaque random strings, unique across the table. A token that
/// has been revoked stays revoked; rows are never un-revoked or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    pub id: Uuid,
    pub account_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

/// Validation outcome for a refresh token record.
///
/// Callers distinguish "deliberately invalidated" from "used up by time";
/// the HTTP boundary collapses both into the same unauthorized response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenStatus {
    Valid,
    Expired,
    Revoked,
}

impl RefreshToken {
    /// Classify the token against the given instant.
    ///
    /// Revocation takes precedence over expiry: a revoked token reports
    /// `Revoked` even after its expiry has passed.
    pub fn status(&self, now: DateTime<Utc>) -> RefreshTokenStatus {
        if self.revoked {
            RefreshTokenStatus::Revoked
        } else if now >= self.expires_at {
            RefreshTokenStatus::Expired
        } else {
            RefreshTokenStatus::Valid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_in: Duration, revoked: bool) -> RefreshToken {
        let now = Utc::now();
        RefreshToken {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            token: "opaque-token".to_string(),
            expires_at: now + expires_in,
            revoked,
            created_at: now,
        }
    }

    #[test]
    fn test_live_token_is_valid() {
        let t = token(Duration::days(7), false);
        assert_eq!(t.status(Utc::now()), RefreshTokenStatus::Valid);
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let t = token(Duration::seconds(-1), false);
        assert_eq!(t.status(Utc::now()), RefreshTokenStatus::Expired);
    }

    #[test]
    fn test_expiry_boundary_is_expired() {
        let t = token(Duration::zero(), false);
        // now >= expires_at counts as expired
        assert_eq!(t.status(t.expires_at), RefreshTokenStatus::Expired);
    }

    #[test]
    fn test_revoked_wins_over_expired() {
        let t = token(Duration::seconds(-1), true);
        assert_eq!(t.status(Utc::now()), RefreshTokenStatus::Revoked);
    }
}
