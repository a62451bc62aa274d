/// Authentication service
///
/// Orchestrates the session-token lifecycle over accounts and refresh
/// tokens. Each operation is atomic with respect to persistence: every
/// write in a use case commits in a single transaction or not at all.
///
/// Security properties enforced here:
/// - Unknown email, wrong password, and missing credential all surface as
///   the same `InvalidCredentials` error.
/// - `is_active` is checked only after the credential verifies, so inactive
///   status is not observable without valid credentials.
/// - Refresh tokens are single-use: rotation revokes the presented token
///   with a compare-and-set, and a replayed token fails as revoked.
use crate::config::AuthSettings;
use crate::db;
use crate::error::{AuthError, Result};
use crate::models::{Account, RefreshToken, RefreshTokenStatus};
use crate::security::{generate_opaque_token, verify_password, TokenSigner};
use chrono::{Duration, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{info, warn};
use uuid::Uuid;

/// Access/refresh token pair returned to the client
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of signup/login: the account plus its fresh token pair
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub account: Account,
    pub tokens: TokenPair,
}

#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    signer: TokenSigner,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(db: PgPool, signer: TokenSigner, settings: AuthSettings) -> Self {
        Self {
            db,
            signer,
            settings,
        }
    }

    fn access_ttl(&self) -> Duration {
        Duration::seconds(self.settings.access_token_ttl_secs)
    }

    fn refresh_ttl(&self) -> Duration {
        Duration::seconds(self.settings.refresh_token_ttl_secs)
    }

    /// Issue and persist a refresh token for an account inside `tx`.
    async fn issue_refresh_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account_id: Uuid,
    ) -> Result<RefreshToken> {
        let token = generate_opaque_token();
        let expires_at = Utc::now() + self.refresh_ttl();
        db::refresh_tokens::insert(&mut **tx, account_id, &token, expires_at).await
    }

    /// Register a new account and open its first session.
    ///
    /// The account row and its refresh token commit together. The unique
    /// index on email is the authoritative duplicate check.
    pub async fn signup(&self, email: &str, password: &str) -> Result<AuthSession> {
        if !crate::validators::validate_email(email) {
            return Err(AuthError::Validation(
                "Invalid email address format".to_string(),
            ));
        }
        if !crate::validators::validate_password(password) {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                crate::validators::MIN_PASSWORD_LENGTH
            )));
        }

        // Friendly pre-check before paying the hashing cost. The unique
        // index on email remains the authoritative check inside the
        // transaction, so a concurrent signup still fails cleanly.
        if db::accounts::email_exists(&self.db, email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        // Hash before opening the transaction; Argon2 is deliberately slow.
        let credential_hash = crate::security::hash_password(password)?;

        let mut tx = self.db.begin().await?;

        let account = db::accounts::create_account(&mut *tx, email, &credential_hash).await?;
        let refresh = self.issue_refresh_token(&mut tx, account.id).await?;
        let access_token = self.signer.sign(account.id, self.access_ttl())?;

        tx.commit().await?;

        info!(
            account_id = %account.id,
            email = %mask_email(email),
            "Account created"
        );

        Ok(AuthSession {
            account,
            tokens: TokenPair {
                access_token,
                refresh_token: refresh.token,
            },
        })
    }

    /// Authenticate with email and password, opening a new session.
    ///
    /// Prior refresh tokens stay live: each login is an independent session.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let account = db::accounts::find_by_email(&self.db, email).await?;

        // Unknown email, missing credential, and wrong password are
        // indistinguishable to the caller.
        let account = match account {
            Some(account) => account,
            None => {
                warn!(email = %mask_email(email), "Login attempt for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let Some(credential_hash) = account.credential_hash.as_deref() else {
            warn!(account_id = %account.id, "Login attempt on account without credential");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, credential_hash) {
            warn!(account_id = %account.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        // Only revealed once the caller has proven the credential.
        if !account.is_active {
            return Err(AuthError::AccountInactive);
        }

        let mut tx = self.db.begin().await?;
        let refresh = self.issue_refresh_token(&mut tx, account.id).await?;
        let access_token = self.signer.sign(account.id, self.access_ttl())?;
        tx.commit().await?;

        info!(account_id = %account.id, "Login succeeded");

        Ok(AuthSession {
            account,
            tokens: TokenPair {
                access_token,
                refresh_token: refresh.token,
            },
        })
    }

    /// Rotate a refresh token: revoke the presented one and mint a
    /// replacement in a single transaction.
    ///
    /// Replay detection lives in the compare-and-set revoke: when two
    /// requests race on the same token, exactly one wins the flip and the
    /// others fail as revoked.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let record = db::refresh_tokens::find_by_token(&self.db, refresh_token)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        match record.status(Utc::now()) {
            RefreshTokenStatus::Revoked => {
                warn!(
                    account_id = %record.account_id,
                    token_id = %record.id,
                    "Replay of revoked refresh token"
                );
                return Err(AuthError::InvalidRefreshToken);
            }
            RefreshTokenStatus::Expired => return Err(AuthError::RefreshTokenExpired),
            RefreshTokenStatus::Valid => {}
        }

        let mut tx = self.db.begin().await?;

        // The row may have been revoked since the lookup.
        if !db::refresh_tokens::revoke_if_live(&mut *tx, record.id).await? {
            tx.rollback().await?;
            warn!(
                account_id = %record.account_id,
                token_id = %record.id,
                "Lost rotation race for refresh token"
            );
            return Err(AuthError::InvalidRefreshToken);
        }

        let replacement = self.issue_refresh_token(&mut tx, record.account_id).await?;
        let access_token = self.signer.sign(record.account_id, self.access_ttl())?;

        tx.commit().await?;

        info!(
            account_id = %record.account_id,
            old_token_id = %record.id,
            new_token_id = %replacement.id,
            "Refresh token rotated"
        );

        Ok(TokenPair {
            access_token,
            refresh_token: replacement.token,
        })
    }

    /// Close the session behind a refresh token.
    ///
    /// Idempotent by design: an unknown or already-revoked token is accepted
    /// silently. Access tokens stay valid until their natural expiry.
    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        if let Some(record) = db::refresh_tokens::find_by_token(&self.db, refresh_token).await? {
            if !record.revoked {
                db::refresh_tokens::revoke(&self.db, record.id).await?;
                info!(
                    account_id = %record.account_id,
                    token_id = %record.id,
                    "Refresh token revoked on logout"
                );
            }
        }

        Ok(())
    }

    /// Resolve a bearer access token into its account.
    ///
    /// Rejects with `Unauthenticated` when the token fails verification or
    /// the subject account is missing or inactive.
    pub async fn authenticate(&self, access_token: &str) -> Result<Account> {
        let account_id = self.signer.verify(access_token)?;

        let account = db::accounts::find_by_id(&self.db, account_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if !account.is_active {
            return Err(AuthError::Unauthenticated);
        }

        Ok(account)
    }

    /// Fetch an account by id for profile views.
    pub async fn get_account(&self, account_id: Uuid) -> Result<Account> {
        db::accounts::find_by_id(&self.db, account_id)
            .await?
            .ok_or(AuthError::NotFound)
    }
}

/// Mask an email for log fields
///
/// Operates on chars, not bytes: the input reaches this point unvalidated
/// (a failed login logs the attempted email), so the local part may hold
/// multi-byte characters.
fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let local = &email[..at_pos];
        let domain = &email[at_pos..];
        let mut chars = local.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(first), Some(_), Some(_)) => format!("{}***{}", first, domain),
            _ => format!("**{}", domain),
        }
    } else {
        "***@***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("ab@example.com"), "**@example.com");
        assert_eq!(mask_email("not-an-email"), "***@***");
    }

    #[test]
    fn test_mask_email_multibyte_local_part() {
        // Login attempts are logged before any format validation, so the
        // masker must not slice inside a multi-byte character.
        assert_eq!(mask_email("日本語@example.com"), "日***@example.com");
        assert_eq!(mask_email("日本@example.com"), "**@example.com");
        assert_eq!(mask_email("日@example.com"), "**@example.com");
    }
}
