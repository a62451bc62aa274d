/// Account database operations
///
/// Functions take any `PgExecutor` so the service layer can run them against
/// the pool or inside a transaction as each use case requires.
use crate::error::{AuthError, Result};
use crate::models::Account;
use sqlx::PgExecutor;
use uuid::Uuid;

/// Create a new account with its credential hash.
///
/// Email uniqueness is enforced by the database; a unique violation maps to
/// `DuplicateEmail` so concurrent signups cannot race past a pre-check.
pub async fn create_account<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
    credential_hash: &str,
) -> Result<Account> {
    let account = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (id, email, credential_hash, is_active, created_at, updated_at)
        VALUES (gen_random_uuid(), $1, $2, TRUE, NOW(), NOW())
        RETURNING id, email, credential_hash, is_active, created_at, updated_at
        "#,
    )
    .bind(email)
    .bind(credential_hash)
    .fetch_one(executor)
    .await
    .map_err(|e| {
        if e.as_database_error()
            .map(|db_err| db_err.is_unique_violation())
            .unwrap_or(false)
        {
            AuthError::DuplicateEmail
        } else {
            AuthError::from(e)
        }
    })?;

    Ok(account)
}

/// Find account by email (exact match, case-sensitive as stored)
pub async fn find_by_email<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
) -> Result<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(
        "SELECT id, email, credential_hash, is_active, created_at, updated_at
         FROM accounts WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;

    Ok(account)
}

/// Find account by id
pub async fn find_by_id<'e>(
    executor: impl PgExecutor<'e>,
    account_id: Uuid,
) -> Result<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(
        "SELECT id, email, credential_hash, is_active, created_at, updated_at
         FROM accounts WHERE id = $1",
    )
    .bind(account_id)
    .fetch_optional(executor)
    .await?;

    Ok(account)
}

/// Check if an email is already registered
pub async fn email_exists<'e>(executor: impl PgExecutor<'e>, email: &str) -> Result<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
            .bind(email)
            .fetch_one(executor)
            .await?;

    Ok(exists)
}
