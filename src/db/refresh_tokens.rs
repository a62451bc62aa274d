/// Refresh token database operations
///
/// Rows are append-and-flag only: tokens are inserted once, possibly marked
/// revoked, and never deleted or un-revoked by the service.
use crate::error::Result;
use crate::models::RefreshToken;
use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Persist a freshly generated opaque token for an account.
pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    account_id: Uuid,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<RefreshToken> {
    let record = sqlx::query_as::<_, RefreshToken>(
        r#"
        INSERT INTO refresh_tokens (id, account_id, token, expires_at, revoked, created_at)
        VALUES (gen_random_uuid(), $1, $2, $3, FALSE, NOW())
        RETURNING id, account_id, token, expires_at, revoked, created_at
        "#,
    )
    .bind(account_id)
    .bind(token)
    .bind(expires_at)
    .fetch_one(executor)
    .await?;

    Ok(record)
}

/// Look up a token record by its opaque string.
pub async fn find_by_token<'e>(
    executor: impl PgExecutor<'e>,
    token: &str,
) -> Result<Option<RefreshToken>> {
    let record = sqlx::query_as::<_, RefreshToken>(
        "SELECT id, account_id, token, expires_at, revoked, created_at
         FROM refresh_tokens WHERE token = $1",
    )
    .bind(token)
    .fetch_optional(executor)
    .await?;

    Ok(record)
}

/// Revoke a token unconditionally. Idempotent: revoking an already-revoked
/// token is a no-op.
pub async fn revoke<'e>(executor: impl PgExecutor<'e>, token_id: Uuid) -> Result<()> {
    sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = $1")
        .bind(token_id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Compare-and-set revocation: flips `revoked` only if it is still FALSE.
///
/// Returns whether this call won the flip. Concurrent rotations of the same
/// token race on this row update; exactly one caller sees `true`.
pub async fn revoke_if_live<'e>(executor: impl PgExecutor<'e>, token_id: Uuid) -> Result<bool> {
    let result = sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = $1 AND revoked = FALSE")
        .bind(token_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() == 1)
}
