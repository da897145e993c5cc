//! Revocation list storage for SQL backends.

use crate::Result;

use super::{SqlxBackend, SqlxResultExt};

pub async fn insert(backend: &SqlxBackend, token: &str, expires_at: i64) -> Result<()> {
    sqlx::query(
        "INSERT INTO blacklisted_tokens (token, expires_at) VALUES ($1, $2)
         ON CONFLICT (token) DO NOTHING",
    )
    .bind(token)
    .bind(expires_at)
    .execute(backend.pool())
    .await
    .sql_context("Failed to revoke token")?;
    Ok(())
}

pub async fn contains(backend: &SqlxBackend, token: &str) -> Result<bool> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT expires_at FROM blacklisted_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(backend.pool())
            .await
            .sql_context("Failed to check revocation list")?;
    Ok(row.is_some())
}

pub async fn purge(backend: &SqlxBackend, now: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM blacklisted_tokens WHERE expires_at <= $1")
        .bind(now)
        .execute(backend.pool())
        .await
        .sql_context("Failed to purge revocation list")?;
    Ok(result.rows_affected())
}
