//! Identity record storage for SQL backends.

use uuid::Uuid;

use crate::Result;
use crate::backend::errors::BackendError;
use crate::user::{UserError, UserRecord};

use super::{SqlxBackend, SqlxResultExt};

type UserRow = (String, String, String, String, String, i64);

/// Insert a user; a conflicting email inserts nothing and reports `DuplicateEmail`.
pub async fn insert(backend: &SqlxBackend, record: UserRecord) -> Result<()> {
    let result = sqlx::query(
        "INSERT INTO users (uuid, email, first_name, last_name, password_hash, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(record.uuid.to_string())
    .bind(&record.email)
    .bind(&record.first_name)
    .bind(&record.last_name)
    .bind(record.password_hash())
    .bind(record.created_at)
    .execute(backend.pool())
    .await
    .sql_context("Failed to insert user")?;

    if result.rows_affected() == 0 {
        return Err(UserError::DuplicateEmail {
            email: record.email,
        }
        .into());
    }
    Ok(())
}

pub async fn find_by_email(backend: &SqlxBackend, email: &str) -> Result<Option<UserRecord>> {
    let row: Option<UserRow> = sqlx::query_as(
        "SELECT uuid, email, first_name, last_name, password_hash, created_at
         FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(backend.pool())
    .await
    .sql_context("Failed to look up user")?;

    row.map(from_row).transpose()
}

fn from_row(row: UserRow) -> Result<UserRecord> {
    let (uuid, email, first_name, last_name, password_hash, created_at) = row;
    let uuid = Uuid::parse_str(&uuid).map_err(|e| BackendError::CorruptRecord {
        reason: format!("user uuid {uuid:?}: {e}"),
    })?;
    Ok(UserRecord {
        uuid,
        email,
        first_name,
        last_name,
        password_hash,
        created_at,
    })
}
