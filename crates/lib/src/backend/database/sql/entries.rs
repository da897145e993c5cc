//! Journal entry storage for SQL backends.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::Result;
use crate::access::EntryVisibility;
use crate::backend::errors::BackendError;
use crate::journal::{EntryId, JournalEntry};

use super::{SqlxBackend, SqlxResultExt};

const SELECT_COLUMNS: &str = "SELECT uuid, author_uuid, author_first_name, author_last_name, \
     author_email, journal_title, journal_content, journal_tags, image_url, is_public, \
     allowed_emails, created_at, updated_at FROM journal";

type EntryRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    i64,
    String,
    i64,
    i64,
);

pub async fn insert(backend: &SqlxBackend, entry: &JournalEntry) -> Result<()> {
    let tags = encode_list(&entry.journal_tags)?;
    let allowed = encode_list(&entry.visibility.allowed_emails)?;

    sqlx::query(
        "INSERT INTO journal (uuid, author_uuid, author_first_name, author_last_name,
             author_email, journal_title, journal_content, journal_tags, image_url,
             is_public, allowed_emails, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
    )
    .bind(entry.uuid.as_str())
    .bind(entry.author_uuid.to_string())
    .bind(&entry.author_first_name)
    .bind(&entry.author_last_name)
    .bind(&entry.visibility.owner_email)
    .bind(&entry.journal_title)
    .bind(&entry.journal_content)
    .bind(tags)
    .bind(entry.image_url.clone())
    .bind(i64::from(entry.visibility.is_public))
    .bind(allowed)
    .bind(entry.created_at.timestamp_millis())
    .bind(entry.updated_at.timestamp_millis())
    .execute(backend.pool())
    .await
    .sql_context("Failed to insert journal entry")?;
    Ok(())
}

pub async fn get(backend: &SqlxBackend, id: &EntryId) -> Result<Option<JournalEntry>> {
    let row: Option<EntryRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE uuid = $1"))
        .bind(id.as_str())
        .fetch_optional(backend.pool())
        .await
        .sql_context("Failed to load journal entry")?;

    row.map(from_row).transpose()
}

pub async fn list_by_author(backend: &SqlxBackend, author: &Uuid) -> Result<Vec<JournalEntry>> {
    let rows: Vec<EntryRow> = sqlx::query_as(&format!(
        "{SELECT_COLUMNS} WHERE author_uuid = $1 ORDER BY created_at DESC"
    ))
    .bind(author.to_string())
    .fetch_all(backend.pool())
    .await
    .sql_context("Failed to list journal entries")?;

    rows.into_iter().map(from_row).collect()
}

pub async fn update_content(backend: &SqlxBackend, entry: &JournalEntry) -> Result<bool> {
    let tags = encode_list(&entry.journal_tags)?;

    let result = sqlx::query(
        "UPDATE journal SET journal_title = $1, journal_content = $2, journal_tags = $3,
             image_url = $4, created_at = $5, updated_at = $6
         WHERE uuid = $7",
    )
    .bind(&entry.journal_title)
    .bind(&entry.journal_content)
    .bind(tags)
    .bind(entry.image_url.clone())
    .bind(entry.created_at.timestamp_millis())
    .bind(entry.updated_at.timestamp_millis())
    .bind(entry.uuid.as_str())
    .execute(backend.pool())
    .await
    .sql_context("Failed to update journal entry")?;

    Ok(result.rows_affected() > 0)
}

/// Replace both visibility fields in one statement and return the stored row.
pub async fn set_visibility(
    backend: &SqlxBackend,
    id: &EntryId,
    is_public: bool,
    allowed_emails: &[String],
    updated_at: DateTime<Utc>,
) -> Result<Option<JournalEntry>> {
    let allowed = encode_list(allowed_emails)?;

    let result = sqlx::query(
        "UPDATE journal SET is_public = $1, allowed_emails = $2, updated_at = $3
         WHERE uuid = $4",
    )
    .bind(i64::from(is_public))
    .bind(allowed)
    .bind(updated_at.timestamp_millis())
    .bind(id.as_str())
    .execute(backend.pool())
    .await
    .sql_context("Failed to update entry visibility")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get(backend, id).await
}

pub async fn delete(backend: &SqlxBackend, id: &EntryId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM journal WHERE uuid = $1")
        .bind(id.as_str())
        .execute(backend.pool())
        .await
        .sql_context("Failed to delete journal entry")?;
    Ok(result.rows_affected() > 0)
}

fn encode_list(items: &[String]) -> Result<String> {
    serde_json::to_string(items)
        .map_err(|e| BackendError::SerializationFailed { source: e }.into())
}

fn decode_list(column: &str, raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| {
        BackendError::CorruptRecord {
            reason: format!("journal.{column} is not a JSON string array: {e}"),
        }
        .into()
    })
}

fn decode_millis(column: &str, millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        BackendError::CorruptRecord {
            reason: format!("journal.{column} out of range: {millis}"),
        }
        .into()
    })
}

fn from_row(row: EntryRow) -> Result<JournalEntry> {
    let (
        uuid,
        author_uuid,
        author_first_name,
        author_last_name,
        author_email,
        journal_title,
        journal_content,
        journal_tags,
        image_url,
        is_public,
        allowed_emails,
        created_at,
        updated_at,
    ) = row;

    let author_uuid = Uuid::parse_str(&author_uuid).map_err(|e| BackendError::CorruptRecord {
        reason: format!("journal.author_uuid {author_uuid:?}: {e}"),
    })?;

    Ok(JournalEntry {
        uuid: EntryId::from(uuid),
        author_uuid,
        author_first_name,
        author_last_name,
        journal_title,
        journal_content,
        journal_tags: decode_list("journal_tags", &journal_tags)?,
        image_url,
        created_at: decode_millis("created_at", created_at)?,
        updated_at: decode_millis("updated_at", updated_at)?,
        visibility: EntryVisibility {
            owner_email: author_email,
            is_public: is_public != 0,
            allowed_emails: decode_list("allowed_emails", &allowed_emails)?,
        },
    })
}
