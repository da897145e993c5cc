//! Storage backends
//!
//! [`BackendImpl`] is the single storage seam: identity records, the token
//! revocation list, and journal entries with their visibility columns. The
//! access-control logic above it only relies on single-row read-after-write
//! consistency; no operation spans rows.
//!
//! Implementations live under [`database`]: an [`InMemory`](database::InMemory)
//! map with optional JSON snapshotting, and a sqlx-based SQL backend for SQLite
//! and PostgreSQL.

use std::any::Any;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::Result;
use crate::journal::{EntryId, JournalEntry};
use crate::user::UserRecord;

pub mod database;
pub mod errors;

pub use errors::BackendError;

/// Storage operations needed by the access-control core.
///
/// All implementations must be `Send` and `Sync` to allow sharing across
/// request handlers, and implement `Any` to allow for downcasting if needed.
#[async_trait]
pub trait BackendImpl: Send + Sync + Any {
    // ===== Credential store =====

    /// Insert a new identity.
    ///
    /// Fails with [`UserError::DuplicateEmail`](crate::user::UserError::DuplicateEmail)
    /// if a record with the same (normalized) email exists. Never creates a second record.
    async fn insert_user(&self, record: UserRecord) -> Result<()>;

    /// Look up an identity by normalized email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    // ===== Revocation list =====

    /// Record `token` as revoked until `expires_at` (Unix seconds).
    ///
    /// Inserting a token that is already present is a no-op.
    async fn revoke_token(&self, token: &str, expires_at: i64) -> Result<()>;

    /// Whether the exact token string is on the revocation list.
    async fn is_token_revoked(&self, token: &str) -> Result<bool>;

    /// Delete revocation records whose expiry is at or before `now`.
    ///
    /// Returns the number of records removed.
    async fn purge_revocations(&self, now: i64) -> Result<u64>;

    // ===== Journal entries =====

    async fn insert_entry(&self, entry: JournalEntry) -> Result<()>;

    async fn get_entry(&self, id: &EntryId) -> Result<Option<JournalEntry>>;

    /// Entries authored by `author`, newest `created_at` first.
    async fn list_entries_by_author(&self, author: &Uuid) -> Result<Vec<JournalEntry>>;

    /// Overwrite the content columns of an existing entry.
    ///
    /// Visibility columns are left untouched. Returns `false` if the entry does
    /// not exist.
    async fn update_entry_content(&self, entry: &JournalEntry) -> Result<bool>;

    /// Replace `is_public` and `allowed_emails` together in a single write.
    ///
    /// Returns the updated entry, or `None` if it does not exist.
    async fn set_visibility(
        &self,
        id: &EntryId,
        is_public: bool,
        allowed_emails: &[String],
        updated_at: DateTime<Utc>,
    ) -> Result<Option<JournalEntry>>;

    /// Returns `false` if the entry did not exist.
    async fn delete_entry(&self, id: &EntryId) -> Result<bool>;

    /// Short name of the storage engine, for health output.
    fn kind_name(&self) -> &'static str;

    /// Returns a reference to the backend as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}
