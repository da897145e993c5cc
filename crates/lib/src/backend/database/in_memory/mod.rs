//! In-memory database backend implementation
//!
//! Suitable for tests, development, and single-node deployments that can
//! tolerate snapshot-on-shutdown persistence (see `save_to_file` and
//! `load_from_file`).

mod persistence;

use std::any::Any;
use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::Result;
use crate::backend::BackendImpl;
use crate::journal::{EntryId, JournalEntry};
use crate::user::{UserError, UserRecord};

/// A simple in-memory backend using `HashMap`s behind async read-write locks.
///
/// Each map is locked independently; every trait operation touches a single map
/// under a single lock acquisition, which gives the per-row atomicity the
/// access-control core relies on.
#[derive(Debug, Default)]
pub struct InMemory {
    /// Identity records keyed by normalized email
    pub(crate) users: RwLock<HashMap<String, UserRecord>>,
    /// Revoked token strings mapped to their expiry (Unix seconds)
    pub(crate) revoked_tokens: RwLock<HashMap<String, i64>>,
    /// Journal entries keyed by entry id
    pub(crate) entries: RwLock<HashMap<EntryId, JournalEntry>>,
}

impl InMemory {
    /// Creates a new, empty `InMemory` backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves the full state to a JSON file.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persistence::save_to_file(self, path).await
    }

    /// Loads state from a JSON file, or returns an empty backend if the file
    /// does not exist.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        persistence::load_from_file(path).await
    }

    /// Number of records currently on the revocation list.
    pub async fn revocation_count(&self) -> usize {
        self.revoked_tokens.read().await.len()
    }
}

#[async_trait]
impl BackendImpl for InMemory {
    async fn insert_user(&self, record: UserRecord) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&record.email) {
            return Err(UserError::DuplicateEmail {
                email: record.email,
            }
            .into());
        }
        users.insert(record.email.clone(), record);
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn revoke_token(&self, token: &str, expires_at: i64) -> Result<()> {
        self.revoked_tokens
            .write()
            .await
            .entry(token.to_string())
            .or_insert(expires_at);
        Ok(())
    }

    async fn is_token_revoked(&self, token: &str) -> Result<bool> {
        Ok(self.revoked_tokens.read().await.contains_key(token))
    }

    async fn purge_revocations(&self, now: i64) -> Result<u64> {
        let mut revoked = self.revoked_tokens.write().await;
        let before = revoked.len();
        revoked.retain(|_, expires_at| *expires_at > now);
        Ok((before - revoked.len()) as u64)
    }

    async fn insert_entry(&self, entry: JournalEntry) -> Result<()> {
        self.entries.write().await.insert(entry.uuid.clone(), entry);
        Ok(())
    }

    async fn get_entry(&self, id: &EntryId) -> Result<Option<JournalEntry>> {
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn list_entries_by_author(&self, author: &Uuid) -> Result<Vec<JournalEntry>> {
        let entries = self.entries.read().await;
        let mut list: Vec<JournalEntry> = entries
            .values()
            .filter(|e| e.author_uuid == *author)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn update_entry_content(&self, entry: &JournalEntry) -> Result<bool> {
        let mut entries = self.entries.write().await;
        let Some(stored) = entries.get_mut(&entry.uuid) else {
            return Ok(false);
        };
        stored.journal_title = entry.journal_title.clone();
        stored.journal_content = entry.journal_content.clone();
        stored.journal_tags = entry.journal_tags.clone();
        stored.image_url = entry.image_url.clone();
        stored.created_at = entry.created_at;
        stored.updated_at = entry.updated_at;
        Ok(true)
    }

    async fn set_visibility(
        &self,
        id: &EntryId,
        is_public: bool,
        allowed_emails: &[String],
        updated_at: DateTime<Utc>,
    ) -> Result<Option<JournalEntry>> {
        let mut entries = self.entries.write().await;
        let Some(stored) = entries.get_mut(id) else {
            return Ok(None);
        };
        stored.visibility.is_public = is_public;
        stored.visibility.allowed_emails = allowed_emails.to_vec();
        stored.updated_at = updated_at;
        Ok(Some(stored.clone()))
    }

    async fn delete_entry(&self, id: &EntryId) -> Result<bool> {
        Ok(self.entries.write().await.remove(id).is_some())
    }

    fn kind_name(&self) -> &'static str {
        "inmemory"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
