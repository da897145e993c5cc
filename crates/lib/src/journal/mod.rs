//! Journal entry records
//!
//! The access-control core only needs entries to exist, to have an owner, and
//! to carry an [`EntryVisibility`]. Content fields are stored and returned as-is.

pub mod errors;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use errors::JournalError;

use crate::{Result, access::EntryVisibility, user::UserIdentity};

/// Opaque entry identifier (a UUID string on the wire).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.trim().to_string())
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A journal entry with its author snapshot and visibility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub uuid: EntryId,
    pub author_uuid: Uuid,
    pub author_first_name: String,
    pub author_last_name: String,
    pub journal_title: String,
    pub journal_content: String,
    #[serde(default)]
    pub journal_tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Flattened so the wire form carries `author_email`, `isPublic`, `allowedEmails`
    #[serde(flatten)]
    pub visibility: EntryVisibility,
}

impl JournalEntry {
    /// Build a new private entry owned by `author`.
    pub fn new(author: &UserIdentity, input: NewEntry, now: DateTime<Utc>) -> Result<Self> {
        input.validate()?;
        Ok(Self {
            uuid: EntryId::generate(),
            author_uuid: author.uuid,
            author_first_name: author.first_name.clone(),
            author_last_name: author.last_name.clone(),
            journal_title: input.journal_title.trim().to_string(),
            journal_content: input.journal_content,
            journal_tags: input.journal_tags,
            image_url: input.image_url,
            created_at: input.created_at.unwrap_or(now),
            updated_at: now,
            visibility: EntryVisibility::private(&author.email),
        })
    }

    pub fn owner_email(&self) -> &str {
        &self.visibility.owner_email
    }
}

/// Input for creating an entry.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewEntry {
    pub journal_title: String,
    #[serde(default)]
    pub journal_content: String,
    #[serde(default)]
    pub journal_tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewEntry {
    fn validate(&self) -> Result<()> {
        if self.journal_title.trim().is_empty() {
            return Err(JournalError::InvalidEntry {
                reason: "journal_title must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Replacement content for an existing entry. Visibility is not touched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EntryUpdate {
    pub journal_title: String,
    #[serde(default)]
    pub journal_content: String,
    #[serde(default)]
    pub journal_tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl EntryUpdate {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.journal_title.trim().is_empty() {
            return Err(JournalError::InvalidEntry {
                reason: "journal_title must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Apply to `entry` in place.
    pub(crate) fn apply(self, entry: &mut JournalEntry, now: DateTime<Utc>) {
        entry.journal_title = self.journal_title.trim().to_string();
        entry.journal_content = self.journal_content;
        entry.journal_tags = self.journal_tags;
        entry.image_url = self.image_url;
        if let Some(created_at) = self.created_at {
            entry.created_at = created_at;
        }
        entry.updated_at = now;
    }
}
