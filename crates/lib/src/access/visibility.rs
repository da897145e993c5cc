//! Per-entry visibility descriptor.

use serde::{Deserialize, Serialize};

use crate::email::{emails_match, looks_like_email, normalize_email};

use super::errors::AccessError;

/// The three mutually exclusive disclosure states of an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisclosureState {
    /// Only the owner can read.
    Private,
    /// Owner plus the allow-list can read.
    Shared,
    /// Anyone can read. The allow-list is kept but has no effect.
    Public,
}

/// Who may read an entry.
///
/// `owner_email` is fixed at entry creation. `is_public` and `allowed_emails`
/// are only ever replaced together, by the owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryVisibility {
    #[serde(rename = "author_email")]
    pub owner_email: String,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
    /// Normalized, de-duplicated collaborator emails
    #[serde(rename = "allowedEmails")]
    pub allowed_emails: Vec<String>,
}

impl EntryVisibility {
    /// A private descriptor for a new entry.
    pub fn private(owner_email: &str) -> Self {
        Self {
            owner_email: normalize_email(owner_email),
            is_public: false,
            allowed_emails: Vec::new(),
        }
    }

    pub fn state(&self) -> DisclosureState {
        if self.is_public {
            DisclosureState::Public
        } else if self.allowed_emails.is_empty() {
            DisclosureState::Private
        } else {
            DisclosureState::Shared
        }
    }

    /// Whether `email` is on the allow-list, ignoring case.
    ///
    /// Both sides are normalized, so rows written before normalization still match.
    pub fn allows(&self, email: &str) -> bool {
        self.allowed_emails
            .iter()
            .any(|allowed| emails_match(allowed, email))
    }

    /// Whether `email` owns the entry, ignoring case.
    pub fn is_owner(&self, email: &str) -> bool {
        emails_match(&self.owner_email, email)
    }
}

/// Normalize a caller-supplied allow-list.
///
/// Trims and lowercases, drops blanks, removes duplicates keeping first
/// appearance, and rejects anything that is not shaped like an email.
pub fn normalize_allowed_emails<I, S>(emails: I) -> Result<Vec<String>, AccessError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for email in emails {
        let email = normalize_email(email.as_ref());
        if email.is_empty() {
            continue;
        }
        if !looks_like_email(&email) {
            return Err(AccessError::InvalidAllowedEmail { email });
        }
        if !normalized.contains(&email) {
            normalized.push(email);
        }
    }
    Ok(normalized)
}
