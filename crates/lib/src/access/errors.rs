//! Authorization error types.

use thiserror::Error as ThisError;

use crate::{Error, journal::EntryId};

/// Errors raised when an authenticated caller is not allowed to act on an entry.
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum AccessError {
    /// Caller is not the owner of the entry.
    #[error("Only the owner may modify entry {entry_id}")]
    NotOwner { entry_id: EntryId },

    /// Caller may not read the entry through a share link.
    #[error("Entry {entry_id} is not shared with the requester")]
    NotShared { entry_id: EntryId },

    /// Authenticated caller may not read the entry.
    #[error("Entry {entry_id} is not visible to the requester")]
    NotVisible { entry_id: EntryId },

    /// An allow-list item is not an email address.
    #[error("Invalid email in allow-list: {email}")]
    InvalidAllowedEmail { email: String },
}

impl AccessError {
    /// Authenticated but not authorized.
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            AccessError::NotOwner { .. }
                | AccessError::NotShared { .. }
                | AccessError::NotVisible { .. }
        )
    }

    /// Share-link read denial, reported to clients as unauthenticated.
    pub fn is_read_denied(&self) -> bool {
        matches!(self, AccessError::NotShared { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AccessError::InvalidAllowedEmail { .. })
    }
}

impl From<AccessError> for Error {
    fn from(err: AccessError) -> Self {
        Error::Access(err)
    }
}
