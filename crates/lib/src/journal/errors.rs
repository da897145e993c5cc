//! Journal entry error types.

use thiserror::Error as ThisError;

use super::EntryId;
use crate::Error;

#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum JournalError {
    #[error("Journal entry not found: {entry_id}")]
    EntryNotFound { entry_id: EntryId },

    #[error("Invalid journal entry: {reason}")]
    InvalidEntry { reason: String },
}

impl JournalError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, JournalError::EntryNotFound { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, JournalError::InvalidEntry { .. })
    }
}

impl From<JournalError> for Error {
    fn from(err: JournalError) -> Self {
        Error::Journal(err)
    }
}
