//! Storage error types for Devlog backends.
//!
//! Everything here is infrastructural: the request that hit it fails with a
//! generic server error and the detail goes to the log.

use thiserror::Error;

use crate::Error;

/// Errors that can occur during storage operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BackendError {
    /// Serialization failed.
    #[error("Serialization failed")]
    SerializationFailed {
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization failed.
    #[error("Deserialization failed")]
    DeserializationFailed {
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error.
    #[error("File I/O error")]
    FileIo {
        #[source]
        source: std::io::Error,
    },

    /// A stored row could not be turned back into a record.
    #[error("Corrupt stored record: {reason}")]
    CorruptRecord { reason: String },

    /// SQL database error (SQLite or PostgreSQL via sqlx).
    #[cfg(any(feature = "sqlite", feature = "postgres"))]
    #[error("SQL error: {reason}")]
    SqlxError {
        reason: String,
        #[source]
        source: Option<sqlx::Error>,
    },
}

impl BackendError {
    /// Check if this error is an I/O-level failure.
    pub fn is_io_error(&self) -> bool {
        matches!(self, BackendError::FileIo { .. })
    }

    /// Check if this error indicates stored data is inconsistent.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            BackendError::CorruptRecord { .. } | BackendError::DeserializationFailed { .. }
        )
    }
}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        Error::Backend(err)
    }
}
