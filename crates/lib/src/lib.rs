//!
//! Devlog: the access-control core of a coding journal.
//!
//! This library provides identity, session and sharing logic for journal entries.
//!
//! ## Core Concepts
//!
//! * **Identities (`user::UserRecord`)**: Email plus password credentials. Emails are
//!   unique after normalization and passwords are stored only as Argon2id hashes.
//! * **Sessions (`token::TokenService`)**: Signed, self-contained tokens that expire
//!   24 hours after issue and can be revoked before then.
//! * **Visibility (`access::EntryVisibility`)**: Each entry is private, shared with an
//!   allow-list, or public. Reads are decided by [`access::can_view`]; changes to
//!   visibility are reserved for the owner.
//! * **Backends (`backend::BackendImpl`)**: Pluggable storage for identities, the
//!   revocation list and entries.
//! * **Devlog (`Devlog`)**: The handle tying these together, used by the HTTP layer.

pub mod access;
pub mod backend;
pub mod clock;
pub mod constants;
pub mod email;
pub mod journal;
pub mod service;
pub mod token;
pub mod user;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use service::{Devlog, LoginOutcome};
pub use token::SigningSecret;

/// Result type used throughout the Devlog library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Devlog library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured credential store errors from the user module
    #[error(transparent)]
    User(user::UserError),

    /// Structured token errors from the token module
    #[error(transparent)]
    Token(token::TokenError),

    /// Structured authorization errors from the access module
    #[error(transparent)]
    Access(access::AccessError),

    /// Structured journal entry errors from the journal module
    #[error(transparent)]
    Journal(journal::JournalError),

    /// Structured storage errors from the backend module
    #[error(transparent)]
    Backend(backend::BackendError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::User(_) => "user",
            Error::Token(_) => "token",
            Error::Access(_) => "access",
            Error::Journal(_) => "journal",
            Error::Backend(_) => "backend",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Journal(journal_err) => journal_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error indicates an authenticated caller was denied.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Error::Access(access_err) => access_err.is_permission_denied(),
            _ => false,
        }
    }

    /// Check if this error is a read-side denial on a non-public entry.
    pub fn is_read_denied(&self) -> bool {
        match self {
            Error::Access(access_err) => access_err.is_read_denied(),
            _ => false,
        }
    }

    /// Check if this error is a rejected login.
    pub fn is_invalid_credentials(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_invalid_credentials(),
            _ => false,
        }
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        self.is_invalid_credentials()
    }

    /// Check if this error was caused by caller input.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_invalid_input(),
            Error::Access(access_err) => access_err.is_invalid_input(),
            Error::Journal(journal_err) => journal_err.is_invalid_input(),
            _ => false,
        }
    }

    /// Check if this error is a server misconfiguration.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Error::Token(token_err) => token_err.is_configuration_error(),
            _ => false,
        }
    }

    /// Check if this error is database/backend-related.
    pub fn is_database_error(&self) -> bool {
        matches!(self, Error::Backend(_))
    }

    /// Check if this error indicates a data integrity issue.
    pub fn is_integrity_error(&self) -> bool {
        match self {
            Error::Backend(backend_err) => backend_err.is_integrity_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Backend(backend_err) => backend_err.is_io_error(),
            _ => false,
        }
    }
}
