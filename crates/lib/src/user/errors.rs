//! Error types for the credential store
use thiserror::Error;

use crate::Error;

/// Errors raised while creating or authenticating identities.
///
/// `InvalidCredentials` is deliberately the only login failure: an unknown email
/// and a wrong password are indistinguishable to callers.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum UserError {
    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid signup: {reason}")]
    InvalidSignup { reason: String },

    #[error("Password hashing failed: {reason}")]
    HashingFailed { reason: String },
}

impl UserError {
    /// Signup conflicted with an existing identity.
    pub fn is_conflict(&self) -> bool {
        matches!(self, UserError::DuplicateEmail { .. })
    }

    /// Login was rejected.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, UserError::InvalidCredentials)
    }

    /// Input was rejected before reaching storage.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, UserError::InvalidSignup { .. })
    }
}

impl From<UserError> for Error {
    fn from(err: UserError) -> Self {
        Error::User(err)
    }
}
