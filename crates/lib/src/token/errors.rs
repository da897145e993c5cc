//! Token service error types.
//!
//! These cover misconfiguration and encoding faults only. A token that fails
//! verification is an ordinary outcome and is reported through
//! [`Verification::Invalid`](super::Verification::Invalid), not through this type.

use thiserror::Error as ThisError;

use crate::Error;

#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum TokenError {
    /// The configured signing secret is empty.
    #[error("Signing secret must not be empty")]
    EmptySecret,

    /// Claims could not be serialized.
    #[error("Failed to encode session claims")]
    Encoding {
        #[source]
        source: serde_json::Error,
    },

    /// The MAC could not be initialized.
    #[error("Failed to sign session token: {reason}")]
    Signing { reason: String },
}

impl TokenError {
    /// Check if this error comes from configuration rather than a request.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, TokenError::EmptySecret)
    }
}

impl From<TokenError> for Error {
    fn from(err: TokenError) -> Self {
        Error::Token(err)
    }
}
