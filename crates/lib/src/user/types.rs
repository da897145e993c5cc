//! Core data types for the credential store

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity fields that leave the credential store.
///
/// This is also the shape embedded in session tokens and returned by
/// `GET /auth/user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Normalized email, the unique comparison key
    pub email: String,
    /// Stable opaque identifier
    pub uuid: Uuid,
    pub first_name: String,
    pub last_name: String,
}

/// Stored identity record.
///
/// The password hash never leaves this crate; callers see [`UserIdentity`].
#[derive(Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub uuid: Uuid,
    /// Normalized email (unique)
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Argon2id PHC string
    pub(crate) password_hash: String,
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
}

impl UserRecord {
    pub(crate) fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Public view of this record.
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            email: self.email.clone(),
            uuid: self.uuid,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("uuid", &self.uuid)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Signup input.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl zeroize::Zeroize for NewUser {
    fn zeroize(&mut self) {
        self.password.zeroize();
    }
}

impl Drop for NewUser {
    fn drop(&mut self) {
        zeroize::Zeroize::zeroize(self);
    }
}
