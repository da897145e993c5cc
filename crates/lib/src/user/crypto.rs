//! Password hashing for the credential store
//!
//! Argon2id with a random per-password salt. The PHC string produced by
//! [`hash_password`] embeds the salt and parameters, so it is the only value that
//! needs to be stored.

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};

use super::errors::UserError;
use crate::Result;

/// Hash a password using Argon2id
///
/// # Returns
/// The Argon2 hash string (PHC format, salt included)
pub fn hash_password(password: impl AsRef<str>) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map_err(|e| UserError::HashingFailed {
            reason: e.to_string(),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its stored hash
///
/// Any failure, including an unparsable stored hash, is reported as
/// [`UserError::InvalidCredentials`].
pub fn verify_password(password: impl AsRef<str>, password_hash: impl AsRef<str>) -> Result<()> {
    let parsed_hash =
        PasswordHash::new(password_hash.as_ref()).map_err(|_| UserError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_ref().as_bytes(), &parsed_hash)
        .map_err(|_| UserError::InvalidCredentials.into())
}

/// Run one verification against a fixed hash and discard the result.
///
/// Called when the email is unknown so that a failed login costs the same
/// whether or not the account exists.
pub fn verify_against_dummy(password: impl AsRef<str>) {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    let dummy = DUMMY_HASH.get_or_init(|| hash_password("devlog-timing-equalizer").ok());
    if let Some(hash) = dummy {
        let _ = verify_password(password, hash);
    }
}
