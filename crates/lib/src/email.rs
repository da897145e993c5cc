//! Email normalization.
//!
//! Emails are the comparison key for identities, ownership and allow-lists. Every
//! write and every comparison goes through [`normalize_email`] so that stored and
//! presented forms never disagree on case or surrounding whitespace.

/// Trim and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Case-insensitive email equality.
pub fn emails_match(a: &str, b: &str) -> bool {
    normalize_email(a) == normalize_email(b)
}

/// Minimal syntactic check: one `@` with something on both sides, no whitespace.
///
/// Input is expected to be normalized already.
pub fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
