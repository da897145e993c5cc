//! Constants shared between the library and the HTTP boundary.

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "auth-token";

/// Lifetime of an issued session token in seconds (24 hours).
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Minimum recommended signing secret length in bytes.
///
/// Shorter secrets are accepted but logged as a warning at startup.
pub const RECOMMENDED_SECRET_LEN: usize = 32;
