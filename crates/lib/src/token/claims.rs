//! Session token payload and verification outcomes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::UserIdentity;

/// Signed payload of a session token.
///
/// Self-contained: verification returns these fields without consulting the
/// credential store, so a name change is only visible after the next login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub uuid: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds); the token is invalid at or after this instant
    pub exp: i64,
    /// Unique per issuance, so two logins in the same second get distinct tokens
    pub jti: Uuid,
}

impl SessionClaims {
    pub(crate) fn new(identity: &UserIdentity, iat: i64, ttl_secs: i64) -> Self {
        Self {
            uuid: identity.uuid,
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            iat,
            exp: iat + ttl_secs,
            jti: Uuid::new_v4(),
        }
    }

    /// Identity carried by this token.
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            email: self.email.clone(),
            uuid: self.uuid,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    /// Whether the token has expired at `now` (Unix seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// A freshly issued token and the claims it carries.
#[derive(Clone, Debug)]
pub struct IssuedToken {
    pub token: String,
    pub claims: SessionClaims,
}

/// Why a token was rejected.
///
/// Only ever logged. Callers outside the process see a uniform rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidReason {
    /// Not three dot-separated base64url segments, or undecodable JSON.
    Malformed,
    /// Header names an algorithm other than HS256.
    UnsupportedAlgorithm,
    BadSignature,
    Expired,
    Revoked,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InvalidReason::Malformed => "malformed",
            InvalidReason::UnsupportedAlgorithm => "unsupported algorithm",
            InvalidReason::BadSignature => "bad signature",
            InvalidReason::Expired => "expired",
            InvalidReason::Revoked => "revoked",
        };
        f.write_str(s)
    }
}

/// Outcome of [`TokenService::verify`](super::TokenService::verify).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    Valid(SessionClaims),
    Invalid(InvalidReason),
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid(_))
    }

    /// Claims if valid, discarding the rejection reason.
    pub fn into_claims(self) -> Option<SessionClaims> {
        match self {
            Verification::Valid(claims) => Some(claims),
            Verification::Invalid(_) => None,
        }
    }
}
