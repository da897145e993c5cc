//! Token service
//!
//! Issues, verifies and revokes session tokens. Tokens use the JWS compact
//! form (`header.payload.signature`, base64url without padding) signed with
//! HMAC-SHA256 under a server-held secret, so only this process can mint them.
//!
//! A token is accepted only when all three hold:
//! - the signature verifies under the configured secret,
//! - the current time is strictly before `exp`,
//! - the exact token string is absent from the revocation list.

mod claims;
pub mod errors;


use std::sync::Arc;

use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

pub use claims::{InvalidReason, IssuedToken, SessionClaims, Verification};
pub use errors::TokenError;

use crate::{Clock, Result, backend::BackendImpl, constants::SESSION_TTL_SECS, user::UserIdentity};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

/// Server-held signing secret.
///
/// Zeroized on drop and never printed.
#[derive(Clone)]
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    /// Wrap raw secret bytes. Empty secrets are rejected.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = Zeroizing::new(secret.into());
        if bytes.is_empty() {
            return Err(TokenError::EmptySecret.into());
        }
        Ok(Self(bytes))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.0).map_err(|e| {
            TokenError::Signing {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Issues and checks session tokens.
///
/// Holds the backend only for the revocation list.
#[derive(Clone)]
pub struct TokenService {
    secret: SigningSecret,
    backend: Arc<dyn BackendImpl>,
    clock: Arc<dyn Clock>,
    ttl_secs: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &self.secret)
            .field("backend", &"<BackendImpl>")
            .field("clock", &self.clock)
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: SigningSecret, backend: Arc<dyn BackendImpl>, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret,
            backend,
            clock,
            ttl_secs: SESSION_TTL_SECS,
        }
    }

    /// Lifetime of issued tokens in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a token for `identity`, expiring exactly 24 hours from now.
    pub fn issue(&self, identity: &UserIdentity) -> Result<IssuedToken> {
        let claims = SessionClaims::new(identity, self.clock.now_secs(), self.ttl_secs);

        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };
        let header_json =
            serde_json::to_vec(&header).map_err(|e| TokenError::Encoding { source: e })?;
        let claims_json =
            serde_json::to_vec(&claims).map_err(|e| TokenError::Encoding { source: e })?;

        let signing_input = format!(
            "{}.{}",
            Base64UrlUnpadded::encode_string(&header_json),
            Base64UrlUnpadded::encode_string(&claims_json)
        );

        let mut mac = self.secret.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();

        let token = format!(
            "{signing_input}.{}",
            Base64UrlUnpadded::encode_string(&signature)
        );

        Ok(IssuedToken { token, claims })
    }

    /// Verify a presented token.
    ///
    /// Returns `Ok(Verification::Invalid(_))` for every rejection; `Err` only
    /// when the revocation list cannot be read.
    pub async fn verify(&self, token: &str) -> Result<Verification> {
        let claims = match self.decode(token)? {
            Ok(claims) => claims,
            Err(reason) => return Ok(Verification::Invalid(reason)),
        };

        if claims.is_expired_at(self.clock.now_secs()) {
            return Ok(Verification::Invalid(InvalidReason::Expired));
        }

        if self.backend.is_token_revoked(token).await? {
            return Ok(Verification::Invalid(InvalidReason::Revoked));
        }

        Ok(Verification::Valid(claims))
    }

    /// Revoke a token until its own expiry.
    ///
    /// Idempotent. Strings that do not carry a valid signature are ignored so the
    /// revocation list only ever holds tokens this service issued, and tokens
    /// already past expiry are skipped since they fail verification anyway.
    pub async fn revoke(&self, token: &str) -> Result<()> {
        let claims = match self.decode(token)? {
            Ok(claims) => claims,
            Err(reason) => {
                tracing::debug!(%reason, "Ignoring revocation of unverifiable token");
                return Ok(());
            }
        };

        if claims.is_expired_at(self.clock.now_secs()) {
            return Ok(());
        }

        self.backend.revoke_token(token, claims.exp).await
    }

    /// Check structure and signature, returning the claims without time or
    /// revocation checks.
    fn decode(&self, token: &str) -> Result<std::result::Result<SessionClaims, InvalidReason>> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Ok(Err(InvalidReason::Malformed));
        };

        let Ok(header_json) = Base64UrlUnpadded::decode_vec(header_b64) else {
            return Ok(Err(InvalidReason::Malformed));
        };
        let Ok(header) = serde_json::from_slice::<Header>(&header_json) else {
            return Ok(Err(InvalidReason::Malformed));
        };
        if header.alg != ALGORITHM {
            return Ok(Err(InvalidReason::UnsupportedAlgorithm));
        }

        let Ok(signature) = Base64UrlUnpadded::decode_vec(signature_b64) else {
            return Ok(Err(InvalidReason::Malformed));
        };

        let mut mac = self.secret.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            return Ok(Err(InvalidReason::BadSignature));
        }

        let Ok(claims_json) = Base64UrlUnpadded::decode_vec(claims_b64) else {
            return Ok(Err(InvalidReason::Malformed));
        };
        match serde_json::from_slice::<SessionClaims>(&claims_json) {
            Ok(claims) => Ok(Ok(claims)),
            Err(_) => Ok(Err(InvalidReason::Malformed)),
        }
    }
}
