//! Session guard extractors.
//!
//! [`AuthUser`] rejects with a uniform 401 unless the `auth-token` cookie holds
//! a token that verifies. [`MaybeUser`] never rejects for a bad or missing token;
//! it resolves to `None` instead.

use axum::{extract::FromRequestParts, http::request::Parts};
use devlog::{constants::SESSION_COOKIE, token::Verification, user::UserIdentity};
use tower_cookies::Cookies;

use crate::{error::ApiError, state::AppState};

/// Caller with a valid session.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserIdentity);

/// Caller with a valid session, or nobody.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<UserIdentity>);

/// Resolve the session cookie to an identity.
///
/// `Ok(None)` covers every rejection reason; `Err` is reserved for storage failures.
async fn resolve(parts: &mut Parts, state: &AppState) -> Result<Option<UserIdentity>, ApiError> {
    let Ok(cookies) = Cookies::from_request_parts(parts, state).await else {
        return Ok(None);
    };
    let Some(cookie) = cookies.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    match state.devlog.verify_session(cookie.value()).await? {
        Verification::Valid(claims) => Ok(Some(claims.identity())),
        Verification::Invalid(_) => Ok(None),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .await?
            .map(AuthUser)
            .ok_or_else(ApiError::unauthenticated)
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve(parts, state).await?))
    }
}
