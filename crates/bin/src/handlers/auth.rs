//! `/auth` handlers: signup, login, logout and the current user.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
};
use devlog::{
    constants::SESSION_COOKIE,
    user::{NewUser, UserIdentity},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_cookies::{
    Cookie, Cookies,
    cookie::SameSite,
};
use zeroize::ZeroizeOnDrop;

use crate::{error::ApiError, guard::AuthUser, state::AppState};

const CLEAR_SITE_DATA: HeaderName = HeaderName::from_static("clear-site-data");

#[derive(Deserialize, ZeroizeOnDrop)]
pub struct LoginRequest {
    #[zeroize(skip)]
    email: String,
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
    user: UserIdentity,
}

/// Session cookie with the attributes the client needs for cross-site use.
fn session_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new_user) = payload?;
    let identity = state.devlog.signup(&new_user).await?;
    Ok((StatusCode::CREATED, Json(identity)))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload?;
    let outcome = state
        .devlog
        .login(&request.email, &request.password)
        .await?;

    cookies.add(session_cookie(
        outcome.token.clone(),
        state.devlog.session_ttl_secs(),
    ));

    Ok(Json(LoginResponse {
        token: outcome.token,
        user: outcome.user,
    }))
}

/// POST /auth/logout
///
/// Always succeeds for the caller: a missing, expired or foreign cookie is
/// simply cleared.
pub async fn logout(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        state.devlog.logout(cookie.value()).await?;
        cookies.remove(session_cookie(String::new(), 0));
    }

    Ok((
        [(CLEAR_SITE_DATA, HeaderValue::from_static("\"cookies\""))],
        Json(json!({
            "status": "success",
            "message": "You have been logged out successfully",
        })),
    ))
}

/// GET /auth/user
pub async fn user(AuthUser(identity): AuthUser) -> Json<UserIdentity> {
    Json(identity)
}
