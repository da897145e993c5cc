//! HTTP routes.

pub mod auth;
pub mod health;
pub mod journal;
pub mod share;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_cookies::CookieManagerLayer;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Build the application router.
///
/// `allowed_origins` may send credentialed (cookie-bearing) cross-site requests.
pub fn router(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health::health))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/user", get(auth::user))
        .route("/share/save", post(share::save))
        .route("/share/{journalid}", get(share::get_shared))
        .route("/journal/create", post(journal::create))
        .route("/journal/all", get(journal::list))
        .route(
            "/journal/{journalid}",
            get(journal::get_entry)
                .put(journal::update)
                .delete(journal::delete),
        )
        .layer(CookieManagerLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
