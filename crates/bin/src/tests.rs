//! HTTP tests against the real router on an ephemeral port.

use std::sync::Arc;

use axum::http::HeaderValue;
use devlog::{
    Devlog, FixedClock, SigningSecret, backend::database::InMemory, constants::SESSION_TTL_SECS,
};
use reqwest::{
    Method, Response, StatusCode,
    header::{COOKIE, SET_COOKIE},
};
use serde_json::{Value, json};

use crate::{handlers::router, state::AppState};

const ORIGIN: &str = "http://localhost:3000";
const SECRET: &str = "http-test-secret-0123456789abcdef";

struct TestServer {
    base: String,
    client: reqwest::Client,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::serve(Devlog::open(
            Box::new(InMemory::new()),
            SigningSecret::new(SECRET).unwrap(),
        ))
        .await
    }

    async fn spawn_with_clock(clock: Arc<FixedClock>) -> Self {
        Self::serve(Devlog::open_with_clock(
            Box::new(InMemory::new()),
            SigningSecret::new(SECRET).unwrap(),
            clock,
        ))
        .await
    }

    async fn serve(devlog: Devlog) -> Self {
        let app = router(AppState::new(devlog), vec![HeaderValue::from_static(ORIGIN)]);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn send(&self, method: Method, path: &str, cookie: Option<&str>, body: Option<Value>) -> Response {
        let mut request = self.client.request(method, self.url(path));
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        request.send().await.unwrap()
    }

    async fn signup(&self, first_name: &str, email: &str) -> Response {
        self.send(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({
                "first_name": first_name,
                "last_name": "Doe",
                "email": email,
                "password": "pw123",
            })),
        )
        .await
    }

    /// Sign up and log in; returns a `Cookie` header value
    async fn session(&self, first_name: &str, email: &str) -> String {
        assert_eq!(self.signup(first_name, email).await.status(), StatusCode::CREATED);
        let response = self
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "email": email, "password": "pw123" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        session_cookie(&response).expect("login should set the session cookie")
    }

    async fn create_entry(&self, cookie: &str, title: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/journal/create",
                Some(cookie),
                Some(json!({ "journal_title": title, "journal_content": "notes" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let entry: Value = response.json().await.unwrap();
        entry["uuid"].as_str().unwrap().to_string()
    }

    /// `GET /auth/user` that must be rejected; returns the error body
    async fn rejected_user_lookup(&self, cookie: Option<&str>) -> Value {
        let response = self.send(Method::GET, "/auth/user", cookie, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "cookie {cookie:?}");
        response.json().await.unwrap()
    }

    async fn share(&self, cookie: &str, id: &str, is_public: bool, emails: &[&str]) -> Response {
        self.send(
            Method::POST,
            "/share/save",
            Some(cookie),
            Some(json!({
                "journalid": id,
                "isPublic": is_public,
                "allowedEmails": emails,
            })),
        )
        .await
    }
}

/// `auth-token=<value>` from the response's Set-Cookie headers
fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("auth-token="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

fn set_cookie_header(response: &Response) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn signup_login_user_logout_scenario() {
    let server = TestServer::spawn().await;

    let response = server.signup("Jane", "jane@x.com").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["email"], "jane@x.com");
    assert!(created.get("password").is_none());
    assert!(created.get("password_hash").is_none());

    let response = server
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "jane@x.com", "password": "pw123" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = set_cookie_header(&response);
    for attribute in ["HttpOnly", "Secure", "SameSite=None", "Path=/", "Max-Age=86400"] {
        assert!(set_cookie.contains(attribute), "{attribute} missing from {set_cookie}");
    }
    let cookie = session_cookie(&response).unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], "jane@x.com");
    assert_eq!(format!("auth-token={}", body["token"].as_str().unwrap()), cookie);

    let response = server.send(Method::GET, "/auth/user", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let user: Value = response.json().await.unwrap();
    assert_eq!(user["email"], "jane@x.com");
    assert_eq!(user["first_name"], "Jane");

    let response = server.send(Method::POST, "/auth/logout", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["clear-site-data"], "\"cookies\"");
    assert!(set_cookie_header(&response).contains("Max-Age=0"));
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");

    // Replaying the revoked token fails
    let response = server.send(Method::GET, "/auth/user", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["statusCode"], 401);
}

#[tokio::test]
async fn signup_errors() {
    let server = TestServer::spawn().await;
    assert_eq!(server.signup("Jane", "jane@x.com").await.status(), StatusCode::CREATED);
    assert_eq!(server.signup("Jane", "JANE@x.com").await.status(), StatusCode::CONFLICT);
    assert_eq!(server.signup("Jane", "not-an-email").await.status(), StatusCode::BAD_REQUEST);

    let response = server
        .send(Method::POST, "/auth/signup", None, Some(json!({ "email": 42 })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_failures_look_identical() {
    let server = TestServer::spawn().await;
    server.signup("Jane", "jane@x.com").await;

    let wrong_password = server
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "jane@x.com", "password": "nope" })),
        )
        .await;
    let unknown_email = server
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "ghost@x.com", "password": "pw123" })),
        )
        .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&wrong_password).is_none());
    let a: Value = wrong_password.json().await.unwrap();
    let b: Value = unknown_email.json().await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn guard_rejections_are_uniform() {
    let clock = Arc::new(FixedClock::default());
    let server = TestServer::spawn_with_clock(clock.clone()).await;

    let expiring = server.session("Eve", "e@x.com").await;
    let revoked = server.session("Rob", "r@x.com").await;
    let logout = server.send(Method::POST, "/auth/logout", Some(&revoked), None).await;
    assert_eq!(logout.status(), StatusCode::OK);

    let mut bodies = vec![
        server.rejected_user_lookup(None).await,
        server.rejected_user_lookup(Some("auth-token=garbage")).await,
        server
            .rejected_user_lookup(Some("auth-token=eyJhbGciOiJub25lIn0.eyJlbWFpbCI6ImFAeC5jb20ifQ."))
            .await,
        server.rejected_user_lookup(Some(&revoked)).await,
    ];

    clock.advance_secs(SESSION_TTL_SECS as u64);
    bodies.push(server.rejected_user_lookup(Some(&expiring)).await);

    assert!(bodies.windows(2).all(|w| w[0] == w[1]));

    // A session issued after the clock moved still works
    let fresh = server
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "e@x.com", "password": "pw123" })),
        )
        .await;
    let fresh = session_cookie(&fresh).unwrap();
    assert_eq!(
        server.send(Method::GET, "/auth/user", Some(&fresh), None).await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn logins_in_the_same_instant_are_separate_sessions() {
    let server = TestServer::spawn_with_clock(Arc::new(FixedClock::default())).await;
    let first = server.session("Jane", "jane@x.com").await;
    let second = server
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "jane@x.com", "password": "pw123" })),
        )
        .await;
    let second = session_cookie(&second).unwrap();
    assert_ne!(first, second);

    server.send(Method::POST, "/auth/logout", Some(&first), None).await;
    assert_eq!(
        server.send(Method::GET, "/auth/user", Some(&first), None).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        server.send(Method::GET, "/auth/user", Some(&second), None).await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn logout_without_session_succeeds() {
    let server = TestServer::spawn().await;
    let response = server.send(Method::POST, "/auth/logout", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = server
        .send(Method::POST, "/auth/logout", Some("auth-token=junk"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn sharing_over_http() {
    let server = TestServer::spawn().await;
    let alice = server.session("Alice", "a@x.com").await;
    let bob = server.session("Bob", "b@x.com").await;
    let carol = server.session("Carol", "c@x.com").await;
    let id = server.create_entry(&alice, "Day 1").await;
    let path = format!("/share/{id}");

    // Private
    assert_eq!(server.send(Method::GET, &path, None, None).await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        server.send(Method::GET, &path, Some(&bob), None).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(server.send(Method::GET, &path, Some(&alice), None).await.status(), StatusCode::OK);

    // Shared with Bob
    let response = server.share(&alice, &id, false, &["B@x.com"]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Shared entry saved successfully");
    assert_eq!(body["visibility"]["allowedEmails"], json!(["b@x.com"]));

    let response = server.send(Method::GET, &path, Some(&bob), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["entry"]["journal_title"], "Day 1");
    assert_eq!(
        server.send(Method::GET, &path, Some(&carol), None).await.status(),
        StatusCode::UNAUTHORIZED
    );

    // Collaborators cannot change sharing
    assert_eq!(server.share(&bob, &id, true, &[]).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(server.send(Method::GET, &path, None, None).await.status(), StatusCode::UNAUTHORIZED);

    // Public
    assert_eq!(server.share(&alice, &id, true, &["b@x.com"]).await.status(), StatusCode::OK);
    assert_eq!(server.send(Method::GET, &path, None, None).await.status(), StatusCode::OK);
    assert_eq!(server.send(Method::GET, &path, Some(&carol), None).await.status(), StatusCode::OK);

    // Bad input
    assert_eq!(
        server.share(&alice, &id, false, &["not-an-email"]).await.status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        server.share(&alice, "missing", true, &[]).await.status(),
        StatusCode::NOT_FOUND
    );
    let response = server
        .send(Method::POST, "/share/save", None, Some(json!({ "journalid": id, "isPublic": true, "allowedEmails": [] })))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn journal_changes_are_owner_only() {
    let server = TestServer::spawn().await;
    let alice = server.session("Alice", "a@x.com").await;
    let bob = server.session("Bob", "b@x.com").await;
    let id = server.create_entry(&alice, "draft").await;
    let path = format!("/journal/{id}");

    assert_eq!(server.send(Method::GET, &path, Some(&bob), None).await.status(), StatusCode::FORBIDDEN);

    let edit = json!({ "journal_title": "hijacked" });
    assert_eq!(
        server.send(Method::PUT, &path, Some(&bob), Some(edit.clone())).await.status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(server.send(Method::DELETE, &path, Some(&bob), None).await.status(), StatusCode::FORBIDDEN);

    let response = server
        .send(Method::PUT, &path, Some(&alice), Some(json!({ "journal_title": "final" })))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let entry: Value = response.json().await.unwrap();
    assert_eq!(entry["journal_title"], "final");

    let response = server.send(Method::GET, "/journal/all", Some(&alice), None).await;
    let entries: Value = response.json().await.unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 1);

    assert_eq!(server.send(Method::DELETE, &path, Some(&alice), None).await.status(), StatusCode::OK);
    assert_eq!(server.send(Method::GET, &path, Some(&alice), None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(server.send(Method::GET, "/journal/all", None, None).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_and_cors() {
    let server = TestServer::spawn().await;

    let response = server.send(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "healthy", "backend": "inmemory" }));

    let response = server
        .client
        .request(Method::OPTIONS, server.url("/auth/login"))
        .header("origin", ORIGIN)
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["access-control-allow-origin"], ORIGIN);
    assert_eq!(response.headers()["access-control-allow-credentials"], "true");

    let response = server
        .client
        .request(Method::OPTIONS, server.url("/auth/login"))
        .header("origin", "https://evil.example")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
