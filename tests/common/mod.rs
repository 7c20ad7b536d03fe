//! Shared helpers for router-level tests.

#![allow(dead_code, clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use race_registration::api::build_app;
use race_registration::app_state::AppState;
use race_registration::config::AppConfig;
use race_registration::notify::{EmailTransport, Mailer, MailerSettings, MemoryTransport};
use race_registration::persistence::{MemoryStore, RegistrationStore};

/// Cookie header value of a logged-in admin.
pub const ADMIN_COOKIE: &str = "admin_session=authenticated";

/// A router wired to in-memory collaborators that tests can inspect.
pub struct TestApp {
    /// The application under test.
    pub router: Router,
    /// Records written by the application.
    pub store: Arc<MemoryStore>,
    /// Confirmation emails.
    pub smtp: Arc<MemoryTransport>,
    /// Notification and partner emails.
    pub api: Arc<MemoryTransport>,
}

/// Loads configuration from the given pairs only.
pub fn config(pairs: &[(&str, &str)]) -> AppConfig {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    let Ok(config) = AppConfig::from_lookup(|key| map.get(key).cloned()) else {
        panic!("test configuration should load");
    };
    config
}

/// Builds an app with both email transports configured.
pub fn app(pairs: &[(&str, &str)]) -> TestApp {
    build(pairs, MemoryTransport::new(), Some(MemoryTransport::new()))
}

/// Builds an app with explicit transports; `api = None` leaves the email
/// API unconfigured.
pub fn build(
    pairs: &[(&str, &str)],
    smtp: MemoryTransport,
    api: Option<MemoryTransport>,
) -> TestApp {
    let config = config(pairs);
    let store = Arc::new(MemoryStore::new());
    let smtp = Arc::new(smtp);
    let api_configured = api.is_some();
    let api = Arc::new(api.unwrap_or_default());

    let mailer = Mailer::new(
        MailerSettings::from(&config),
        Some(Arc::clone(&smtp) as Arc<dyn EmailTransport>),
        api_configured.then(|| Arc::clone(&api) as Arc<dyn EmailTransport>),
    );
    let state = AppState::new(
        config,
        Arc::clone(&store) as Arc<dyn RegistrationStore>,
        mailer,
    );
    TestApp {
        router: build_app(state),
        store,
        smtp,
        api,
    }
}

/// Builds a request with an optional JSON body and admin cookie.
pub fn request(
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let Ok(request) = builder.body(body) else {
        panic!("request should build");
    };
    request
}

/// Builds a JSON-typed request whose body is sent verbatim.
pub fn raw_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
    let Ok(request) = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
    else {
        panic!("request should build");
    };
    request
}

/// Sends a request and collects the response.
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let Ok(response) = app.router.clone().oneshot(request).await;
    let status = response.status();
    let headers = response.headers().clone();
    let Ok(body) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("body should be readable");
    };
    (status, headers, body)
}

/// Sends a request and parses the response body as JSON.
pub async fn send_json(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, request).await;
    let Ok(json) = serde_json::from_slice(&body) else {
        panic!("expected a JSON body, got {}", String::from_utf8_lossy(&body));
    };
    (status, json)
}

/// A complete individual registration body.
pub fn individual_body(name: &str, email: &str) -> Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "contact": "09171234567",
        "gender": "Female",
        "birthday": "1990-01-01",
        "raceCategory": "Individual",
        "affiliations": "Manila Runners",
        "promotional": true,
        "tShirtSize": "M"
    })
}

/// A complete team registration body with `members` members.
pub fn team_body(email: &str, members: usize) -> Value {
    let members: Vec<Value> = (1..=members)
        .map(|i| {
            serde_json::json!({
                "name": format!("Member {i}"),
                "birthday": "1992-03-04",
                "gender": "Male",
                "contact": format!("0917000000{i}"),
                "tShirtSize": "L"
            })
        })
        .collect();
    serde_json::json!({
        "email": email,
        "raceCategory": "Team Category",
        "affiliations": "Speed Club",
        "promotional": false,
        "teamMembers": members
    })
}
