//! Router-level tests of the admin endpoints: login, listing, export,
//! t-shirt edits and deletion.

#![allow(clippy::panic, clippy::indexing_slicing)]

mod common;

use axum::http::{Method, StatusCode, header};
use serde_json::{Value, json};

use common::{ADMIN_COOKIE, TestApp, app, individual_body, request, send, send_json, team_body};

const CREDENTIALS: &[(&str, &str)] = &[
    ("ADMIN_EMAIL", "admin@example.com"),
    ("ADMIN_PASSWORD", "s3cret"),
];

async fn register(app: &TestApp, body: Value) {
    let (status, json) = send_json(
        app,
        request(Method::POST, "/api/register", Some(body), None),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
}

async fn list(app: &TestApp, query: &str) -> Value {
    let uri = format!("/api/users{query}");
    let (status, json) = send_json(app, request(Method::GET, &uri, None, Some(ADMIN_COOKIE))).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    json
}

async fn first_id(app: &TestApp) -> String {
    let Some(record) = app.store.snapshot().await.into_iter().next() else {
        panic!("a stored record is expected");
    };
    record.id.to_string()
}

#[tokio::test]
async fn login_sets_session_cookie() {
    let app = app(CREDENTIALS);
    let body = json!({ "email": " admin@example.com ", "password": "s3cret " });

    let (status, headers, _) = send(
        &app,
        request(Method::POST, "/api/auth/login", Some(body), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let Some(cookie) = headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok()) else {
        panic!("Set-Cookie expected");
    };
    assert!(cookie.starts_with("admin_session=authenticated"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=604800"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn secure_cookie_follows_configuration() {
    let mut pairs = CREDENTIALS.to_vec();
    pairs.push(("COOKIE_SECURE", "true"));
    let app = app(&pairs);
    let body = json!({ "email": "admin@example.com", "password": "s3cret" });

    let (_, headers, _) = send(
        &app,
        request(Method::POST, "/api/auth/login", Some(body), None),
    )
    .await;
    let cookie = headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(cookie.contains("Secure"));
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let app = app(CREDENTIALS);
    let body = json!({ "email": "admin@example.com", "password": "guess" });

    let (status, headers, _) = send(
        &app,
        request(Method::POST, "/api/auth/login", Some(body), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn unset_credentials_are_a_server_error() {
    let app = app(&[]);
    let body = json!({ "email": "", "password": "" });

    let (status, json) = send_json(
        &app,
        request(Method::POST, "/api/auth/login", Some(body), None),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap_or_default().contains("configuration"));
}

#[tokio::test]
async fn logout_expires_the_cookie() {
    let app = app(&[]);
    let (status, headers, _) = send(
        &app,
        request(Method::POST, "/api/auth/logout", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let cookie = headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn admin_routes_require_session() {
    let app = app(&[]);
    for uri in ["/api/users", "/api/users/export", "/api/users/config"] {
        let (status, _) = send_json(&app, request(Method::GET, uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");

        let (status, _) = send_json(
            &app,
            request(Method::GET, uri, None, Some("admin_session=forged")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }

    let (status, _) = send_json(
        &app,
        request(Method::PATCH, "/api/users/abc", Some(json!({ "tShirtSize": "M" })), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn listing_filters_by_substring_and_exact_fields() {
    let app = app(&[]);
    register(&app, individual_body("Ana Cruz", "ana@example.com")).await;
    let mut ben = individual_body("Ben Reyes", "ben@example.com");
    ben["gender"] = json!("Male");
    ben["raceCategory"] = json!("Youth Category");
    ben["affiliations"] = json!("");
    register(&app, ben).await;
    register(&app, team_body("club@example.com", 4)).await;

    let all = list(&app, "").await;
    assert_eq!(all["total"], 6);
    assert_eq!(all["count"], 6);
    assert_eq!(all["totalPages"], 1);

    let by_name = list(&app, "?name=CRUZ").await;
    assert_eq!(by_name["total"], 1);
    assert_eq!(by_name["users"][0]["email"], "ana@example.com");

    let by_club = list(&app, "?club=speed").await;
    assert_eq!(by_club["total"], 4);

    let by_gender = list(&app, "?gender=Male").await;
    assert_eq!(by_gender["total"], 5);

    let by_gender_partial = list(&app, "?gender=Mal").await;
    assert_eq!(by_gender_partial["total"], 0);

    let by_category = list(&app, "?raceCategory=Youth%20Category").await;
    assert_eq!(by_category["total"], 1);
    assert_eq!(by_category["users"][0]["name"], "Ben Reyes");

    let literal = list(&app, "?name=A.a").await;
    assert_eq!(literal["total"], 0);
}

#[tokio::test]
async fn listing_filters_by_registration_date() {
    let app = app(&[]);
    register(&app, individual_body("Ana", "ana@example.com")).await;

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let same_day = list(&app, &format!("?dateFrom={today}&dateTo={today}")).await;
    assert_eq!(same_day["total"], 1);

    let future = list(&app, "?dateFrom=2999-01-01").await;
    assert_eq!(future["total"], 0);

    let past = list(&app, "?dateTo=2000-01-01").await;
    assert_eq!(past["total"], 0);

    let (status, _) = send_json(
        &app,
        request(Method::GET, "/api/users?dateFrom=yesterday", None, Some(ADMIN_COOKIE)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_paginates_newest_first() {
    let app = app(&[]);
    for i in 0..25 {
        let body = individual_body(&format!("Runner {i:02}"), &format!("r{i}@example.com"));
        register(&app, body).await;
    }

    let page = list(&app, "?page=3&limit=10").await;
    assert_eq!(page["total"], 25);
    assert_eq!(page["count"], 5);
    assert_eq!(page["page"], 3);
    assert_eq!(page["limit"], 10);
    assert_eq!(page["totalPages"], 3);

    let first = list(&app, "?limit=1").await;
    assert_eq!(first["users"][0]["name"], "Runner 24");

    let empty = list(&app, "?name=nobody").await;
    assert_eq!(empty["count"], 0);
    assert_eq!(empty["totalPages"], 1);
}

#[tokio::test]
async fn export_returns_filtered_csv() {
    let app = app(&[]);
    register(&app, individual_body("Ana Cruz", "ana@example.com")).await;
    register(&app, team_body("club@example.com", 4)).await;

    let (status, headers, body) = send(
        &app,
        request(Method::GET, "/api/users/export?club=speed", None, Some(ADMIN_COOKIE)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("text/csv"));
    let disposition = headers
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(disposition.contains("registered-users-"));

    let text = String::from_utf8_lossy(&body);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Name,Email,Contact"));
    assert!(lines[1..].iter().all(|l| l.contains("club@example.com")));
}

#[tokio::test]
async fn config_reports_delete_flag() {
    let app = app(&[("DELETE_USER_ENABLED", "true")]);
    let (status, json) = send_json(
        &app,
        request(Method::GET, "/api/users/config", None, Some(ADMIN_COOKIE)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deleteUserEnabled"], true);
}

#[tokio::test]
async fn tshirt_size_can_be_changed_and_cleared() {
    let app = app(&[]);
    register(&app, individual_body("Ana", "ana@example.com")).await;
    let id = first_id(&app).await;
    let uri = format!("/api/users/{id}");

    let (status, json) = send_json(
        &app,
        request(Method::PATCH, &uri, Some(json!({ "tShirtSize": " XL " })), Some(ADMIN_COOKIE)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["tShirtSize"], "XL");

    let (status, json) = send_json(
        &app,
        request(Method::PATCH, &uri, Some(json!({ "tShirtSize": "" })), Some(ADMIN_COOKIE)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tShirtSize"], "");

    let listed = list(&app, "").await;
    assert_eq!(listed["users"][0]["tShirtSize"], "");
}

#[tokio::test]
async fn tshirt_edit_rejects_bad_input() {
    let app = app(&[]);
    register(&app, individual_body("Ana", "ana@example.com")).await;
    let id = first_id(&app).await;

    let (status, _) = send_json(
        &app,
        request(
            Method::PATCH,
            &format!("/api/users/{id}"),
            Some(json!({ "tShirtSize": "XXXL" })),
            Some(ADMIN_COOKIE),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        request(
            Method::PATCH,
            "/api/users/not-a-uuid",
            Some(json!({ "tShirtSize": "M" })),
            Some(ADMIN_COOKIE),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        request(
            Method::PATCH,
            &format!("/api/users/{}", uuid::Uuid::new_v4()),
            Some(json!({ "tShirtSize": "M" })),
            Some(ADMIN_COOKIE),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_forbidden_when_disabled_even_without_session() {
    let app = app(&[]);
    register(&app, individual_body("Ana", "ana@example.com")).await;
    let id = first_id(&app).await;

    for cookie in [None, Some(ADMIN_COOKIE)] {
        let (status, _) = send_json(
            &app,
            request(Method::DELETE, "/api/users/delete", Some(json!({ "userId": id })), cookie),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn delete_when_enabled_checks_session_and_id() {
    let app = app(&[("DELETE_USER_ENABLED", "true")]);
    register(&app, individual_body("Ana", "ana@example.com")).await;
    let id = first_id(&app).await;

    let (status, _) = send_json(
        &app,
        request(Method::DELETE, "/api/users/delete", Some(json!({ "userId": id })), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = send_json(
        &app,
        request(Method::DELETE, "/api/users/delete", Some(json!({})), Some(ADMIN_COOKIE)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "User ID is required");

    let (status, _) = send_json(
        &app,
        request(
            Method::DELETE,
            "/api/users/delete",
            Some(json!({ "userId": "xyz" })),
            Some(ADMIN_COOKIE),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        request(
            Method::DELETE,
            "/api/users/delete",
            Some(json!({ "userId": uuid::Uuid::new_v4().to_string() })),
            Some(ADMIN_COOKIE),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send_json(
        &app,
        request(
            Method::DELETE,
            "/api/users/delete",
            Some(json!({ "userId": id })),
            Some(ADMIN_COOKIE),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert!(app.store.is_empty().await);
}
