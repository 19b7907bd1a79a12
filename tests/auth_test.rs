//! HTTP-level tests for the auth routes, driven against the in-memory store.

mod helpers;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use helpers::TestApp;

#[tokio::test]
async fn test_sign_up_issues_session_cookie() {
    let app = TestApp::new();

    let res = app.sign_up("a@x.com", "Ann", "pw12345678").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["identity"]["name"], "Ann");
    assert_eq!(res.body["identity"]["email"], "a@x.com");
    assert!(res.body["session_id"].is_string());
    assert!(res.body["identity"]["id"].is_string());
    assert!(res.body.get("token").is_none());

    let cookie = res.set_cookie().unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=604800"));
    assert!(cookie.contains("Secure"));
    assert!(res.session_token().is_some());
}

#[tokio::test]
async fn test_sign_up_then_current_session() {
    let app = TestApp::new();
    let signed_up = app.sign_up("a@x.com", "Ann", "pw12345678").await;
    let token = signed_up.session_token().unwrap();

    let res = app.get("/api/auth/session", Some(&token)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["session_id"], signed_up.body["session_id"]);
    assert_eq!(res.body["identity"], signed_up.body["identity"]);
}

#[tokio::test]
async fn test_current_session_without_cookie_is_null() {
    let app = TestApp::new();

    let res = app.get("/api/auth/session", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, Value::Null);

    let res = app.get("/api/auth/session", Some("never-issued")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, Value::Null);
}

#[tokio::test]
async fn test_duplicate_sign_up_conflicts() {
    let app = TestApp::new();
    let first = app.sign_up("a@x.com", "Ann", "pw12345678").await;
    assert_eq!(first.status, StatusCode::OK);

    let res = app.sign_up("a@x.com", "Bob", "another-password").await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["error"], "CONFLICT");
    assert_eq!(res.body["message"], "Email already registered");
    assert!(res.set_cookie().is_none());

    // The first account still works.
    let token = first.session_token().unwrap();
    let current = app.get("/api/auth/session", Some(&token)).await;
    assert_eq!(current.body["identity"]["name"], "Ann");
    assert_eq!(app.store.identity_count().await, 1);
}

#[tokio::test]
async fn test_sign_in_returns_same_identity() {
    let app = TestApp::new();
    let signed_up = app.sign_up("a@x.com", "Ann", "pw12345678").await;

    let res = app.sign_in("a@x.com", "pw12345678").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["identity"]["id"], signed_up.body["identity"]["id"]);
    assert_ne!(res.body["session_id"], signed_up.body["session_id"]);
    assert_ne!(res.session_token(), signed_up.session_token());
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let app = TestApp::new();
    app.sign_up("a@x.com", "Ann", "pw12345678").await;

    let wrong_password = app.sign_in("a@x.com", "wrongpw").await;
    let unknown_email = app.sign_in("nobody@x.com", "pw12345678").await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["error"], "INVALID_CREDENTIALS");
    assert_eq!(wrong_password.body["message"], "Invalid email or password");
    assert!(wrong_password.set_cookie().is_none());
}

#[tokio::test]
async fn test_sign_up_validation() {
    let app = TestApp::new();

    let bad_email = app.sign_up("not-an-email", "Ann", "pw12345678").await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.body["error"], "VALIDATION");

    let short_password = app.sign_up("a@x.com", "Ann", "short").await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);

    let short_name = app.sign_up("a@x.com", "A", "pw12345678").await;
    assert_eq!(short_name.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.store.identity_count().await, 0);
}

#[tokio::test]
async fn test_sign_in_requires_fields() {
    let app = TestApp::new();
    let res = app
        .post("/api/auth/sign-in", json!({ "email": "", "password": "" }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_short_sign_in_password_is_invalid_credentials() {
    let app = TestApp::new();
    app.sign_up("a@x.com", "Ann", "pw12345678").await;

    let short = app.sign_in("a@x.com", "pw1").await;
    let wrong = app.sign_in("a@x.com", "wrong-password").await;
    assert_eq!(short.status, StatusCode::UNAUTHORIZED);
    assert_eq!(short.body, wrong.body);
    assert!(short.set_cookie().is_none());
}

#[tokio::test]
async fn test_sign_out_clears_cookie_and_session() {
    let app = TestApp::new();
    let token = app
        .sign_up("a@x.com", "Ann", "pw12345678")
        .await
        .session_token()
        .unwrap();

    let res = app.sign_out(Some(&token)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "signed_out");
    let cookie = res.set_cookie().unwrap();
    assert!(cookie.starts_with("session_token=;"));
    assert!(cookie.contains("Max-Age=0"));

    let current = app.get("/api/auth/session", Some(&token)).await;
    assert_eq!(current.body, Value::Null);
    assert_eq!(app.store.session_count().await, 0);
}

#[tokio::test]
async fn test_sign_out_is_idempotent() {
    let app = TestApp::new();
    let token = app
        .sign_up("a@x.com", "Ann", "pw12345678")
        .await
        .session_token()
        .unwrap();

    assert_eq!(app.sign_out(Some(&token)).await.status, StatusCode::OK);
    assert_eq!(app.sign_out(Some(&token)).await.status, StatusCode::OK);
    assert_eq!(app.sign_out(Some("never-issued")).await.status, StatusCode::OK);

    let without_cookie = app.sign_out(None).await;
    assert_eq!(without_cookie.status, StatusCode::OK);
    assert!(without_cookie.set_cookie().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn test_private_route_requires_session() {
    let app = TestApp::new();

    let res = app.get("/api/private", None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "UNAUTHENTICATED");
    assert_eq!(res.body["message"], "Authentication required");

    let token = app
        .sign_up("a@x.com", "Ann", "pw12345678")
        .await
        .session_token()
        .unwrap();
    let res = app.get("/api/private", Some(&token)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "This is private");
    assert_eq!(res.body["identity"]["email"], "a@x.com");
}

#[tokio::test]
async fn test_session_records_client_metadata() {
    let app = TestApp::new();
    let res = app
        .request(
            Method::POST,
            "/api/auth/sign-up",
            Some(json!({ "email": "a@x.com", "name": "Ann", "password": "pw12345678" })),
            &[
                ("x-forwarded-for", "198.51.100.4, 10.0.0.2"),
                ("user-agent", "integration-test"),
            ],
        )
        .await;
    let token = res.session_token().unwrap();

    let row = app.store.session_row(&token).await.unwrap();
    assert_eq!(row.client_ip.as_deref(), Some("198.51.100.4"));
    assert_eq!(row.user_agent.as_deref(), Some("integration-test"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let res = app.get("/api/health", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");

    let res = app.get("/api/health/ready", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ready");
}

#[tokio::test]
async fn test_store_outage_maps_to_server_error() {
    let app = TestApp::new();
    app.sign_up("a@x.com", "Ann", "pw12345678").await;
    app.store.set_unavailable(true);

    let ready = app.get("/api/health/ready", None).await;
    assert_eq!(ready.status, StatusCode::INTERNAL_SERVER_ERROR);

    let res = app.sign_in("a@x.com", "pw12345678").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["message"], "Internal server error");

    // Sign-out still clears the cookie.
    let res = app.sign_out(Some("some-token")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.set_cookie().unwrap().contains("Max-Age=0"));
}
