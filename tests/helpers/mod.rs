//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use gatehouse_api::{AppState, build_router};
use gatehouse_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, HashConfig, LoggingConfig, ServerConfig, SessionConfig,
};
use gatehouse_database::MemoryStore;

/// A response captured from the router.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The raw `Set-Cookie` header, if any.
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers.get(SET_COOKIE).and_then(|v| v.to_str().ok())
    }

    /// The session token carried by `Set-Cookie`, if any.
    pub fn session_token(&self) -> Option<String> {
        let cookie = self.set_cookie()?;
        let pair = cookie.split(';').next()?;
        let value = pair.strip_prefix("session_token=")?;
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// Test application context backed by the in-memory store.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The store behind the router, for direct inspection
    pub store: MemoryStore,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let state =
            AppState::new(test_config(), store.clone()).expect("Failed to build app state");

        Self {
            router: build_router(state),
            store,
        }
    }

    /// Send a request and collect the response.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// POST JSON.
    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body), &[]).await
    }

    /// GET, optionally with a session cookie.
    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        match token {
            Some(token) => {
                let cookie = format!("session_token={token}");
                self.request(Method::GET, uri, None, &[(COOKIE.as_str(), cookie.as_str())])
                    .await
            }
            None => self.request(Method::GET, uri, None, &[]).await,
        }
    }

    /// POST sign-out, optionally with a session cookie.
    pub async fn sign_out(&self, token: Option<&str>) -> TestResponse {
        match token {
            Some(token) => {
                let cookie = format!("session_token={token}");
                self.request(
                    Method::POST,
                    "/api/auth/sign-out",
                    None,
                    &[(COOKIE.as_str(), cookie.as_str())],
                )
                .await
            }
            None => {
                self.request(Method::POST, "/api/auth/sign-out", None, &[])
                    .await
            }
        }
    }

    /// Register an account and return the response.
    pub async fn sign_up(&self, email: &str, name: &str, password: &str) -> TestResponse {
        self.post(
            "/api/auth/sign-up",
            serde_json::json!({ "email": email, "name": name, "password": password }),
        )
        .await
    }

    /// Sign in and return the response.
    pub async fn sign_in(&self, email: &str, password: &str) -> TestResponse {
        self.post(
            "/api/auth/sign-in",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }
}

/// Configuration with a cheap hash so tests stay fast.
pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused/gatehouse".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
            connect_retries: 1,
            retry_delay_ms: 0,
        },
        auth: AuthConfig {
            hash: HashConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
            ..AuthConfig::default()
        },
        session: SessionConfig::default(),
        logging: LoggingConfig::default(),
    }
}
