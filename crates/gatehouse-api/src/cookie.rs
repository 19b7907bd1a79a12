//! Session cookie adapter.
//!
//! The cookie carries the raw session token. It is `HttpOnly`,
//! `SameSite=Lax`, scoped to `/`, lives for the session TTL, and is
//! `Secure` unless insecure cookies are explicitly allowed.

use axum::http::{HeaderMap, HeaderValue};
use axum_extra::extract::cookie::CookieJar;

use gatehouse_core::config::SessionConfig;
use gatehouse_core::error::AppError;

/// Build the `Set-Cookie` value that stores a session token.
pub fn session_cookie(config: &SessionConfig, token: &str) -> Result<HeaderValue, AppError> {
    let cookie = format!(
        "{}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.cookie_name,
        config.ttl_seconds()
    );
    finish(config, cookie)
}

/// Build the `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(config: &SessionConfig) -> Result<HeaderValue, AppError> {
    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config.cookie_name
    );
    finish(config, cookie)
}

fn finish(config: &SessionConfig, mut cookie: String) -> Result<HeaderValue, AppError> {
    if !config.allow_insecure_cookies {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::internal(format!("Invalid session cookie: {e}")))
}

/// Read the session token from the request's `Cookie` headers.
///
/// An empty cookie value counts as absent.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn test_session_cookie_attributes() {
        let config = SessionConfig::default();
        let value = session_cookie(&config, "abc_DEF-123").unwrap();
        let value = value.to_str().unwrap();

        assert!(value.starts_with("session_token=abc_DEF-123;"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Max-Age=604800"));
        assert!(value.ends_with("; Secure"));
    }

    #[test]
    fn test_insecure_override_drops_secure() {
        let config = SessionConfig {
            allow_insecure_cookies: true,
            ..SessionConfig::default()
        };
        let value = session_cookie(&config, "abc").unwrap();
        assert!(!value.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let config = SessionConfig {
            cookie_name: "sid".to_string(),
            ..SessionConfig::default()
        };
        let value = clear_session_cookie(&config).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("sid=;"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("Max-Age=0"));
    }

    #[test]
    fn test_session_token_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session_token=tok123"),
        );
        assert_eq!(
            session_token(&headers, "session_token").as_deref(),
            Some("tok123")
        );
        assert_eq!(session_token(&headers, "other"), None);

        let mut empty = HeaderMap::new();
        empty.insert(COOKIE, HeaderValue::from_static("session_token="));
        assert_eq!(session_token(&empty, "session_token"), None);
    }
}
