//! Session and cookie configuration.

use serde::{Deserialize, Serialize};

/// Longest accepted session lifetime: ten years.
pub const MAX_TTL_HOURS: u64 = 24 * 366 * 10;

/// Session lifetime and cookie settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Absolute session lifetime in hours. Sessions are never extended.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Drop the `Secure` cookie attribute. Development only.
    #[serde(default)]
    pub allow_insecure_cookies: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            cookie_name: default_cookie_name(),
            allow_insecure_cookies: false,
        }
    }
}

impl SessionConfig {
    /// Session lifetime in seconds, as used for the cookie `Max-Age`.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_hours.saturating_mul(60 * 60)
    }
}

fn default_ttl_hours() -> u64 {
    24 * 7
}

fn default_cookie_name() -> String {
    "session_token".to_string()
}
