//! `ClientInfo` extractor: best-effort client address and user agent.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;

use gatehouse_auth::ClientMetadata;

/// Diagnostic metadata about the caller. Never used for authorization.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo(pub ClientMetadata);

impl ClientInfo {
    /// Unwrap into the metadata stored with a session.
    pub fn into_metadata(self) -> ClientMetadata {
        self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientInfo {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // First hop of X-Forwarded-For, else the socket peer.
        let client_ip = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            });

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(ClientInfo(ClientMetadata {
            client_ip,
            user_agent,
        }))
    }
}
