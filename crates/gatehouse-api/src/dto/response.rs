//! Response DTOs.

use serde::{Deserialize, Serialize};

use gatehouse_auth::IssuedSession;
use gatehouse_core::types::SessionId;
use gatehouse_entity::{IdentityPublic, ResolvedSession};

/// A session as seen by the client. The token itself travels only in the cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: SessionId,
    pub identity: IdentityPublic,
}

impl From<IssuedSession> for SessionResponse {
    fn from(issued: IssuedSession) -> Self {
        Self {
            session_id: issued.session_id,
            identity: issued.identity,
        }
    }
}

impl From<ResolvedSession> for SessionResponse {
    fn from(resolved: ResolvedSession) -> Self {
        Self {
            session_id: resolved.session_id,
            identity: resolved.identity,
        }
    }
}

/// Simple status body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Body of the protected example route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateResponse {
    pub message: String,
    pub identity: IdentityPublic,
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
