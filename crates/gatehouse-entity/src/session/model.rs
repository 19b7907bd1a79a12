//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gatehouse_core::types::{IdentityId, SessionId};

use super::token::SessionToken;
use crate::identity::IdentityPublic;

/// A live login.
///
/// Sessions are created on sign-up or sign-in and removed on sign-out.
/// Expired rows are never purged here; they are filtered out at lookup time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier. Safe to reference.
    pub id: SessionId,
    /// Secret bearer token.
    #[serde(skip_serializing)]
    pub token: String,
    /// The identity this session belongs to.
    pub identity_id: IdentityId,
    /// Absolute expiry. Never extended.
    pub expires_at: DateTime<Utc>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session was last updated.
    pub updated_at: DateTime<Utc>,
    /// Originating client address. Diagnostics only.
    pub client_ip: Option<String>,
    /// Client User-Agent header. Diagnostics only.
    pub user_agent: Option<String>,
}

impl Session {
    /// Whether the session is still live at `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Data required to insert a new session.
#[derive(Debug, Clone)]
pub struct NewSession {
    /// Pre-generated identifier.
    pub id: SessionId,
    /// Freshly generated bearer token.
    pub token: SessionToken,
    /// Owning identity.
    pub identity_id: IdentityId,
    /// Absolute expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Best-effort client address.
    pub client_ip: Option<String>,
    /// Best-effort client User-Agent.
    pub user_agent: Option<String>,
}

/// A live session joined with its identity's public fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ResolvedSession {
    /// The session row identifier.
    pub session_id: SessionId,
    /// Absolute expiry instant.
    pub expires_at: DateTime<Utc>,
    /// The identity the session resolves to.
    #[sqlx(flatten)]
    pub identity: IdentityPublic,
}
