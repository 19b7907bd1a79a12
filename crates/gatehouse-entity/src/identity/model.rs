//! Identity entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gatehouse_core::types::IdentityId;

/// A registered person, independent of how they authenticate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identity identifier.
    pub id: IdentityId,
    /// Display name.
    pub name: String,
    /// Email address. Unique, compared case-sensitively.
    pub email: String,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// Optional avatar reference.
    pub image: Option<String>,
    /// When the identity was created.
    pub created_at: DateTime<Utc>,
    /// When the identity was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Project to the fields that may be shown to clients.
    pub fn to_public(&self) -> IdentityPublic {
        IdentityPublic {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The public face of an identity: id, name, and email only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct IdentityPublic {
    /// Unique identity identifier.
    pub id: IdentityId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Data required to insert a new identity.
///
/// New identities always start unverified and without an avatar.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    /// Pre-generated identifier.
    pub id: IdentityId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}
