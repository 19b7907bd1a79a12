//! Credential entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gatehouse_core::types::{CredentialId, IdentityId};

use super::provider::CredentialProvider;
use crate::identity::IdentityPublic;

/// One authentication method bound to an identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Unique credential identifier.
    pub id: CredentialId,
    /// External account identifier. For password credentials, the email.
    pub account_identifier: String,
    /// Provider discriminator, see [`CredentialProvider`].
    pub provider: String,
    /// The identity this credential belongs to.
    pub identity_id: IdentityId,
    /// Argon2id PHC string. Empty for non-password providers.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// When the credential was created.
    pub created_at: DateTime<Utc>,
    /// When the credential was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a new credential.
#[derive(Debug, Clone)]
pub struct NewCredential {
    /// Pre-generated identifier.
    pub id: CredentialId,
    /// Owning identity.
    pub identity_id: IdentityId,
    /// External account identifier.
    pub account_identifier: String,
    /// Provider discriminator.
    pub provider: CredentialProvider,
    /// Pre-hashed password, if the provider uses one.
    pub password_hash: Option<String>,
}

/// A password credential joined with its owner's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct CredentialLookup {
    /// The credential row identifier.
    pub credential_id: CredentialId,
    /// Stored password hash, if any.
    pub password_hash: Option<String>,
    /// The owning identity.
    #[sqlx(flatten)]
    pub identity: IdentityPublic,
}

impl CredentialLookup {
    /// The stored hash, treating an empty string the same as a missing one.
    pub fn usable_password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref().filter(|h| !h.is_empty())
    }
}
