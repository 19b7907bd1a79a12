//! Credential repository implementation.

use sqlx::PgConnection;

use gatehouse_core::error::{AppError, ConflictTarget, ErrorKind};
use gatehouse_core::result::AppResult;
use gatehouse_core::types::CredentialId;
use gatehouse_entity::{CredentialLookup, CredentialProvider, NewCredential};

use super::map_insert_error;

/// Queries against the `credentials` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialRepository;

impl CredentialRepository {
    /// Insert a new credential.
    pub async fn create(conn: &mut PgConnection, data: &NewCredential) -> AppResult<CredentialId> {
        sqlx::query_scalar::<_, CredentialId>(
            "INSERT INTO credentials \
             (id, account_identifier, provider, identity_id, password_hash, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, NOW(), NOW()) \
             RETURNING id",
        )
        .bind(data.id)
        .bind(&data.account_identifier)
        .bind(data.provider.as_str())
        .bind(data.identity_id)
        .bind(data.password_hash.as_deref())
        .fetch_one(conn)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                "credentials_provider_account_key",
                ConflictTarget::Account,
                "Failed to create credential",
            )
        })
    }

    /// Find a credential by provider and account identifier, joined with
    /// the public fields of its identity.
    pub async fn find_by_account(
        conn: &mut PgConnection,
        provider: CredentialProvider,
        account_identifier: &str,
    ) -> AppResult<Option<CredentialLookup>> {
        sqlx::query_as::<_, CredentialLookup>(
            "SELECT c.id AS credential_id, c.password_hash, i.id, i.name, i.email \
             FROM credentials c \
             JOIN identities i ON i.id = c.identity_id \
             WHERE c.provider = $1 AND c.account_identifier = $2 \
             LIMIT 1",
        )
        .bind(provider.as_str())
        .bind(account_identifier)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find credential", e))
    }
}
