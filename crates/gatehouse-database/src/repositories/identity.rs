//! Identity repository implementation.

use sqlx::PgConnection;

use gatehouse_core::error::ConflictTarget;
use gatehouse_core::result::AppResult;
use gatehouse_core::types::IdentityId;
use gatehouse_entity::NewIdentity;

use super::map_insert_error;

/// Queries against the `identities` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRepository;

impl IdentityRepository {
    /// Insert a new identity.
    pub async fn create(conn: &mut PgConnection, data: &NewIdentity) -> AppResult<IdentityId> {
        sqlx::query_scalar::<_, IdentityId>(
            "INSERT INTO identities (id, name, email, email_verified, created_at, updated_at) \
             VALUES ($1, $2, $3, FALSE, NOW(), NOW()) \
             RETURNING id",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.email)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                "identities_email_key",
                ConflictTarget::Email,
                "Failed to create identity",
            )
        })
    }
}
