//! Session repository implementation.

use sqlx::PgConnection;

use gatehouse_core::error::{AppError, ConflictTarget, ErrorKind};
use gatehouse_core::result::AppResult;
use gatehouse_core::types::SessionId;
use gatehouse_entity::{NewSession, ResolvedSession};

use super::map_insert_error;

/// Queries against the `sessions` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionRepository;

impl SessionRepository {
    /// Insert a new session.
    pub async fn create(conn: &mut PgConnection, data: &NewSession) -> AppResult<SessionId> {
        sqlx::query_scalar::<_, SessionId>(
            "INSERT INTO sessions \
             (id, token, identity_id, expires_at, created_at, updated_at, client_ip, user_agent) \
             VALUES ($1, $2, $3, $4, NOW(), NOW(), $5, $6) \
             RETURNING id",
        )
        .bind(data.id)
        .bind(data.token.as_str())
        .bind(data.identity_id)
        .bind(data.expires_at)
        .bind(data.client_ip.as_deref())
        .bind(data.user_agent.as_deref())
        .fetch_one(conn)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                "sessions_token_key",
                ConflictTarget::SessionToken,
                "Failed to create session",
            )
        })
    }

    /// Find a live session by token, joined with its identity.
    pub async fn find_live_by_token(
        conn: &mut PgConnection,
        token: &str,
    ) -> AppResult<Option<ResolvedSession>> {
        sqlx::query_as::<_, ResolvedSession>(
            "SELECT s.id AS session_id, s.expires_at, i.id, i.name, i.email \
             FROM sessions s \
             JOIN identities i ON i.id = s.identity_id \
             WHERE s.token = $1 AND s.expires_at > NOW()",
        )
        .bind(token)
        .fetch_optional(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find session by token", e)
        })
    }

    /// Delete a session by token. Returns whether a row was removed.
    pub async fn delete_by_token(conn: &mut PgConnection, token: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete session", e))?;
        Ok(result.rows_affected() > 0)
    }
}
