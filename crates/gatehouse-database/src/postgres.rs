//! PostgreSQL implementation of the store seams.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::debug;

use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::result::AppResult;
use gatehouse_core::types::{CredentialId, IdentityId, SessionId};
use gatehouse_entity::{
    CredentialLookup, CredentialProvider, NewCredential, NewIdentity, NewSession, ResolvedSession,
};

use crate::connection::DatabasePool;
use crate::repositories::{CredentialRepository, IdentityRepository, SessionRepository};
use crate::store::{IdentityStore, SessionStore, StoreHandle, StoreProvider, StoreScope};

/// Pool-backed [`StoreProvider`].
#[derive(Debug, Clone)]
pub struct PgStore {
    db: DatabasePool,
}

impl PgStore {
    /// Create a store over an existing pool.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StoreProvider for PgStore {
    type Handle = PgHandle;

    async fn acquire(&self) -> AppResult<PgHandle> {
        let pool = self.db.pool().clone();
        let conn = pool.acquire().await.map_err(acquire_error)?;
        Ok(PgHandle {
            pool,
            conn: Some(conn),
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.db.health_check().await
    }
}

fn acquire_error(e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, "Failed to acquire connection", e)
}

/// A request-scoped handle holding at most one pooled connection.
///
/// The connection is released while a transaction is open, so a request
/// never occupies two pool slots.
pub struct PgHandle {
    pool: PgPool,
    conn: Option<PoolConnection<Postgres>>,
}

impl PgHandle {
    async fn connection(&mut self) -> AppResult<&mut PgConnection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.pool.acquire().await.map_err(acquire_error)?,
        };
        Ok(&mut **self.conn.insert(conn))
    }
}

/// An open transaction. Rolled back by sqlx when dropped uncommitted.
pub struct PgScope {
    tx: Transaction<'static, Postgres>,
}

impl PgScope {
    async fn connection(&mut self) -> AppResult<&mut PgConnection> {
        Ok(&mut *self.tx)
    }
}

#[async_trait]
impl StoreHandle for PgHandle {
    type Scope = PgScope;

    async fn begin(&mut self) -> AppResult<PgScope> {
        self.conn = None;
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        Ok(PgScope { tx })
    }
}

#[async_trait]
impl StoreScope for PgScope {
    async fn commit(self) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}

/// Implement both store traits for a type with an async `connection()`
/// by delegating to the repositories.
macro_rules! impl_pg_stores {
    ($ty:ty) => {
        #[async_trait]
        impl IdentityStore for $ty {
            async fn create_identity(&mut self, identity: &NewIdentity) -> AppResult<IdentityId> {
                IdentityRepository::create(self.connection().await?, identity).await
            }

            async fn create_credential(
                &mut self,
                credential: &NewCredential,
            ) -> AppResult<CredentialId> {
                CredentialRepository::create(self.connection().await?, credential).await
            }

            async fn find_credential_by_account(
                &mut self,
                account_identifier: &str,
            ) -> AppResult<Option<CredentialLookup>> {
                CredentialRepository::find_by_account(
                    self.connection().await?,
                    CredentialProvider::Email,
                    account_identifier,
                )
                .await
            }
        }

        #[async_trait]
        impl SessionStore for $ty {
            async fn create_session(&mut self, session: &NewSession) -> AppResult<SessionId> {
                SessionRepository::create(self.connection().await?, session).await
            }

            async fn resolve_session(&mut self, token: &str) -> AppResult<Option<ResolvedSession>> {
                SessionRepository::find_live_by_token(self.connection().await?, token).await
            }

            async fn delete_session(&mut self, token: &str) -> AppResult<()> {
                let removed =
                    SessionRepository::delete_by_token(self.connection().await?, token).await?;
                debug!(removed, "Session delete executed");
                Ok(())
            }
        }
    };
}

impl_pg_stores!(PgHandle);
impl_pg_stores!(PgScope);
