//! Store seams the auth service is written against.
//!
//! A [`StoreProvider`] hands out request-scoped [`StoreHandle`]s. A handle
//! can run single statements directly or open a [`StoreScope`], inside
//! which several writes either all commit or all roll back. Dropping a
//! scope without calling [`StoreScope::commit`] rolls it back.
//!
//! Implementations classify their own failures: a violated uniqueness
//! constraint surfaces as `ErrorKind::Conflict` with the matching
//! `ConflictTarget`, everything else as `ErrorKind::Database`.

use async_trait::async_trait;

use gatehouse_core::result::AppResult;
use gatehouse_core::types::{CredentialId, IdentityId, SessionId};
use gatehouse_entity::{CredentialLookup, NewCredential, NewIdentity, NewSession, ResolvedSession};

/// Identity and credential persistence.
#[async_trait]
pub trait IdentityStore: Send {
    /// Insert an identity. Fails with `Conflict(Email)` when the email is taken.
    async fn create_identity(&mut self, identity: &NewIdentity) -> AppResult<IdentityId>;

    /// Insert a credential. Fails with `Conflict(Account)` when the
    /// provider and account identifier pair already exists.
    async fn create_credential(&mut self, credential: &NewCredential) -> AppResult<CredentialId>;

    /// Find the email credential for an account identifier, joined with
    /// the public fields of its identity.
    async fn find_credential_by_account(
        &mut self,
        account_identifier: &str,
    ) -> AppResult<Option<CredentialLookup>>;
}

/// Session persistence.
#[async_trait]
pub trait SessionStore: Send {
    /// Insert a session. Fails with `Conflict(SessionToken)` on a token collision.
    async fn create_session(&mut self, session: &NewSession) -> AppResult<SessionId>;

    /// Look up a live session by token. Expired sessions resolve to `None`.
    async fn resolve_session(&mut self, token: &str) -> AppResult<Option<ResolvedSession>>;

    /// Delete the session with this token. Unknown tokens are not an error.
    async fn delete_session(&mut self, token: &str) -> AppResult<()>;
}

/// A transaction over both stores.
#[async_trait]
pub trait StoreScope: IdentityStore + SessionStore + Sized {
    /// Make every write in this scope durable.
    async fn commit(self) -> AppResult<()>;
}

/// A request-scoped connection to the backing store.
#[async_trait]
pub trait StoreHandle: IdentityStore + SessionStore {
    /// The transaction type opened by [`StoreHandle::begin`].
    type Scope: StoreScope + 'static;

    /// Open a transaction. The handle should not be used again until the
    /// scope is committed or dropped.
    async fn begin(&mut self) -> AppResult<Self::Scope>;
}

/// Source of request-scoped store handles, shared across the server.
#[async_trait]
pub trait StoreProvider: Clone + Send + Sync + 'static {
    /// The handle type this provider produces.
    type Handle: StoreHandle + Send + 'static;

    /// Acquire a handle for one request.
    async fn acquire(&self) -> AppResult<Self::Handle>;

    /// Whether the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
