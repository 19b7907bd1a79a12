//! In-process implementation of the store seams.
//!
//! Mirrors the PostgreSQL schema closely enough to stand in for it in tests
//! and local development: the same uniqueness constraints raise the same
//! conflicts, credentials and sessions must reference an existing identity,
//! and session expiry is compared against this store's own clock.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use gatehouse_core::error::{AppError, ConflictTarget};
use gatehouse_core::result::AppResult;
use gatehouse_core::types::{CredentialId, IdentityId, SessionId};
use gatehouse_entity::{
    Credential, CredentialLookup, CredentialProvider, Identity, NewCredential, NewIdentity,
    NewSession, ResolvedSession, Session,
};

use crate::store::{IdentityStore, SessionStore, StoreHandle, StoreProvider, StoreScope};

/// Row storage shared by every handle of one [`MemoryStore`].
#[derive(Debug, Clone, Default)]
struct MemoryState {
    identities: HashMap<IdentityId, Identity>,
    credentials: HashMap<CredentialId, Credential>,
    /// Keyed by token, the column sessions are looked up by.
    sessions: HashMap<String, Session>,
}

impl MemoryState {
    fn create_identity(&mut self, data: &NewIdentity) -> AppResult<IdentityId> {
        if self.identities.values().any(|i| i.email == data.email) {
            return Err(AppError::conflict(ConflictTarget::Email));
        }
        if self.identities.contains_key(&data.id) {
            return Err(AppError::database("Duplicate identity id"));
        }

        let now = Utc::now();
        self.identities.insert(
            data.id,
            Identity {
                id: data.id,
                name: data.name.clone(),
                email: data.email.clone(),
                email_verified: false,
                image: None,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(data.id)
    }

    fn create_credential(&mut self, data: &NewCredential) -> AppResult<CredentialId> {
        let provider = data.provider.as_str();
        if self
            .credentials
            .values()
            .any(|c| c.provider == provider && c.account_identifier == data.account_identifier)
        {
            return Err(AppError::conflict(ConflictTarget::Account));
        }
        if !self.identities.contains_key(&data.identity_id) {
            return Err(AppError::database(
                "Credential references a missing identity",
            ));
        }
        if self.credentials.contains_key(&data.id) {
            return Err(AppError::database("Duplicate credential id"));
        }

        let now = Utc::now();
        self.credentials.insert(
            data.id,
            Credential {
                id: data.id,
                account_identifier: data.account_identifier.clone(),
                provider: provider.to_string(),
                identity_id: data.identity_id,
                password_hash: data.password_hash.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(data.id)
    }

    fn find_credential_by_account(&self, account_identifier: &str) -> Option<CredentialLookup> {
        let provider = CredentialProvider::Email.as_str();
        let credential = self
            .credentials
            .values()
            .find(|c| c.provider == provider && c.account_identifier == account_identifier)?;
        let identity = self.identities.get(&credential.identity_id)?;

        Some(CredentialLookup {
            credential_id: credential.id,
            password_hash: credential.password_hash.clone(),
            identity: identity.to_public(),
        })
    }

    fn create_session(&mut self, data: &NewSession) -> AppResult<SessionId> {
        if self.sessions.contains_key(data.token.as_str()) {
            return Err(AppError::conflict(ConflictTarget::SessionToken));
        }
        if !self.identities.contains_key(&data.identity_id) {
            return Err(AppError::database("Session references a missing identity"));
        }
        if self.sessions.values().any(|s| s.id == data.id) {
            return Err(AppError::database("Duplicate session id"));
        }

        let now = Utc::now();
        self.sessions.insert(
            data.token.as_str().to_string(),
            Session {
                id: data.id,
                token: data.token.as_str().to_string(),
                identity_id: data.identity_id,
                expires_at: data.expires_at,
                created_at: now,
                updated_at: now,
                client_ip: data.client_ip.clone(),
                user_agent: data.user_agent.clone(),
            },
        );
        Ok(data.id)
    }

    fn resolve_session(&self, token: &str) -> Option<ResolvedSession> {
        let session = self.sessions.get(token)?;
        if !session.is_live_at(Utc::now()) {
            return None;
        }
        let identity = self.identities.get(&session.identity_id)?;

        Some(ResolvedSession {
            session_id: session.id,
            expires_at: session.expires_at,
            identity: identity.to_public(),
        })
    }

    fn delete_session(&mut self, token: &str) {
        self.sessions.remove(token);
    }
}

/// Shared in-memory [`StoreProvider`]. Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle directly, bypassing availability checks.
    pub fn handle(&self) -> MemoryHandle {
        MemoryHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// Simulate an outage: `acquire` fails and `health_check` reports false.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored identities.
    pub async fn identity_count(&self) -> usize {
        self.state.lock().await.identities.len()
    }

    /// Number of stored credentials.
    pub async fn credential_count(&self) -> usize {
        self.state.lock().await.credentials.len()
    }

    /// Number of stored session rows, expired ones included.
    pub async fn session_count(&self) -> usize {
        self.state.lock().await.sessions.len()
    }

    /// The stored session row for a token, expired or not.
    pub async fn session_row(&self, token: &str) -> Option<Session> {
        self.state.lock().await.sessions.get(token).cloned()
    }
}

#[async_trait]
impl StoreProvider for MemoryStore {
    type Handle = MemoryHandle;

    async fn acquire(&self) -> AppResult<MemoryHandle> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::database("Memory store is unavailable"));
        }
        Ok(self.handle())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.unavailable.load(Ordering::SeqCst))
    }
}

/// A handle on a [`MemoryStore`]. Each call locks the store for its duration.
#[derive(Debug)]
pub struct MemoryHandle {
    state: Arc<Mutex<MemoryState>>,
}

#[async_trait]
impl IdentityStore for MemoryHandle {
    async fn create_identity(&mut self, identity: &NewIdentity) -> AppResult<IdentityId> {
        self.state.lock().await.create_identity(identity)
    }

    async fn create_credential(&mut self, credential: &NewCredential) -> AppResult<CredentialId> {
        self.state.lock().await.create_credential(credential)
    }

    async fn find_credential_by_account(
        &mut self,
        account_identifier: &str,
    ) -> AppResult<Option<CredentialLookup>> {
        Ok(self
            .state
            .lock()
            .await
            .find_credential_by_account(account_identifier))
    }
}

#[async_trait]
impl SessionStore for MemoryHandle {
    async fn create_session(&mut self, session: &NewSession) -> AppResult<SessionId> {
        self.state.lock().await.create_session(session)
    }

    async fn resolve_session(&mut self, token: &str) -> AppResult<Option<ResolvedSession>> {
        Ok(self.state.lock().await.resolve_session(token))
    }

    async fn delete_session(&mut self, token: &str) -> AppResult<()> {
        self.state.lock().await.delete_session(token);
        Ok(())
    }
}

#[async_trait]
impl StoreHandle for MemoryHandle {
    type Scope = MemoryScope;

    async fn begin(&mut self) -> AppResult<MemoryScope> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let snapshot = guard.clone();
        Ok(MemoryScope {
            guard,
            snapshot: Some(snapshot),
        })
    }
}

/// A transaction over a [`MemoryStore`].
///
/// Holds the store lock for its whole lifetime, so scopes are serialized.
/// Dropping without [`StoreScope::commit`] restores the snapshot taken at
/// `begin`.
pub struct MemoryScope {
    guard: OwnedMutexGuard<MemoryState>,
    snapshot: Option<MemoryState>,
}

impl Drop for MemoryScope {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.guard = snapshot;
        }
    }
}

#[async_trait]
impl IdentityStore for MemoryScope {
    async fn create_identity(&mut self, identity: &NewIdentity) -> AppResult<IdentityId> {
        self.guard.create_identity(identity)
    }

    async fn create_credential(&mut self, credential: &NewCredential) -> AppResult<CredentialId> {
        self.guard.create_credential(credential)
    }

    async fn find_credential_by_account(
        &mut self,
        account_identifier: &str,
    ) -> AppResult<Option<CredentialLookup>> {
        Ok(self.guard.find_credential_by_account(account_identifier))
    }
}

#[async_trait]
impl SessionStore for MemoryScope {
    async fn create_session(&mut self, session: &NewSession) -> AppResult<SessionId> {
        self.guard.create_session(session)
    }

    async fn resolve_session(&mut self, token: &str) -> AppResult<Option<ResolvedSession>> {
        Ok(self.guard.resolve_session(token))
    }

    async fn delete_session(&mut self, token: &str) -> AppResult<()> {
        self.guard.delete_session(token);
        Ok(())
    }
}

#[async_trait]
impl StoreScope for MemoryScope {
    async fn commit(mut self) -> AppResult<()> {
        self.snapshot = None;
        Ok(())
    }
}
