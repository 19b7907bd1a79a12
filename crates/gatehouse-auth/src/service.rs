//! Registration, authentication, and session lifecycle.
//!
//! [`AuthService`] holds no per-request state. Each operation runs against
//! the store handle the caller passes in, and all coordination between
//! concurrent requests is left to the store's uniqueness constraints.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};

use gatehouse_core::config::{AuthConfig, MAX_TTL_HOURS, SessionConfig};
use gatehouse_core::error::{AppError, ConflictTarget};
use gatehouse_core::result::AppResult;
use gatehouse_core::types::{IdentityId, SessionId};
use gatehouse_database::store::{IdentityStore, SessionStore, StoreHandle, StoreScope};
use gatehouse_entity::{
    CredentialProvider, IdentityPublic, NewCredential, NewIdentity, NewSession, ResolvedSession,
    SessionToken,
};

use crate::password::{PasswordHasher, PasswordValidator};
use crate::token::TokenGenerator;

/// How many fresh tokens `establish_session` tries before giving up.
pub const MAX_TOKEN_ATTEMPTS: u32 = 3;

/// Best-effort request metadata stored with a session for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMetadata {
    /// Originating network address.
    pub client_ip: Option<String>,
    /// Raw `User-Agent` header.
    pub user_agent: Option<String>,
}

/// A freshly persisted session. The only place the raw token exists
/// server-side outside the session row.
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub session_id: SessionId,
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
}

/// A session issued by sign-up or sign-in, with the identity it belongs to.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session_id: SessionId,
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
    pub identity: IdentityPublic,
}

impl IssuedSession {
    fn new(grant: SessionGrant, identity: IdentityPublic) -> Self {
        Self {
            session_id: grant.session_id,
            token: grant.token,
            expires_at: grant.expires_at,
            identity,
        }
    }
}

/// Orchestrates identities, credentials, and sessions.
#[derive(Debug, Clone)]
pub struct AuthService {
    hasher: Arc<PasswordHasher>,
    validator: PasswordValidator,
    tokens: TokenGenerator,
    name_min_length: usize,
    session_ttl: TimeDelta,
}

impl AuthService {
    /// Build the service from configuration.
    pub fn new(auth: &AuthConfig, session: &SessionConfig) -> AppResult<Self> {
        let hasher = PasswordHasher::new(&auth.hash)?;
        Self::with_hasher(Arc::new(hasher), auth, session)
    }

    /// Build the service around an existing hasher.
    pub fn with_hasher(
        hasher: Arc<PasswordHasher>,
        auth: &AuthConfig,
        session: &SessionConfig,
    ) -> AppResult<Self> {
        let session_ttl = Some(session.ttl_hours)
            .filter(|hours| (1..=MAX_TTL_HOURS).contains(hours))
            .and_then(|hours| i64::try_from(hours).ok())
            .and_then(TimeDelta::try_hours)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "session.ttl_hours must be between 1 and {MAX_TTL_HOURS}"
                ))
            })?;

        Ok(Self {
            hasher,
            validator: PasswordValidator::new(auth),
            tokens: TokenGenerator::new(),
            name_min_length: auth.name_min_length,
            session_ttl,
        })
    }

    /// Register a new identity with an email credential and sign it in.
    ///
    /// The identity and credential are written in one transaction. Fails with
    /// `Conflict(Email)` or `Conflict(Account)` and leaves no rows behind.
    pub async fn register<H: StoreHandle>(
        &self,
        store: &mut H,
        email: &str,
        name: &str,
        password: &str,
        client: ClientMetadata,
    ) -> AppResult<IssuedSession> {
        let name = name.trim();
        if email.trim().is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        if name.chars().count() < self.name_min_length {
            return Err(AppError::validation(format!(
                "Name must be at least {} characters long",
                self.name_min_length
            )));
        }
        self.validator.validate(password)?;

        let password_hash = self.hash_password(password).await?;

        let identity = IdentityPublic {
            id: self.tokens.new_id(),
            name: name.to_string(),
            email: email.to_string(),
        };

        let mut scope = store.begin().await?;
        scope
            .create_identity(&NewIdentity {
                id: identity.id,
                name: identity.name.clone(),
                email: identity.email.clone(),
            })
            .await?;
        scope
            .create_credential(&NewCredential {
                id: self.tokens.new_id(),
                identity_id: identity.id,
                account_identifier: identity.email.clone(),
                provider: CredentialProvider::Email,
                password_hash: Some(password_hash),
            })
            .await?;
        scope.commit().await?;

        info!(identity_id = %identity.id, "Identity registered");

        let grant = self.establish_session(store, identity.id, client).await?;
        Ok(IssuedSession::new(grant, identity))
    }

    /// Check an email and password pair.
    ///
    /// An unknown account, a credential without a password, and a wrong
    /// password all fail with the same `InvalidCredentials` error.
    ///
    /// An unknown account returns before any hashing work, so it answers
    /// measurably faster than a wrong password.
    pub async fn authenticate<S: IdentityStore + ?Sized>(
        &self,
        store: &mut S,
        email: &str,
        password: &str,
    ) -> AppResult<IdentityPublic> {
        let Some(lookup) = store.find_credential_by_account(email).await? else {
            debug!("Sign-in rejected: no credential for account");
            return Err(AppError::invalid_credentials());
        };

        let Some(hash) = lookup.usable_password_hash() else {
            debug!(credential_id = %lookup.credential_id, "Sign-in rejected: credential has no password");
            return Err(AppError::invalid_credentials());
        };

        if !self.verify_password(password, hash).await? {
            debug!(identity_id = %lookup.identity.id, "Sign-in rejected: password mismatch");
            return Err(AppError::invalid_credentials());
        }

        Ok(lookup.identity)
    }

    /// Authenticate and open a session in one step.
    pub async fn sign_in<H: IdentityStore + SessionStore + ?Sized>(
        &self,
        store: &mut H,
        email: &str,
        password: &str,
        client: ClientMetadata,
    ) -> AppResult<IssuedSession> {
        let identity = self.authenticate(store, email, password).await?;
        let grant = self.establish_session(store, identity.id, client).await?;
        info!(identity_id = %identity.id, session_id = %grant.session_id, "Signed in");
        Ok(IssuedSession::new(grant, identity))
    }

    /// Persist a new session for an identity.
    ///
    /// A token collision is retried with a fresh token up to
    /// [`MAX_TOKEN_ATTEMPTS`] times.
    pub async fn establish_session<S: SessionStore + ?Sized>(
        &self,
        store: &mut S,
        identity_id: IdentityId,
        client: ClientMetadata,
    ) -> AppResult<SessionGrant> {
        let mut attempt = 1;
        loop {
            let token = self.tokens.new_token();
            let expires_at = Utc::now()
                .checked_add_signed(self.session_ttl)
                .ok_or_else(|| AppError::configuration("Session expiry is out of range"))?;
            let session = NewSession {
                id: self.tokens.new_id(),
                token: token.clone(),
                identity_id,
                expires_at,
                client_ip: client.client_ip.clone(),
                user_agent: client.user_agent.clone(),
            };

            match store.create_session(&session).await {
                Ok(session_id) => {
                    debug!(%identity_id, %session_id, %expires_at, "Session established");
                    return Ok(SessionGrant {
                        session_id,
                        token,
                        expires_at,
                    });
                }
                Err(e)
                    if e.conflict_target() == Some(ConflictTarget::SessionToken)
                        && attempt < MAX_TOKEN_ATTEMPTS =>
                {
                    warn!(%identity_id, attempt, "Session token collision, regenerating");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Resolve a presented token to its live session.
    ///
    /// A missing or empty token returns `None` without touching the store.
    pub async fn resolve_session<S: SessionStore + ?Sized>(
        &self,
        store: &mut S,
        token: Option<&str>,
    ) -> AppResult<Option<ResolvedSession>> {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => store.resolve_session(token).await,
            None => Ok(None),
        }
    }

    /// Delete the session behind a token. Always succeeds for unknown tokens.
    pub async fn end_session<S: SessionStore + ?Sized>(
        &self,
        store: &mut S,
        token: Option<&str>,
    ) -> AppResult<()> {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            store.delete_session(token).await?;
            debug!("Session ended");
        }
        Ok(())
    }

    async fn hash_password(&self, password: &str) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
    }
}
