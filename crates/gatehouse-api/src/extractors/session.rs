//! Session extractors.
//!
//! [`SessionCookie`] only reads the cookie. [`CurrentSession`] resolves it
//! against the store and treats "no session" as a normal outcome.
//! [`RequireSession`] rejects with 401 instead.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gatehouse_core::error::AppError;
use gatehouse_database::StoreProvider;
use gatehouse_entity::ResolvedSession;

use crate::cookie;
use crate::error::ApiError;
use crate::state::AppState;

/// The raw session token presented by the client, if any.
#[derive(Clone, Default)]
pub struct SessionCookie(pub Option<String>);

impl std::fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = self.0.as_ref().map(|_| "****");
        f.debug_tuple("SessionCookie").field(&shown).finish()
    }
}

impl SessionCookie {
    /// Borrow the token.
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<P: StoreProvider> FromRequestParts<AppState<P>> for SessionCookie {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<P>,
    ) -> Result<Self, Self::Rejection> {
        Ok(SessionCookie(cookie::session_token(
            &parts.headers,
            &state.config.session.cookie_name,
        )))
    }
}

/// The live session behind the request's cookie, or `None`.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<ResolvedSession>);

impl<P: StoreProvider> FromRequestParts<AppState<P>> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<P>,
    ) -> Result<Self, Self::Rejection> {
        let SessionCookie(token) = SessionCookie::from_request_parts(parts, state).await?;
        let Some(token) = token else {
            return Ok(CurrentSession(None));
        };

        let mut handle = state.store.acquire().await?;
        let session = state
            .auth
            .resolve_session(&mut handle, Some(token.as_str()))
            .await?;
        Ok(CurrentSession(session))
    }
}

/// A live session, or a 401 rejection.
#[derive(Debug, Clone)]
pub struct RequireSession(pub ResolvedSession);

impl<P: StoreProvider> FromRequestParts<AppState<P>> for RequireSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<P>,
    ) -> Result<Self, Self::Rejection> {
        match CurrentSession::from_request_parts(parts, state).await? {
            CurrentSession(Some(session)) => Ok(RequireSession(session)),
            CurrentSession(None) => Err(AppError::unauthenticated().into()),
        }
    }
}
