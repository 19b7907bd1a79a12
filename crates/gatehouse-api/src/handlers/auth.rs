//! Auth handlers: sign-up, sign-in, sign-out, current session.

use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use tracing::error;

use gatehouse_auth::IssuedSession;
use gatehouse_database::StoreProvider;

use crate::cookie;
use crate::dto::request::{SignInRequest, SignUpRequest, validate_request};
use crate::dto::response::{SessionResponse, StatusResponse};
use crate::error::ApiResult;
use crate::extractors::{ClientInfo, CurrentSession, SessionCookie};
use crate::state::AppState;

/// POST /api/auth/sign-up
pub async fn sign_up<P: StoreProvider>(
    State(state): State<AppState<P>>,
    ClientInfo(client): ClientInfo,
    Json(req): Json<SignUpRequest>,
) -> ApiResult<Response> {
    validate_request(&req)?;

    let mut handle = state.store.acquire().await?;
    let issued = state
        .auth
        .register(&mut handle, &req.email, &req.name, &req.password, client)
        .await?;

    issue(&state, issued)
}

/// POST /api/auth/sign-in
pub async fn sign_in<P: StoreProvider>(
    State(state): State<AppState<P>>,
    ClientInfo(client): ClientInfo,
    Json(req): Json<SignInRequest>,
) -> ApiResult<Response> {
    validate_request(&req)?;

    let mut handle = state.store.acquire().await?;
    let issued = state
        .auth
        .sign_in(&mut handle, &req.email, &req.password, client)
        .await?;

    issue(&state, issued)
}

/// POST /api/auth/sign-out
///
/// Always clears the cookie, even when the session row could not be removed.
pub async fn sign_out<P: StoreProvider>(
    State(state): State<AppState<P>>,
    session: SessionCookie,
) -> ApiResult<Response> {
    if session.token().is_some() {
        let result = match state.store.acquire().await {
            Ok(mut handle) => state.auth.end_session(&mut handle, session.token()).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            error!(error = %e, "Failed to delete session on sign-out");
        }
    }

    let clear = cookie::clear_session_cookie(&state.config.session)?;
    Ok((
        [(SET_COOKIE, clear)],
        Json(StatusResponse::new("signed_out")),
    )
        .into_response())
}

/// GET /api/auth/session
///
/// Responds with JSON `null` when there is no live session.
pub async fn get_session(
    CurrentSession(session): CurrentSession,
) -> Json<Option<SessionResponse>> {
    Json(session.map(SessionResponse::from))
}

fn issue<P: StoreProvider>(state: &AppState<P>, issued: IssuedSession) -> ApiResult<Response> {
    let set_cookie = cookie::session_cookie(&state.config.session, issued.token.as_str())?;
    Ok(([(SET_COOKIE, set_cookie)], Json(SessionResponse::from(issued))).into_response())
}
