//! Route definitions for the Gatehouse HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use gatehouse_database::StoreProvider;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router<P: StoreProvider>(state: AppState<P>) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes::<P>())
        .merge(private_routes::<P>())
        .merge(health_routes::<P>());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Sign-up, sign-in, sign-out, and session lookup
fn auth_routes<P: StoreProvider>() -> Router<AppState<P>> {
    Router::new()
        .route("/auth/sign-up", post(handlers::auth::sign_up::<P>))
        .route("/auth/sign-in", post(handlers::auth::sign_in::<P>))
        .route("/auth/sign-out", post(handlers::auth::sign_out::<P>))
        .route("/auth/session", get(handlers::auth::get_session))
}

/// Routes that require a live session
fn private_routes<P: StoreProvider>() -> Router<AppState<P>> {
    Router::new().route("/private", get(handlers::private::private))
}

/// Health check endpoints (no auth required)
fn health_routes<P: StoreProvider>() -> Router<AppState<P>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness::<P>))
}

/// Allow the configured frontend origin, with credentials so the session
/// cookie is sent on cross-origin requests.
fn build_cors_layer<P: StoreProvider>(state: &AppState<P>) -> CorsLayer {
    let origin = &state.config.server.frontend_origin;
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    match origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            warn!(origin = %origin, error = %e, "Invalid frontend origin, cross-origin requests disabled");
            cors
        }
    }
}
