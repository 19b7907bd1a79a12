//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use gatehouse_auth::AuthService;
use gatehouse_core::config::AppConfig;
use gatehouse_core::result::AppResult;
use gatehouse_database::StoreProvider;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState<P>>`.
#[derive(Debug, Clone)]
pub struct AppState<P: StoreProvider> {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Source of request-scoped store handles.
    pub store: P,
    /// Registration, sign-in, and session lifecycle.
    pub auth: Arc<AuthService>,
}

impl<P: StoreProvider> AppState<P> {
    /// Build the state, constructing the auth service from configuration.
    pub fn new(config: AppConfig, store: P) -> AppResult<Self> {
        let auth = AuthService::new(&config.auth, &config.session)?;
        Ok(Self {
            config: Arc::new(config),
            store,
            auth: Arc::new(auth),
        })
    }
}
