//! Health check handlers.

use axum::Json;
use axum::extract::State;

use gatehouse_core::error::AppError;
use gatehouse_database::StoreProvider;

use crate::dto::response::HealthResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/ready
pub async fn readiness<P: StoreProvider>(
    State(state): State<AppState<P>>,
) -> ApiResult<Json<HealthResponse>> {
    if !state.store.health_check().await? {
        return Err(AppError::database("Store health check failed").into());
    }

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
