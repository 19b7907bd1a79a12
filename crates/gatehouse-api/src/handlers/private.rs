//! Example protected route.

use axum::Json;

use crate::dto::response::PrivateResponse;
use crate::extractors::RequireSession;

/// GET /api/private
pub async fn private(RequireSession(session): RequireSession) -> Json<PrivateResponse> {
    Json(PrivateResponse {
        message: "This is private".to_string(),
        identity: session.identity,
    })
}
