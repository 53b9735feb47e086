use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::AppState;
use crate::error::ApiError;

/// GET / - liveness text
pub async fn root() -> &'static str {
    "QuickFlex Admin Backend is running."
}

/// GET /health - store connectivity; 503 when the store cannot be reached
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    if let Err(e) = state.onboarding.ping().await {
        tracing::warn!("Health check failed: {}", e);
        return Err(ApiError::service_unavailable("database unavailable"));
    }

    Ok(Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "database": "ok"
        }
    })))
}
