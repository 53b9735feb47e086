use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::utils::json_body;
use super::AppState;
use crate::database::models::Driver;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::StatusUpdateRequest;

/// GET /drivers/pending - drivers awaiting review, newest registration first
pub async fn pending(State(state): State<AppState>) -> ApiResult<Vec<Driver>> {
    let drivers = state.onboarding.pending_drivers().await?;
    Ok(ApiResponse::success(drivers))
}

/// POST /drivers/update-status - body `{ "driver_id": 1, "status": "Approved" }`
pub async fn update_status(
    State(state): State<AppState>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> ApiResult<Driver> {
    let request = json_body(payload)?;
    let driver = state.onboarding.update_status(request).await?;
    Ok(ApiResponse::success(driver))
}
