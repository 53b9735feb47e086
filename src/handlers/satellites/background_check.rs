use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use crate::database::models::BackgroundCheck;
use crate::handlers::utils::{json_body, parse_driver_id};
use crate::handlers::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::BackgroundCheckRequest;

/// GET /drivers/:id/background-checks
pub async fn list(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Vec<BackgroundCheck>> {
    let driver_id = parse_driver_id(&id)?;
    Ok(ApiResponse::success(state.onboarding.background_checks(driver_id).await?))
}

/// POST /drivers/background-check - appends a new check
pub async fn record(
    State(state): State<AppState>,
    payload: Result<Json<BackgroundCheckRequest>, JsonRejection>,
) -> ApiResult<BackgroundCheck> {
    let request = json_body(payload)?;
    Ok(ApiResponse::created(state.onboarding.record_background_check(request).await?))
}
