use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use crate::database::models::InsurancePolicy;
use crate::handlers::utils::{json_body, parse_driver_id};
use crate::handlers::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::InsuranceRequest;

/// GET /drivers/:id/insurance
pub async fn list(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Vec<InsurancePolicy>> {
    let driver_id = parse_driver_id(&id)?;
    Ok(ApiResponse::success(state.onboarding.insurance(driver_id).await?))
}

/// POST /drivers/insurance - appends a policy; `policy_number` is required
pub async fn record(
    State(state): State<AppState>,
    payload: Result<Json<InsuranceRequest>, JsonRejection>,
) -> ApiResult<InsurancePolicy> {
    let request = json_body(payload)?;
    Ok(ApiResponse::created(state.onboarding.record_insurance(request).await?))
}
