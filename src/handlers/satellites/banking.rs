use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use crate::database::models::BankingDetails;
use crate::handlers::utils::{json_body, parse_driver_id};
use crate::handlers::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::BankingRequest;

/// GET /drivers/:id/banking - `null` data when the driver has no banking record
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Option<BankingDetails>> {
    let driver_id = parse_driver_id(&id)?;
    Ok(ApiResponse::success(state.onboarding.banking(driver_id).await?))
}

/// POST /drivers/banking - upsert by driver
pub async fn save(
    State(state): State<AppState>,
    payload: Result<Json<BankingRequest>, JsonRejection>,
) -> ApiResult<BankingDetails> {
    let request = json_body(payload)?;
    Ok(ApiResponse::success(state.onboarding.save_banking(request).await?))
}
