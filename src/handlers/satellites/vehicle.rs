use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use crate::database::models::VehicleRecord;
use crate::handlers::utils::{json_body, parse_driver_id};
use crate::handlers::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::VehicleRequest;

/// GET /drivers/:id/vehicles
pub async fn list(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Vec<VehicleRecord>> {
    let driver_id = parse_driver_id(&id)?;
    Ok(ApiResponse::success(state.onboarding.vehicles(driver_id).await?))
}

/// POST /drivers/vehicle - upsert by VIN
pub async fn save(
    State(state): State<AppState>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> ApiResult<VehicleRecord> {
    let request = json_body(payload)?;
    Ok(ApiResponse::success(state.onboarding.save_vehicle(request).await?))
}
