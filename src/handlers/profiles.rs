use axum::extract::{Path, State};

use super::utils::parse_driver_id;
use super::AppState;
use crate::database::models::DriverProfile;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /drivers/pending-details
pub async fn pending_details(State(state): State<AppState>) -> ApiResult<Vec<DriverProfile>> {
    let profiles = state.profiles.list_pending_profiles().await?;
    Ok(ApiResponse::success(profiles))
}

/// GET /drivers/details - every driver, pending first
pub async fn all_details(State(state): State<AppState>) -> ApiResult<Vec<DriverProfile>> {
    let profiles = state.profiles.list_all_profiles().await?;
    Ok(ApiResponse::success(profiles))
}

/// GET /drivers/:id/details
pub async fn driver_details(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<DriverProfile> {
    let driver_id = parse_driver_id(&id)?;
    let profile = state.profiles.get_profile(driver_id).await?;
    Ok(ApiResponse::success(profile))
}
