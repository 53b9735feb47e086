// handlers/mod.rs - HTTP adapters over the onboarding services
//
// Every handler is a thin adapter: decode the path/body, call one service
// operation, wrap the result in the success envelope. Validation lives in
// `crate::types`, aggregation in `crate::services::aggregator`.

pub mod drivers;
pub mod profiles;
pub mod satellites;
pub mod system;
pub mod utils;

use std::sync::Arc;

use crate::database::store::OnboardingStore;
use crate::services::{OnboardingService, ProfileAggregator};

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub profiles: ProfileAggregator,
    pub onboarding: OnboardingService,
}

impl AppState {
    pub fn new(store: Arc<dyn OnboardingStore>, pending_status: &str) -> Self {
        Self {
            profiles: ProfileAggregator::new(store.clone(), pending_status),
            onboarding: OnboardingService::new(store, pending_status),
        }
    }
}
