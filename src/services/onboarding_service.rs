use std::sync::Arc;

use tracing::info;

use crate::database::models::{BackgroundCheck, BankingDetails, Driver, InsurancePolicy, VehicleRecord};
use crate::database::store::{DriverScope, OnboardingStore};
use crate::services::ProfileError;
use crate::types::{BackgroundCheckRequest, BankingRequest, InsuranceRequest, StatusUpdateRequest, VehicleRequest};

/// Validated pass-through reads and writes for drivers and their satellite records
#[derive(Clone)]
pub struct OnboardingService {
    store: Arc<dyn OnboardingStore>,
    pending_status: String,
}

impl OnboardingService {
    pub fn new(store: Arc<dyn OnboardingStore>, pending_status: impl Into<String>) -> Self {
        Self {
            store,
            pending_status: pending_status.into(),
        }
    }

    /// Store health, for the health endpoint
    pub async fn ping(&self) -> Result<(), ProfileError> {
        self.store
            .ping()
            .await
            .map_err(ProfileError::storage("health check failed", None))
    }

    /// Pending drivers without their satellite records, newest first
    pub async fn pending_drivers(&self) -> Result<Vec<Driver>, ProfileError> {
        self.store
            .drivers(DriverScope::WithStatus(self.pending_status.clone()))
            .await
            .map_err(ProfileError::storage("Failed to fetch drivers", None))
    }

    pub async fn update_status(&self, request: StatusUpdateRequest) -> Result<Driver, ProfileError> {
        let update = request.validate()?;
        let driver = self
            .store
            .set_driver_status(update.driver_id, &update.status)
            .await
            .map_err(ProfileError::storage("Failed to update driver status", None))?
            .ok_or(ProfileError::NotFound(update.driver_id))?;

        info!("Driver {} status set to '{}'", driver.driver_id, driver.status);
        Ok(driver)
    }

    /// `NotFound` unless a driver with this id exists
    async fn require_driver(&self, driver_id: i32) -> Result<(), ProfileError> {
        self.store
            .driver(driver_id)
            .await
            .map_err(ProfileError::storage("Failed to fetch driver", None))?
            .map(|_| ())
            .ok_or(ProfileError::NotFound(driver_id))
    }

    pub async fn vehicles(&self, driver_id: i32) -> Result<Vec<VehicleRecord>, ProfileError> {
        self.require_driver(driver_id).await?;
        self.store
            .vehicles(driver_id)
            .await
            .map_err(ProfileError::storage("Failed to fetch vehicle details", None))
    }

    pub async fn save_vehicle(&self, request: VehicleRequest) -> Result<VehicleRecord, ProfileError> {
        let update = request.validate()?;
        self.store
            .upsert_vehicle(&update)
            .await
            .map_err(ProfileError::storage("Failed to save vehicle details", Some(update.driver_id)))
    }

    pub async fn background_checks(&self, driver_id: i32) -> Result<Vec<BackgroundCheck>, ProfileError> {
        self.require_driver(driver_id).await?;
        self.store
            .background_checks(driver_id)
            .await
            .map_err(ProfileError::storage("Failed to fetch background checks", None))
    }

    pub async fn record_background_check(
        &self,
        request: BackgroundCheckRequest,
    ) -> Result<BackgroundCheck, ProfileError> {
        let check = request.validate()?;
        self.store
            .insert_background_check(&check)
            .await
            .map_err(ProfileError::storage("Failed to save background check", Some(check.driver_id)))
    }

    pub async fn insurance(&self, driver_id: i32) -> Result<Vec<InsurancePolicy>, ProfileError> {
        self.require_driver(driver_id).await?;
        self.store
            .insurance(driver_id)
            .await
            .map_err(ProfileError::storage("Failed to fetch insurance details", None))
    }

    pub async fn record_insurance(&self, request: InsuranceRequest) -> Result<InsurancePolicy, ProfileError> {
        let policy = request.validate()?;
        self.store
            .insert_insurance(&policy)
            .await
            .map_err(ProfileError::storage("Failed to save insurance details", Some(policy.driver_id)))
    }

    /// Banking details of a driver; `None` when the driver has none on file
    pub async fn banking(&self, driver_id: i32) -> Result<Option<BankingDetails>, ProfileError> {
        self.require_driver(driver_id).await?;
        self.store
            .banking(driver_id)
            .await
            .map_err(ProfileError::storage("Failed to fetch banking details", None))
    }

    pub async fn save_banking(&self, request: BankingRequest) -> Result<BankingDetails, ProfileError> {
        let update = request.validate()?;
        self.store
            .upsert_banking(&update)
            .await
            .map_err(ProfileError::storage("Failed to save banking details", Some(update.driver_id)))
    }
}
