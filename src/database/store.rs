use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    BackgroundCheck, BankingDetails, BankingUpdate, Driver, InsurancePolicy, NewBackgroundCheck,
    NewInsurancePolicy, VehicleRecord, VehicleUpdate,
};

/// Which drivers to load, and in what order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverScope {
    /// Drivers with exactly this status, newest registration first
    WithStatus(String),
    /// Every driver; those with this status first, then newest registration first
    PendingFirst(String),
}

/// Storage seam for onboarding data.
///
/// The `*_for_drivers` batch reads may return every matching row or only the newest
/// row per driver; callers reduce to one row per driver either way.
#[async_trait]
pub trait OnboardingStore: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn driver(&self, driver_id: i32) -> Result<Option<Driver>, DatabaseError>;

    async fn drivers(&self, scope: DriverScope) -> Result<Vec<Driver>, DatabaseError>;

    async fn vehicles_for_drivers(&self, driver_ids: &[i32]) -> Result<Vec<VehicleRecord>, DatabaseError>;

    async fn background_checks_for_drivers(
        &self,
        driver_ids: &[i32],
    ) -> Result<Vec<BackgroundCheck>, DatabaseError>;

    async fn insurance_for_drivers(&self, driver_ids: &[i32]) -> Result<Vec<InsurancePolicy>, DatabaseError>;

    async fn banking_for_drivers(&self, driver_ids: &[i32]) -> Result<Vec<BankingDetails>, DatabaseError>;

    /// Full vehicle history of one driver, newest first
    async fn vehicles(&self, driver_id: i32) -> Result<Vec<VehicleRecord>, DatabaseError>;

    async fn background_checks(&self, driver_id: i32) -> Result<Vec<BackgroundCheck>, DatabaseError>;

    async fn insurance(&self, driver_id: i32) -> Result<Vec<InsurancePolicy>, DatabaseError>;

    async fn banking(&self, driver_id: i32) -> Result<Option<BankingDetails>, DatabaseError>;

    /// Returns the updated driver, or `None` if no driver has that id
    async fn set_driver_status(&self, driver_id: i32, status: &str) -> Result<Option<Driver>, DatabaseError>;

    async fn upsert_vehicle(&self, update: &VehicleUpdate) -> Result<VehicleRecord, DatabaseError>;

    async fn insert_background_check(&self, check: &NewBackgroundCheck) -> Result<BackgroundCheck, DatabaseError>;

    async fn insert_insurance(&self, policy: &NewInsurancePolicy) -> Result<InsurancePolicy, DatabaseError>;

    async fn upsert_banking(&self, update: &BankingUpdate) -> Result<BankingDetails, DatabaseError>;
}
