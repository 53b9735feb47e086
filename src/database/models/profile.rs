use serde::Serialize;

use super::{BackgroundCheck, BankingDetails, Driver, InsurancePolicy, VehicleRecord};

/// A driver merged with the newest record of each satellite kind.
///
/// Driver columns are flattened into the top level; each satellite kind is its own
/// group and serializes as `null` when the driver has no record of that kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverProfile {
    #[serde(flatten)]
    pub driver: Driver,
    pub vehicle: Option<VehicleRecord>,
    pub background_check: Option<BackgroundCheck>,
    pub insurance: Option<InsurancePolicy>,
    pub banking: Option<BankingDetails>,
}

impl DriverProfile {
    pub fn driver_id(&self) -> i32 {
        self.driver.driver_id
    }
}
