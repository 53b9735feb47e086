pub mod background_check;
pub mod banking;
pub mod driver;
pub mod insurance;
pub mod profile;
pub mod vehicle;

pub use background_check::{BackgroundCheck, NewBackgroundCheck};
pub use banking::{BankingDetails, BankingUpdate};
pub use driver::{Driver, StatusUpdate};
pub use insurance::{InsurancePolicy, NewInsurancePolicy};
pub use profile::DriverProfile;
pub use vehicle::{VehicleRecord, VehicleUpdate};

use chrono::NaiveDateTime;

/// The four record kinds hanging off a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatelliteKind {
    Vehicle,
    BackgroundCheck,
    Insurance,
    Banking,
}

impl SatelliteKind {
    /// Backing table name
    pub fn table(&self) -> &'static str {
        match self {
            SatelliteKind::Vehicle => "vehicles",
            SatelliteKind::BackgroundCheck => "background_checks",
            SatelliteKind::Insurance => "insurance",
            SatelliteKind::Banking => "banking",
        }
    }
}

/// A row referencing exactly one driver, ordered in time by its recency column.
///
/// Rows are ranked by `(recency, record_id)`. A missing recency value sorts below any
/// dated row, and equal timestamps fall back to the higher primary key.
pub trait SatelliteRecord {
    const KIND: SatelliteKind;

    fn record_id(&self) -> i32;

    fn driver_id(&self) -> i32;

    fn recency(&self) -> Option<NaiveDateTime>;

    fn rank(&self) -> (Option<NaiveDateTime>, i32) {
        (self.recency(), self.record_id())
    }
}
