use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use super::{SatelliteKind, SatelliteRecord};
use crate::api::format::mdy;

/// An insurance policy on file for a driver (`insurance` table). Policies accumulate.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct InsurancePolicy {
    pub insurance_id: i32,
    pub driver_id: i32,
    pub provider: Option<String>,
    pub policy_number: String,
    pub coverage_amount: Option<Decimal>,
    #[serde(serialize_with = "mdy::option")]
    pub start_date: Option<NaiveDate>,
    #[serde(serialize_with = "mdy::option")]
    pub end_date: Option<NaiveDate>,
}

impl SatelliteRecord for InsurancePolicy {
    const KIND: SatelliteKind = SatelliteKind::Insurance;

    fn record_id(&self) -> i32 {
        self.insurance_id
    }

    fn driver_id(&self) -> i32 {
        self.driver_id
    }

    fn recency(&self) -> Option<NaiveDateTime> {
        self.start_date.map(|d| d.and_time(NaiveTime::MIN))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInsurancePolicy {
    pub driver_id: i32,
    pub provider: Option<String>,
    pub policy_number: String,
    pub coverage_amount: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
