use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

use super::{SatelliteKind, SatelliteRecord};
use crate::api::format::mdy;

/// A vehicle registered to a driver (`vehicles` table). `vin` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct VehicleRecord {
    pub vehicle_id: i32,
    pub driver_id: i32,
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
    pub color: Option<String>,
    #[serde(serialize_with = "mdy::option")]
    pub inspection_date: Option<NaiveDate>,
    pub inspection_status: Option<String>,
}

impl SatelliteRecord for VehicleRecord {
    const KIND: SatelliteKind = SatelliteKind::Vehicle;

    fn record_id(&self) -> i32 {
        self.vehicle_id
    }

    fn driver_id(&self) -> i32 {
        self.driver_id
    }

    fn recency(&self) -> Option<NaiveDateTime> {
        self.inspection_date.map(|d| d.and_time(NaiveTime::MIN))
    }
}

/// Upsert keyed by `vin`
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleUpdate {
    pub driver_id: i32,
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
    pub color: Option<String>,
    pub inspection_date: Option<NaiveDate>,
    pub inspection_status: Option<String>,
}
