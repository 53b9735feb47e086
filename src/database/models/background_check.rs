use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

use super::{SatelliteKind, SatelliteRecord};
use crate::api::format::mdy;

/// One background check run for a driver. Checks accumulate over time.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct BackgroundCheck {
    pub check_id: i32,
    pub driver_id: i32,
    pub provider: Option<String>,
    pub check_type: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    #[serde(serialize_with = "mdy::option")]
    pub check_date: Option<NaiveDate>,
}

impl SatelliteRecord for BackgroundCheck {
    const KIND: SatelliteKind = SatelliteKind::BackgroundCheck;

    fn record_id(&self) -> i32 {
        self.check_id
    }

    fn driver_id(&self) -> i32 {
        self.driver_id
    }

    fn recency(&self) -> Option<NaiveDateTime> {
        self.check_date.map(|d| d.and_time(NaiveTime::MIN))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBackgroundCheck {
    pub driver_id: i32,
    pub provider: Option<String>,
    pub check_type: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub check_date: Option<NaiveDate>,
}
