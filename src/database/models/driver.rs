use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::api::format::mdy;

/// A driver going through onboarding (`drivers` table)
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Driver {
    pub driver_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub license_number: Option<String>,
    pub license_state: Option<String>,
    #[serde(serialize_with = "mdy::option")]
    pub license_expiry: Option<NaiveDate>,
    pub status: String,
    #[serde(serialize_with = "mdy::serialize")]
    pub registration_date: DateTime<Utc>,
}

/// Validated status transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub driver_id: i32,
    pub status: String,
}
