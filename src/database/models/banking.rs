use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::{SatelliteKind, SatelliteRecord};
use crate::api::format::mdy;

/// Payout account for a driver (`banking` table), one row per driver
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct BankingDetails {
    pub banking_id: i32,
    pub driver_id: i32,
    pub bank_name: Option<String>,
    pub account_holder_name: Option<String>,
    pub account_number: Option<String>,
    pub routing_number: Option<String>,
    #[serde(serialize_with = "mdy::serialize")]
    pub created_at: DateTime<Utc>,
}

impl SatelliteRecord for BankingDetails {
    const KIND: SatelliteKind = SatelliteKind::Banking;

    fn record_id(&self) -> i32 {
        self.banking_id
    }

    fn driver_id(&self) -> i32 {
        self.driver_id
    }

    fn recency(&self) -> Option<NaiveDateTime> {
        Some(self.created_at.naive_utc())
    }
}

/// Upsert keyed by `driver_id`
#[derive(Debug, Clone, PartialEq)]
pub struct BankingUpdate {
    pub driver_id: i32,
    pub bank_name: Option<String>,
    pub account_holder_name: Option<String>,
    pub account_number: Option<String>,
    pub routing_number: Option<String>,
}
