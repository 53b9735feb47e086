//! Request payloads accepted by the write endpoints.
//!
//! Every field is optional on the wire; `validate` turns a payload into the typed
//! command the store consumes, or a `ProfileError::Validation` naming the first
//! missing field.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::format::flexible_date;
use crate::database::models::{BankingUpdate, NewBackgroundCheck, NewInsurancePolicy, StatusUpdate, VehicleUpdate};
use crate::services::ProfileError;

/// Trim a string and treat blank as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required_id(value: Option<i32>) -> Result<i32, ProfileError> {
    value.ok_or_else(|| ProfileError::missing("driver_id"))
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ProfileError> {
    non_blank(value).ok_or_else(|| ProfileError::missing(field))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusUpdateRequest {
    pub driver_id: Option<i32>,
    pub status: Option<String>,
}

impl StatusUpdateRequest {
    pub fn validate(self) -> Result<StatusUpdate, ProfileError> {
        Ok(StatusUpdate {
            driver_id: required_id(self.driver_id)?,
            status: required_text(self.status, "status")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleRequest {
    pub driver_id: Option<i32>,
    pub vin: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
    pub color: Option<String>,
    #[serde(default, deserialize_with = "flexible_date::option")]
    pub inspection_date: Option<NaiveDate>,
    pub inspection_status: Option<String>,
}

impl VehicleRequest {
    pub fn validate(self) -> Result<VehicleUpdate, ProfileError> {
        Ok(VehicleUpdate {
            driver_id: required_id(self.driver_id)?,
            vin: required_text(self.vin, "vin")?,
            make: non_blank(self.make),
            model: non_blank(self.model),
            year: self.year,
            license_plate: non_blank(self.license_plate),
            color: non_blank(self.color),
            inspection_date: self.inspection_date,
            inspection_status: non_blank(self.inspection_status),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackgroundCheckRequest {
    pub driver_id: Option<i32>,
    pub provider: Option<String>,
    pub check_type: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "flexible_date::option")]
    pub check_date: Option<NaiveDate>,
}

impl BackgroundCheckRequest {
    pub fn validate(self) -> Result<NewBackgroundCheck, ProfileError> {
        Ok(NewBackgroundCheck {
            driver_id: required_id(self.driver_id)?,
            provider: non_blank(self.provider),
            check_type: non_blank(self.check_type),
            status: non_blank(self.status),
            notes: non_blank(self.notes),
            check_date: self.check_date,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsuranceRequest {
    pub driver_id: Option<i32>,
    pub provider: Option<String>,
    pub policy_number: Option<String>,
    pub coverage_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_date::option")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "flexible_date::option")]
    pub end_date: Option<NaiveDate>,
}

impl InsuranceRequest {
    pub fn validate(self) -> Result<NewInsurancePolicy, ProfileError> {
        Ok(NewInsurancePolicy {
            driver_id: required_id(self.driver_id)?,
            policy_number: required_text(self.policy_number, "policy_number")?,
            provider: non_blank(self.provider),
            coverage_amount: self.coverage_amount,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BankingRequest {
    pub driver_id: Option<i32>,
    pub bank_name: Option<String>,
    pub account_holder_name: Option<String>,
    pub account_number: Option<String>,
    pub routing_number: Option<String>,
}

impl BankingRequest {
    pub fn validate(self) -> Result<BankingUpdate, ProfileError> {
        Ok(BankingUpdate {
            driver_id: required_id(self.driver_id)?,
            bank_name: non_blank(self.bank_name),
            account_holder_name: non_blank(self.account_holder_name),
            account_number: non_blank(self.account_number),
            routing_number: non_blank(self.routing_number),
        })
    }
}
