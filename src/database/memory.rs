use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::database::manager::DatabaseError;
use crate::database::models::{
    BackgroundCheck, BankingDetails, BankingUpdate, Driver, InsurancePolicy, NewBackgroundCheck,
    NewInsurancePolicy, SatelliteRecord, VehicleRecord, VehicleUpdate,
};
use crate::database::store::{DriverScope, OnboardingStore};

#[derive(Default)]
struct Tables {
    drivers: Vec<Driver>,
    vehicles: Vec<VehicleRecord>,
    background_checks: Vec<BackgroundCheck>,
    insurance: Vec<InsurancePolicy>,
    banking: Vec<BankingDetails>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn require_driver(&self, driver_id: i32) -> Result<(), DatabaseError> {
        if self.drivers.iter().any(|d| d.driver_id == driver_id) {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(format!("driver {}", driver_id)))
        }
    }
}

/// In-process store used as a test double and for local demos.
///
/// Batch satellite reads return every matching row, unreduced.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a storage error until reset
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Register a driver; returns the assigned id
    pub fn add_driver(
        &self,
        first_name: &str,
        last_name: &str,
        status: &str,
        registration_date: DateTime<Utc>,
    ) -> i32 {
        let mut tables = self.lock_unchecked();
        let driver_id = tables.next_id();
        tables.drivers.push(Driver {
            driver_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: Some(format!(
                "{}.{}@example.com",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            )),
            phone_number: None,
            license_number: None,
            license_state: None,
            license_expiry: None,
            status: status.to_string(),
            registration_date,
        });
        driver_id
    }

    /// Number of stored vehicle rows carrying this VIN
    pub fn vehicle_count_for_vin(&self, vin: &str) -> usize {
        self.lock_unchecked().vehicles.iter().filter(|v| v.vin == vin).count()
    }

    fn lock_unchecked(&self) -> MutexGuard<'_, Tables> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DatabaseError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError("memory store is failing".to_string()));
        }
        Ok(self.lock_unchecked())
    }
}

fn rows_for<R: SatelliteRecord + Clone>(rows: &[R], driver_ids: &[i32]) -> Vec<R> {
    rows.iter()
        .filter(|r| driver_ids.contains(&r.driver_id()))
        .cloned()
        .collect()
}

fn history<R: SatelliteRecord + Clone>(rows: &[R], driver_id: i32) -> Vec<R> {
    let mut out: Vec<R> = rows.iter().filter(|r| r.driver_id() == driver_id).cloned().collect();
    out.sort_by_key(|r| Reverse(r.rank()));
    out
}

#[async_trait]
impl OnboardingStore for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.lock().map(|_| ())
    }

    async fn driver(&self, driver_id: i32) -> Result<Option<Driver>, DatabaseError> {
        let tables = self.lock()?;
        Ok(tables.drivers.iter().find(|d| d.driver_id == driver_id).cloned())
    }

    async fn drivers(&self, scope: DriverScope) -> Result<Vec<Driver>, DatabaseError> {
        let tables = self.lock()?;
        let mut drivers = match &scope {
            DriverScope::WithStatus(status) => tables
                .drivers
                .iter()
                .filter(|d| &d.status == status)
                .cloned()
                .collect::<Vec<_>>(),
            DriverScope::PendingFirst(_) => tables.drivers.clone(),
        };

        match &scope {
            DriverScope::WithStatus(_) => {
                drivers.sort_by_key(|d| (Reverse(d.registration_date), Reverse(d.driver_id)));
            }
            DriverScope::PendingFirst(status) => {
                drivers.sort_by_key(|d| {
                    (&d.status != status, Reverse(d.registration_date), Reverse(d.driver_id))
                });
            }
        }
        Ok(drivers)
    }

    async fn vehicles_for_drivers(&self, driver_ids: &[i32]) -> Result<Vec<VehicleRecord>, DatabaseError> {
        Ok(rows_for(&self.lock()?.vehicles, driver_ids))
    }

    async fn background_checks_for_drivers(
        &self,
        driver_ids: &[i32],
    ) -> Result<Vec<BackgroundCheck>, DatabaseError> {
        Ok(rows_for(&self.lock()?.background_checks, driver_ids))
    }

    async fn insurance_for_drivers(&self, driver_ids: &[i32]) -> Result<Vec<InsurancePolicy>, DatabaseError> {
        Ok(rows_for(&self.lock()?.insurance, driver_ids))
    }

    async fn banking_for_drivers(&self, driver_ids: &[i32]) -> Result<Vec<BankingDetails>, DatabaseError> {
        Ok(rows_for(&self.lock()?.banking, driver_ids))
    }

    async fn vehicles(&self, driver_id: i32) -> Result<Vec<VehicleRecord>, DatabaseError> {
        Ok(history(&self.lock()?.vehicles, driver_id))
    }

    async fn background_checks(&self, driver_id: i32) -> Result<Vec<BackgroundCheck>, DatabaseError> {
        Ok(history(&self.lock()?.background_checks, driver_id))
    }

    async fn insurance(&self, driver_id: i32) -> Result<Vec<InsurancePolicy>, DatabaseError> {
        Ok(history(&self.lock()?.insurance, driver_id))
    }

    async fn banking(&self, driver_id: i32) -> Result<Option<BankingDetails>, DatabaseError> {
        Ok(history(&self.lock()?.banking, driver_id).into_iter().next())
    }

    async fn set_driver_status(&self, driver_id: i32, status: &str) -> Result<Option<Driver>, DatabaseError> {
        let mut tables = self.lock()?;
        Ok(tables
            .drivers
            .iter_mut()
            .find(|d| d.driver_id == driver_id)
            .map(|driver| {
                driver.status = status.to_string();
                driver.clone()
            }))
    }

    async fn upsert_vehicle(&self, update: &VehicleUpdate) -> Result<VehicleRecord, DatabaseError> {
        let mut tables = self.lock()?;
        tables.require_driver(update.driver_id)?;

        let vehicle_id = match tables.vehicles.iter().position(|v| v.vin == update.vin) {
            Some(idx) => {
                let id = tables.vehicles[idx].vehicle_id;
                tables.vehicles.remove(idx);
                id
            }
            None => tables.next_id(),
        };

        let record = VehicleRecord {
            vehicle_id,
            driver_id: update.driver_id,
            vin: update.vin.clone(),
            make: update.make.clone(),
            model: update.model.clone(),
            year: update.year,
            license_plate: update.license_plate.clone(),
            color: update.color.clone(),
            inspection_date: update.inspection_date,
            inspection_status: update.inspection_status.clone(),
        };
        tables.vehicles.push(record.clone());
        Ok(record)
    }

    async fn insert_background_check(&self, check: &NewBackgroundCheck) -> Result<BackgroundCheck, DatabaseError> {
        let mut tables = self.lock()?;
        tables.require_driver(check.driver_id)?;

        let record = BackgroundCheck {
            check_id: tables.next_id(),
            driver_id: check.driver_id,
            provider: check.provider.clone(),
            check_type: check.check_type.clone(),
            status: check.status.clone(),
            notes: check.notes.clone(),
            check_date: check.check_date,
        };
        tables.background_checks.push(record.clone());
        Ok(record)
    }

    async fn insert_insurance(&self, policy: &NewInsurancePolicy) -> Result<InsurancePolicy, DatabaseError> {
        let mut tables = self.lock()?;
        tables.require_driver(policy.driver_id)?;

        let record = InsurancePolicy {
            insurance_id: tables.next_id(),
            driver_id: policy.driver_id,
            provider: policy.provider.clone(),
            policy_number: policy.policy_number.clone(),
            coverage_amount: policy.coverage_amount,
            start_date: policy.start_date,
            end_date: policy.end_date,
        };
        tables.insurance.push(record.clone());
        Ok(record)
    }

    async fn upsert_banking(&self, update: &BankingUpdate) -> Result<BankingDetails, DatabaseError> {
        let mut tables = self.lock()?;
        tables.require_driver(update.driver_id)?;

        let existing = tables.banking.iter().position(|b| b.driver_id == update.driver_id);
        let (banking_id, created_at) = match existing {
            Some(idx) => {
                let old = tables.banking.remove(idx);
                (old.banking_id, old.created_at)
            }
            None => (tables.next_id(), Utc::now()),
        };

        let record = BankingDetails {
            banking_id,
            driver_id: update.driver_id,
            bank_name: update.bank_name.clone(),
            account_holder_name: update.account_holder_name.clone(),
            account_number: update.account_number.clone(),
            routing_number: update.routing_number.clone(),
            created_at,
        };
        tables.banking.push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn vehicle(driver_id: i32, vin: &str, color: &str) -> VehicleUpdate {
        VehicleUpdate {
            driver_id,
            vin: vin.to_string(),
            make: Some("Toyota".to_string()),
            model: Some("Prius".to_string()),
            year: Some(2019),
            license_plate: None,
            color: Some(color.to_string()),
            inspection_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            inspection_status: None,
        }
    }

    #[tokio::test]
    async fn vehicle_upsert_is_keyed_by_vin() {
        let store = MemoryStore::new();
        let driver = store.add_driver("Ada", "Lovelace", "New Registered", Utc::now());

        let first = store.upsert_vehicle(&vehicle(driver, "VIN123", "Blue")).await.unwrap();
        let second = store.upsert_vehicle(&vehicle(driver, "VIN123", "Red")).await.unwrap();

        assert_eq!(first.vehicle_id, second.vehicle_id);
        assert_eq!(store.vehicle_count_for_vin("VIN123"), 1);
        let stored = store.vehicles(driver).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].color.as_deref(), Some("Red"));
    }

    #[tokio::test]
    async fn writes_against_unknown_driver_are_not_found() {
        let store = MemoryStore::new();
        let err = store.upsert_vehicle(&vehicle(404, "VIN404", "Grey")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn pending_first_orders_by_status_then_recency() {
        let store = MemoryStore::new();
        let old_pending = store.add_driver("A", "A", "New Registered", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let approved = store.add_driver("B", "B", "Approved", Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        let new_pending = store.add_driver("C", "C", "New Registered", Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());

        let ids: Vec<i32> = store
            .drivers(DriverScope::PendingFirst("New Registered".to_string()))
            .await
            .unwrap()
            .iter()
            .map(|d| d.driver_id)
            .collect();
        assert_eq!(ids, vec![new_pending, old_pending, approved]);
    }

    #[tokio::test]
    async fn failing_store_reports_errors() {
        let store = MemoryStore::new();
        store.set_failing(true);
        assert!(store.ping().await.is_err());
        store.set_failing(false);
        assert!(store.ping().await.is_ok());
    }
}
