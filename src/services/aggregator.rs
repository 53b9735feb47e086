use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::database::models::{Driver, DriverProfile, SatelliteRecord};
use crate::database::store::{DriverScope, OnboardingStore};
use crate::services::ProfileError;

const AGGREGATION_FAILED: &str = "aggregation failed";

/// Keep the highest-ranked row per driver.
///
/// Rank is `(recency, record_id)`, so undated rows lose to dated ones and equal
/// timestamps resolve to the higher primary key regardless of input order.
pub fn latest_by_driver<R: SatelliteRecord>(rows: Vec<R>) -> HashMap<i32, R> {
    let mut latest: HashMap<i32, R> = HashMap::with_capacity(rows.len());
    for row in rows {
        match latest.entry(row.driver_id()) {
            Entry::Occupied(mut slot) => {
                if row.rank() > slot.get().rank() {
                    slot.insert(row);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
        }
    }
    latest
}

/// Builds driver profiles: each driver merged with its newest record of every kind.
///
/// Satellite kinds are resolved independently of each other, one batch read per kind,
/// and never joined together, so a profile list always has exactly one row per driver.
#[derive(Clone)]
pub struct ProfileAggregator {
    store: Arc<dyn OnboardingStore>,
    pending_status: String,
}

impl ProfileAggregator {
    pub fn new(store: Arc<dyn OnboardingStore>, pending_status: impl Into<String>) -> Self {
        Self {
            store,
            pending_status: pending_status.into(),
        }
    }

    /// Profile of one driver, or `NotFound` when the id is unknown
    pub async fn get_profile(&self, driver_id: i32) -> Result<DriverProfile, ProfileError> {
        let driver = self
            .store
            .driver(driver_id)
            .await
            .map_err(ProfileError::storage(AGGREGATION_FAILED, None))?
            .ok_or(ProfileError::NotFound(driver_id))?;

        self.assemble(vec![driver])
            .await?
            .pop()
            .ok_or(ProfileError::NotFound(driver_id))
    }

    /// Profiles of drivers awaiting review, newest registration first
    pub async fn list_pending_profiles(&self) -> Result<Vec<DriverProfile>, ProfileError> {
        let drivers = self
            .store
            .drivers(DriverScope::WithStatus(self.pending_status.clone()))
            .await
            .map_err(ProfileError::storage(AGGREGATION_FAILED, None))?;
        self.assemble(drivers).await
    }

    /// Profiles of every driver; pending ones first, then newest registration first
    pub async fn list_all_profiles(&self) -> Result<Vec<DriverProfile>, ProfileError> {
        let drivers = self
            .store
            .drivers(DriverScope::PendingFirst(self.pending_status.clone()))
            .await
            .map_err(ProfileError::storage(AGGREGATION_FAILED, None))?;
        self.assemble(drivers).await
    }

    async fn assemble(&self, mut drivers: Vec<Driver>) -> Result<Vec<DriverProfile>, ProfileError> {
        let mut seen = HashSet::with_capacity(drivers.len());
        drivers.retain(|d| seen.insert(d.driver_id));

        if drivers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = drivers.iter().map(|d| d.driver_id).collect();

        let (vehicles, background_checks, insurance, banking) = futures::try_join!(
            self.store.vehicles_for_drivers(&ids),
            self.store.background_checks_for_drivers(&ids),
            self.store.insurance_for_drivers(&ids),
            self.store.banking_for_drivers(&ids),
        )
        .map_err(ProfileError::storage(AGGREGATION_FAILED, None))?;

        debug!(
            "Assembling {} profiles from {} vehicle, {} background check, {} insurance, {} banking rows",
            drivers.len(),
            vehicles.len(),
            background_checks.len(),
            insurance.len(),
            banking.len()
        );

        let mut vehicles = latest_by_driver(vehicles);
        let mut background_checks = latest_by_driver(background_checks);
        let mut insurance = latest_by_driver(insurance);
        let mut banking = latest_by_driver(banking);

        Ok(drivers
            .into_iter()
            .map(|driver| {
                let id = driver.driver_id;
                DriverProfile {
                    vehicle: vehicles.remove(&id),
                    background_check: background_checks.remove(&id),
                    insurance: insurance.remove(&id),
                    banking: banking.remove(&id),
                    driver,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PENDING_STATUS;
    use crate::database::models::{
        BankingUpdate, InsurancePolicy, NewBackgroundCheck, NewInsurancePolicy, VehicleUpdate,
    };
    use crate::database::MemoryStore;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn setup() -> (Arc<MemoryStore>, ProfileAggregator) {
        let store = Arc::new(MemoryStore::new());
        let aggregator = ProfileAggregator::new(store.clone(), DEFAULT_PENDING_STATUS);
        (store, aggregator)
    }

    fn registered(month: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, 1, 9, 0, 0).unwrap()
    }

    async fn add_insurance(store: &MemoryStore, driver_id: i32, policy: &str, start: Option<NaiveDate>) {
        store
            .insert_insurance(&NewInsurancePolicy {
                driver_id,
                provider: Some("Acme Mutual".into()),
                policy_number: policy.into(),
                coverage_amount: None,
                start_date: start,
                end_date: None,
            })
            .await
            .unwrap();
    }

    async fn add_check(store: &MemoryStore, driver_id: i32, status: &str, date: Option<NaiveDate>) {
        store
            .insert_background_check(&NewBackgroundCheck {
                driver_id,
                provider: Some("Checkr".into()),
                check_type: Some("criminal".into()),
                status: Some(status.into()),
                notes: None,
                check_date: date,
            })
            .await
            .unwrap();
    }

    async fn add_vehicle(store: &MemoryStore, driver_id: i32, vin: &str, inspected: Option<NaiveDate>) {
        store
            .upsert_vehicle(&VehicleUpdate {
                driver_id,
                vin: vin.into(),
                make: Some("Honda".into()),
                model: Some("Civic".into()),
                year: Some(2020),
                license_plate: None,
                color: None,
                inspection_date: inspected,
                inspection_status: Some("passed".into()),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn one_profile_per_driver_regardless_of_history() {
        let (store, aggregator) = setup();
        let busy = store.add_driver("Busy", "Driver", DEFAULT_PENDING_STATUS, registered(2));
        let quiet = store.add_driver("Quiet", "Driver", DEFAULT_PENDING_STATUS, registered(1));

        for (i, vin) in ["VIN-A", "VIN-B", "VIN-C"].iter().enumerate() {
            add_vehicle(&store, busy, vin, day(2024, 1 + i as u32, 10)).await;
        }
        for month in 1..=4 {
            add_check(&store, busy, "clear", day(2023, month, 1)).await;
        }
        add_insurance(&store, busy, "P-1", day(2023, 1, 1)).await;
        add_insurance(&store, busy, "P-2", day(2024, 1, 1)).await;

        let pending = aggregator.list_pending_profiles().await.unwrap();
        let ids: Vec<i32> = pending.iter().map(DriverProfile::driver_id).collect();
        assert_eq!(ids, vec![busy, quiet]);

        let all = aggregator.list_all_profiles().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn latest_insurance_wins() {
        let (store, aggregator) = setup();
        let driver = store.add_driver("Lin", "Wu", DEFAULT_PENDING_STATUS, registered(3));
        add_insurance(&store, driver, "T2", day(2023, 6, 1)).await;
        add_insurance(&store, driver, "T3", day(2024, 2, 1)).await;
        add_insurance(&store, driver, "T1", day(2022, 1, 1)).await;

        let profile = aggregator.get_profile(driver).await.unwrap();
        assert_eq!(profile.insurance.map(|p| p.policy_number).as_deref(), Some("T3"));
    }

    #[tokio::test]
    async fn absent_satellites_are_null_not_errors() {
        let (store, aggregator) = setup();
        let driver = store.add_driver("New", "Person", DEFAULT_PENDING_STATUS, registered(4));

        let profile = aggregator.get_profile(driver).await.unwrap();
        assert!(profile.vehicle.is_none());
        assert!(profile.background_check.is_none());
        assert!(profile.insurance.is_none());
        assert!(profile.banking.is_none());

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json["background_check"].is_null());
        assert_eq!(json["first_name"], "New");
        assert_eq!(json["registration_date"], "04-01-2024");
    }

    #[tokio::test]
    async fn unknown_driver_is_not_found() {
        let (_store, aggregator) = setup();
        assert!(matches!(
            aggregator.get_profile(999).await,
            Err(ProfileError::NotFound(999))
        ));
    }

    #[tokio::test]
    async fn status_change_moves_driver_out_of_pending() {
        let (store, aggregator) = setup();
        let older = store.add_driver("Old", "Timer", DEFAULT_PENDING_STATUS, registered(1));
        let newer = store.add_driver("New", "Comer", DEFAULT_PENDING_STATUS, registered(5));
        let approved = store.add_driver("Done", "Already", "Approved", registered(6));

        store.set_driver_status(newer, "Approved").await.unwrap();

        let pending: Vec<i32> = aggregator
            .list_pending_profiles()
            .await
            .unwrap()
            .iter()
            .map(DriverProfile::driver_id)
            .collect();
        assert_eq!(pending, vec![older]);

        let all: Vec<i32> = aggregator
            .list_all_profiles()
            .await
            .unwrap()
            .iter()
            .map(DriverProfile::driver_id)
            .collect();
        assert_eq!(all, vec![older, approved, newer]);
    }

    #[tokio::test]
    async fn dates_render_month_day_year() {
        let (store, aggregator) = setup();
        let driver = store.add_driver("Date", "Check", DEFAULT_PENDING_STATUS, registered(3));
        add_check(&store, driver, "clear", day(2024, 3, 2)).await;
        store
            .upsert_banking(&BankingUpdate {
                driver_id: driver,
                bank_name: Some("First Bank".into()),
                account_holder_name: None,
                account_number: None,
                routing_number: None,
            })
            .await
            .unwrap();

        let json = serde_json::to_value(aggregator.get_profile(driver).await.unwrap()).unwrap();
        assert_eq!(json["background_check"]["check_date"], "03-02-2024");
        let created = json["banking"]["created_at"].as_str().unwrap();
        assert_eq!(created.len(), 10);
        assert_eq!(&created[2..3], "-");
    }

    #[tokio::test]
    async fn storage_failure_fails_the_whole_call() {
        let (store, aggregator) = setup();
        store.add_driver("Any", "One", DEFAULT_PENDING_STATUS, registered(1));
        store.set_failing(true);

        match aggregator.list_pending_profiles().await {
            Err(ProfileError::Storage { context, .. }) => assert_eq!(context, "aggregation failed"),
            other => panic!("expected storage error, got {:?}", other),
        }
    }

    #[test]
    fn ties_go_to_highest_primary_key_and_undated_rows_lose() {
        let policy = |id: i32, start: Option<NaiveDate>| InsurancePolicy {
            insurance_id: id,
            driver_id: 1,
            provider: None,
            policy_number: format!("P-{}", id),
            coverage_amount: None,
            start_date: start,
            end_date: None,
        };

        let latest = latest_by_driver(vec![
            policy(9, None),
            policy(3, day(2024, 1, 1)),
            policy(5, day(2024, 1, 1)),
            policy(4, day(2023, 12, 31)),
        ]);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[&1].insurance_id, 5);

        let only_undated = latest_by_driver(vec![policy(2, None), policy(7, None)]);
        assert_eq!(only_undated[&1].insurance_id, 7);
    }
}
