use async_trait::async_trait;
use sqlx::PgPool;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::DatabaseConfig;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{
    BackgroundCheck, BankingDetails, BankingUpdate, Driver, InsurancePolicy, NewBackgroundCheck,
    NewInsurancePolicy, SatelliteRecord, VehicleRecord, VehicleUpdate,
};
use crate::database::store::{DriverScope, OnboardingStore};

const DRIVER_COLUMNS: &str = "driver_id, first_name, last_name, email, phone_number, \
     license_number, license_state, license_expiry, status, registration_date";

const VEHICLE_COLUMNS: &str = "vehicle_id, driver_id, vin, make, model, year, license_plate, \
     color, inspection_date, inspection_status";

const BACKGROUND_CHECK_COLUMNS: &str = "check_id, driver_id, provider, check_type, status, notes, check_date";

const INSURANCE_COLUMNS: &str = "insurance_id, driver_id, provider, policy_number, coverage_amount, \
     start_date, end_date";

const BANKING_COLUMNS: &str = "banking_id, driver_id, bank_name, account_holder_name, account_number, \
     routing_number, created_at";

/// Newest-first ordering per satellite table: recency column, then primary key
fn recency_order(recency: &str, pk: &str) -> String {
    format!("{} DESC NULLS LAST, {} DESC", recency, pk)
}

/// Top-1-per-driver read over a batch of driver ids
fn latest_per_driver_sql<R: SatelliteRecord>(columns: &str, recency: &str, pk: &str) -> String {
    format!(
        "SELECT DISTINCT ON (driver_id) {} FROM {} WHERE driver_id = ANY($1) ORDER BY driver_id, {}",
        columns,
        R::KIND.table(),
        recency_order(recency, pk)
    )
}

fn history_sql<R: SatelliteRecord>(columns: &str, recency: &str, pk: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE driver_id = $1 ORDER BY {}",
        columns,
        R::KIND.table(),
        recency_order(recency, pk)
    )
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    slow_query_threshold: Option<Duration>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            slow_query_threshold: None,
        }
    }

    /// Build the pool from configuration and wrap it
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::connect_lazy(config)?;
        let store = Self::new(pool);
        Ok(if config.enable_slow_query_warning {
            store.with_slow_query_warning(Duration::from_millis(config.slow_query_threshold_ms))
        } else {
            store
        })
    }

    pub fn with_slow_query_warning(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    async fn timed<T, F>(&self, label: &'static str, query: F) -> Result<T, sqlx::Error>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        let started = Instant::now();
        let result = query.await;
        let elapsed = started.elapsed();

        match self.slow_query_threshold {
            Some(threshold) if elapsed > threshold => {
                warn!("Slow query {}: {}ms (threshold {}ms)", label, elapsed.as_millis(), threshold.as_millis());
            }
            _ => debug!("Query {} took {}ms", label, elapsed.as_millis()),
        }

        result
    }
}

#[async_trait]
impl OnboardingStore for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn driver(&self, driver_id: i32) -> Result<Option<Driver>, DatabaseError> {
        let sql = format!("SELECT {} FROM drivers WHERE driver_id = $1", DRIVER_COLUMNS);
        let row = self
            .timed(
                "driver",
                sqlx::query_as::<_, Driver>(&sql).bind(driver_id).fetch_optional(&self.pool),
            )
            .await?;
        Ok(row)
    }

    async fn drivers(&self, scope: DriverScope) -> Result<Vec<Driver>, DatabaseError> {
        let (sql, status) = match scope {
            DriverScope::WithStatus(status) => (
                format!(
                    "SELECT {} FROM drivers WHERE status = $1 ORDER BY registration_date DESC, driver_id DESC",
                    DRIVER_COLUMNS
                ),
                status,
            ),
            DriverScope::PendingFirst(status) => (
                format!(
                    "SELECT {} FROM drivers ORDER BY (status = $1) DESC, registration_date DESC, driver_id DESC",
                    DRIVER_COLUMNS
                ),
                status,
            ),
        };

        let rows = self
            .timed(
                "drivers",
                sqlx::query_as::<_, Driver>(&sql).bind(status).fetch_all(&self.pool),
            )
            .await?;
        Ok(rows)
    }

    async fn vehicles_for_drivers(&self, driver_ids: &[i32]) -> Result<Vec<VehicleRecord>, DatabaseError> {
        let sql = latest_per_driver_sql::<VehicleRecord>(VEHICLE_COLUMNS, "inspection_date", "vehicle_id");
        let rows = self
            .timed(
                "vehicles_for_drivers",
                sqlx::query_as::<_, VehicleRecord>(&sql).bind(driver_ids).fetch_all(&self.pool),
            )
            .await?;
        Ok(rows)
    }

    async fn background_checks_for_drivers(
        &self,
        driver_ids: &[i32],
    ) -> Result<Vec<BackgroundCheck>, DatabaseError> {
        let sql = latest_per_driver_sql::<BackgroundCheck>(BACKGROUND_CHECK_COLUMNS, "check_date", "check_id");
        let rows = self
            .timed(
                "background_checks_for_drivers",
                sqlx::query_as::<_, BackgroundCheck>(&sql).bind(driver_ids).fetch_all(&self.pool),
            )
            .await?;
        Ok(rows)
    }

    async fn insurance_for_drivers(&self, driver_ids: &[i32]) -> Result<Vec<InsurancePolicy>, DatabaseError> {
        let sql = latest_per_driver_sql::<InsurancePolicy>(INSURANCE_COLUMNS, "start_date", "insurance_id");
        let rows = self
            .timed(
                "insurance_for_drivers",
                sqlx::query_as::<_, InsurancePolicy>(&sql).bind(driver_ids).fetch_all(&self.pool),
            )
            .await?;
        Ok(rows)
    }

    async fn banking_for_drivers(&self, driver_ids: &[i32]) -> Result<Vec<BankingDetails>, DatabaseError> {
        let sql = latest_per_driver_sql::<BankingDetails>(BANKING_COLUMNS, "created_at", "banking_id");
        let rows = self
            .timed(
                "banking_for_drivers",
                sqlx::query_as::<_, BankingDetails>(&sql).bind(driver_ids).fetch_all(&self.pool),
            )
            .await?;
        Ok(rows)
    }

    async fn vehicles(&self, driver_id: i32) -> Result<Vec<VehicleRecord>, DatabaseError> {
        let sql = history_sql::<VehicleRecord>(VEHICLE_COLUMNS, "inspection_date", "vehicle_id");
        let rows = self
            .timed(
                "vehicles",
                sqlx::query_as::<_, VehicleRecord>(&sql).bind(driver_id).fetch_all(&self.pool),
            )
            .await?;
        Ok(rows)
    }

    async fn background_checks(&self, driver_id: i32) -> Result<Vec<BackgroundCheck>, DatabaseError> {
        let sql = history_sql::<BackgroundCheck>(BACKGROUND_CHECK_COLUMNS, "check_date", "check_id");
        let rows = self
            .timed(
                "background_checks",
                sqlx::query_as::<_, BackgroundCheck>(&sql).bind(driver_id).fetch_all(&self.pool),
            )
            .await?;
        Ok(rows)
    }

    async fn insurance(&self, driver_id: i32) -> Result<Vec<InsurancePolicy>, DatabaseError> {
        let sql = history_sql::<InsurancePolicy>(INSURANCE_COLUMNS, "start_date", "insurance_id");
        let rows = self
            .timed(
                "insurance",
                sqlx::query_as::<_, InsurancePolicy>(&sql).bind(driver_id).fetch_all(&self.pool),
            )
            .await?;
        Ok(rows)
    }

    async fn banking(&self, driver_id: i32) -> Result<Option<BankingDetails>, DatabaseError> {
        let sql = format!(
            "{} LIMIT 1",
            history_sql::<BankingDetails>(BANKING_COLUMNS, "created_at", "banking_id")
        );
        let row = self
            .timed(
                "banking",
                sqlx::query_as::<_, BankingDetails>(&sql).bind(driver_id).fetch_optional(&self.pool),
            )
            .await?;
        Ok(row)
    }

    async fn set_driver_status(&self, driver_id: i32, status: &str) -> Result<Option<Driver>, DatabaseError> {
        let sql = format!(
            "UPDATE drivers SET status = $2 WHERE driver_id = $1 RETURNING {}",
            DRIVER_COLUMNS
        );
        let row = self
            .timed(
                "set_driver_status",
                sqlx::query_as::<_, Driver>(&sql)
                    .bind(driver_id)
                    .bind(status)
                    .fetch_optional(&self.pool),
            )
            .await?;
        Ok(row)
    }

    async fn upsert_vehicle(&self, update: &VehicleUpdate) -> Result<VehicleRecord, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO vehicles
                (driver_id, vin, make, model, year, license_plate, color, inspection_date, inspection_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (vin) DO UPDATE SET
                driver_id = EXCLUDED.driver_id,
                make = EXCLUDED.make,
                model = EXCLUDED.model,
                year = EXCLUDED.year,
                license_plate = EXCLUDED.license_plate,
                color = EXCLUDED.color,
                inspection_date = EXCLUDED.inspection_date,
                inspection_status = EXCLUDED.inspection_status
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        );
        self.timed(
            "upsert_vehicle",
            sqlx::query_as::<_, VehicleRecord>(&sql)
                .bind(update.driver_id)
                .bind(&update.vin)
                .bind(&update.make)
                .bind(&update.model)
                .bind(update.year)
                .bind(&update.license_plate)
                .bind(&update.color)
                .bind(update.inspection_date)
                .bind(&update.inspection_status)
                .fetch_one(&self.pool),
        )
        .await
        .map_err(|e| DatabaseError::from_write(e, update.driver_id))
    }

    async fn insert_background_check(&self, check: &NewBackgroundCheck) -> Result<BackgroundCheck, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO background_checks (driver_id, provider, check_type, status, notes, check_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BACKGROUND_CHECK_COLUMNS
        );
        self.timed(
            "insert_background_check",
            sqlx::query_as::<_, BackgroundCheck>(&sql)
                .bind(check.driver_id)
                .bind(&check.provider)
                .bind(&check.check_type)
                .bind(&check.status)
                .bind(&check.notes)
                .bind(check.check_date)
                .fetch_one(&self.pool),
        )
        .await
        .map_err(|e| DatabaseError::from_write(e, check.driver_id))
    }

    async fn insert_insurance(&self, policy: &NewInsurancePolicy) -> Result<InsurancePolicy, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO insurance (driver_id, provider, policy_number, coverage_amount, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            INSURANCE_COLUMNS
        );
        self.timed(
            "insert_insurance",
            sqlx::query_as::<_, InsurancePolicy>(&sql)
                .bind(policy.driver_id)
                .bind(&policy.provider)
                .bind(&policy.policy_number)
                .bind(policy.coverage_amount)
                .bind(policy.start_date)
                .bind(policy.end_date)
                .fetch_one(&self.pool),
        )
        .await
        .map_err(|e| DatabaseError::from_write(e, policy.driver_id))
    }

    async fn upsert_banking(&self, update: &BankingUpdate) -> Result<BankingDetails, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO banking (driver_id, bank_name, account_holder_name, account_number, routing_number)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (driver_id) DO UPDATE SET
                bank_name = EXCLUDED.bank_name,
                account_holder_name = EXCLUDED.account_holder_name,
                account_number = EXCLUDED.account_number,
                routing_number = EXCLUDED.routing_number
            RETURNING {}
            "#,
            BANKING_COLUMNS
        );
        self.timed(
            "upsert_banking",
            sqlx::query_as::<_, BankingDetails>(&sql)
                .bind(update.driver_id)
                .bind(&update.bank_name)
                .bind(&update.account_holder_name)
                .bind(&update.account_number)
                .bind(&update.routing_number)
                .fetch_one(&self.pool),
        )
        .await
        .map_err(|e| DatabaseError::from_write(e, update.driver_id))
    }
}
