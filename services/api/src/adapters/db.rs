//! services/api/src/adapters/db.rs
//!
//! This module contains the remote store adapter, the concrete implementation of
//! the `RemoteStore` port from the `core` crate. It keeps the plan, schedules and
//! daily entries in PostgreSQL using `sqlx`.

use crate::config::RemoteSettings;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use std::time::Duration;
use study_planner_core::domain::{
    AnalysisResponse, DailyEntry, DateKey, StudyPlan, UserKey, WeeklySchedule,
};
use study_planner_core::ports::{PortError, PortResult, RemoteStore};
use uuid::Uuid;

/// The plan table holds a single shared row.
const PLAN_ROW_ID: i32 = 1;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `RemoteStore` port.
#[derive(Clone)]
pub struct PgRemoteStore {
    pool: PgPool,
}

impl PgRemoteStore {
    /// Creates a new `PgRemoteStore`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a lazily connecting pool from the configured URL and key.
    ///
    /// Nothing touches the network here; an unreachable database surfaces as
    /// failed reads and writes, which the repositories already tolerate.
    pub fn connect_lazy(settings: &RemoteSettings, acquire_timeout: Duration) -> Result<Self, sqlx::Error> {
        let options = PgConnectOptions::from_str(&settings.url)?.password(&settings.key);
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(acquire_timeout)
            .connect_lazy_with(options);
        Ok(Self::new(pool))
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn not_found_or_unexpected(what: String) -> impl FnOnce(sqlx::Error) -> PortError {
    move |e| match e {
        sqlx::Error::RowNotFound => PortError::NotFound(what),
        other => PortError::Unexpected(other.to_string()),
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct PlanRecord {
    plan: Json<StudyPlan>,
}
impl PlanRecord {
    fn to_domain(self) -> StudyPlan {
        self.plan.0
    }
}

#[derive(FromRow)]
struct ScheduleRecord {
    data: Json<WeeklySchedule>,
}
impl ScheduleRecord {
    fn to_domain(self) -> WeeklySchedule {
        self.data.0
    }
}

#[derive(FromRow)]
struct DailyEntryRecord {
    reflection: Option<String>,
    analysis: Option<Json<AnalysisResponse>>,
}
impl DailyEntryRecord {
    fn to_domain(self) -> DailyEntry {
        DailyEntry {
            reflection: self.reflection.unwrap_or_default(),
            analysis: self.analysis.map(|a| a.0),
        }
    }
}

//=========================================================================================
// `RemoteStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl RemoteStore for PgRemoteStore {
    async fn fetch_plan(&self) -> PortResult<StudyPlan> {
        let record = sqlx::query_as::<_, PlanRecord>("SELECT plan FROM study_plans WHERE id = $1")
            .bind(PLAN_ROW_ID)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found_or_unexpected("Study plan row not found".to_string()))?;
        Ok(record.to_domain())
    }

    async fn upsert_plan(&self, plan: &StudyPlan, updated_at: DateTime<Utc>) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO study_plans (id, plan, updated_at) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET plan = EXCLUDED.plan, updated_at = EXCLUDED.updated_at",
        )
        .bind(PLAN_ROW_ID)
        .bind(Json(plan))
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn fetch_schedule(&self, user: &UserKey) -> PortResult<WeeklySchedule> {
        let record =
            sqlx::query_as::<_, ScheduleRecord>("SELECT data FROM schedules WHERE user_id = $1")
                .bind(user.remote_id())
                .fetch_one(&self.pool)
                .await
                .map_err(not_found_or_unexpected(format!(
                    "Schedule for {} not found",
                    user.remote_id()
                )))?;
        Ok(record.to_domain())
    }

    async fn upsert_schedule(
        &self,
        user: &UserKey,
        schedule: &WeeklySchedule,
        updated_at: DateTime<Utc>,
    ) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO schedules (id, user_id, data, updated_at) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id) DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(user.remote_id())
        .bind(Json(schedule))
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn fetch_daily_entry(&self, user: &UserKey, date: &DateKey) -> PortResult<DailyEntry> {
        let record = sqlx::query_as::<_, DailyEntryRecord>(
            "SELECT reflection, analysis FROM daily_entries WHERE user_id = $1 AND date = $2",
        )
        .bind(user.remote_id())
        .bind(date.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(not_found_or_unexpected(format!(
            "Daily entry for {} on {} not found",
            user.remote_id(),
            date
        )))?;
        Ok(record.to_domain())
    }

    async fn upsert_daily_entry(
        &self,
        user: &UserKey,
        date: &DateKey,
        entry: &DailyEntry,
        updated_at: DateTime<Utc>,
    ) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO daily_entries (id, user_id, date, reflection, analysis, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             ON CONFLICT (user_id, date) DO UPDATE SET reflection = EXCLUDED.reflection, \
             analysis = EXCLUDED.analysis, updated_at = EXCLUDED.updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(user.remote_id())
        .bind(date.to_string())
        .bind(&entry.reflection)
        .bind(entry.analysis.as_ref().map(Json))
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}
