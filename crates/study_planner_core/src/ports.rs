//! crates/study_planner_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the planner's core logic.
//! These traits form the boundary of the hexagonal architecture, keeping the
//! repositories independent of the concrete local store, remote database and
//! analysis service.

use crate::domain::{
    AnalysisRequest, AnalysisResponse, DailyEntry, DateKey, MotivationalMessage, StudyPlan,
    UserKey, WeeklySchedule,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    /// The keyed row or value does not exist. Not a failure for read paths.
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The external service refused the call because a rate or budget limit was hit.
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Synchronous key-value persistence that survives restarts.
///
/// This is the last fallback tier: a failed `set` means the value was not persisted.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PortResult<()>;

    fn remove(&self, key: &str) -> PortResult<()>;
}

/// Table-scoped fetch/upsert against the hosted backend.
///
/// A missing row is reported as `PortError::NotFound`, distinct from every
/// other failure.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    // --- study_plans (single global row) ---
    async fn fetch_plan(&self) -> PortResult<StudyPlan>;

    async fn upsert_plan(&self, plan: &StudyPlan, updated_at: DateTime<Utc>) -> PortResult<()>;

    // --- schedules (one row per user) ---
    async fn fetch_schedule(&self, user: &UserKey) -> PortResult<WeeklySchedule>;

    async fn upsert_schedule(
        &self,
        user: &UserKey,
        schedule: &WeeklySchedule,
        updated_at: DateTime<Utc>,
    ) -> PortResult<()>;

    // --- daily_entries (one row per user and date) ---
    async fn fetch_daily_entry(&self, user: &UserKey, date: &DateKey) -> PortResult<DailyEntry>;

    async fn upsert_daily_entry(
        &self,
        user: &UserKey,
        date: &DateKey,
        entry: &DailyEntry,
        updated_at: DateTime<Utc>,
    ) -> PortResult<()>;
}

#[async_trait]
pub trait DayAnalysisService: Send + Sync {
    /// Reviews a day's reflection against the weekly schedule.
    /// Rate or budget refusals must surface as `PortError::QuotaExceeded`.
    async fn analyze_day(&self, request: &AnalysisRequest) -> PortResult<AnalysisResponse>;

    /// A fresh motivational message, independent of any reflection.
    async fn fresh_inspiration(&self) -> PortResult<MotivationalMessage>;
}
