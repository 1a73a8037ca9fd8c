//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use chrono::NaiveDate;
use std::sync::Arc;
use study_planner_core::ports::{DayAnalysisService, LocalStore};
use study_planner_core::{
    DailyAnalysis, DailyEntryRepository, PlanRepository, ProfileStore, RemoteSync,
    ScheduleRepository,
};

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub plans: PlanRepository,
    pub schedules: ScheduleRepository,
    pub entries: DailyEntryRepository,
    pub profiles: ProfileStore,
    pub analysis: Arc<DailyAnalysis>,
    /// Shared by every repository; drained at shutdown.
    pub sync: RemoteSync,
}

impl AppState {
    /// Wires every repository to the same local store and remote tier.
    pub fn new(
        config: Arc<Config>,
        local: Arc<dyn LocalStore>,
        sync: RemoteSync,
        analysis_service: Option<Arc<dyn DayAnalysisService>>,
    ) -> Self {
        Self::with_clock(config, local, sync, analysis_service, None)
    }

    /// Like `new`, with a fixed clock for dating daily entries.
    pub fn with_clock(
        config: Arc<Config>,
        local: Arc<dyn LocalStore>,
        sync: RemoteSync,
        analysis_service: Option<Arc<dyn DayAnalysisService>>,
        today: Option<fn() -> NaiveDate>,
    ) -> Self {
        let plans = PlanRepository::new(local.clone(), sync.clone());
        let schedules = ScheduleRepository::new(local.clone(), sync.clone());
        let mut entries = DailyEntryRepository::new(local.clone(), sync.clone());
        if let Some(today) = today {
            entries = entries.with_clock(today);
        }
        let profiles = ProfileStore::new(local);
        let analysis = Arc::new(DailyAnalysis::new(
            analysis_service,
            schedules.clone(),
            entries.clone(),
        ));

        Self {
            config,
            plans,
            schedules,
            entries,
            profiles,
            analysis,
            sync,
        }
    }
}
