//! crates/study_planner_core/src/analysis.rs
//!
//! Runs a day's reflection through the analysis service and records the result.
//! Analysis failures are the one error class meant to reach the end user.

use crate::domain::{
    day_name, AnalysisRequest, AnalysisResponse, DailyEntry, MotivationalMessage, UserProfile,
};
use crate::ports::{DayAnalysisService, PortError};
use crate::repository::{DailyEntryRepository, ScheduleRepository};
use chrono::{Datelike, Days};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Reflection is empty")]
    EmptyReflection,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Analysis service is not configured")]
    Unavailable,
    #[error("Analysis quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("Analysis failed: {0}")]
    Failed(String),
}

impl AnalysisError {
    /// The message shown to the student for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalysisError::EmptyReflection => "اكتب ما حدث في يومك أولاً.",
            AnalysisError::InvalidInput(_) => "البيانات المدخلة غير صحيحة.",
            AnalysisError::Unavailable => "خدمة التحليل غير متاحة حالياً.",
            AnalysisError::QuotaExceeded(_) => {
                "لقد وصلت للحد المسموح من التحليلات، حاول مرة أخرى لاحقاً."
            }
            AnalysisError::Failed(_) => "حدث خطأ أثناء تحليل يومك، حاول مرة أخرى.",
        }
    }
}

impl From<PortError> for AnalysisError {
    fn from(e: PortError) -> Self {
        match e {
            PortError::QuotaExceeded(msg) => AnalysisError::QuotaExceeded(msg),
            PortError::InvalidInput(msg) => AnalysisError::InvalidInput(msg),
            other => AnalysisError::Failed(other.to_string()),
        }
    }
}

pub struct DailyAnalysis {
    service: Option<Arc<dyn DayAnalysisService>>,
    schedules: ScheduleRepository,
    entries: DailyEntryRepository,
}

impl DailyAnalysis {
    pub fn new(
        service: Option<Arc<dyn DayAnalysisService>>,
        schedules: ScheduleRepository,
        entries: DailyEntryRepository,
    ) -> Self {
        Self {
            service,
            schedules,
            entries,
        }
    }

    /// Analyzes `reflection` for `target_day` (tomorrow when omitted) and, only
    /// on success, saves reflection and analysis together as today's entry.
    pub async fn analyze_and_save(
        &self,
        profile: &UserProfile,
        reflection: &str,
        target_day: Option<&str>,
    ) -> Result<DailyEntry, AnalysisError> {
        let reflection = reflection.trim();
        if reflection.is_empty() {
            return Err(AnalysisError::EmptyReflection);
        }
        let user = profile.key()?;
        let service = self.service.as_ref().ok_or(AnalysisError::Unavailable)?;

        let request = AnalysisRequest {
            reflection: reflection.to_string(),
            weekly_schedule: self.schedules.get_schedule(&user).await.unwrap_or_default(),
            target_day: match target_day {
                Some(day) => day.to_string(),
                None => self.tomorrow(),
            },
            grade: profile.grade,
        };

        let analysis = service.analyze_day(&request).await.map_err(|e| {
            let e = AnalysisError::from(e);
            error!(user = %user, error = %e, "Day analysis failed; nothing persisted");
            e
        })?;

        info!(user = %user, balance = analysis.balance_score, "Day analysis complete");
        let entry = DailyEntry {
            reflection: request.reflection,
            analysis: Some(analysis),
        };
        Ok(self.entries.save_entry(&user, entry).await)
    }

    /// A fresh message from the service, else the last analysis's message,
    /// else a fixed default. Never fails.
    pub async fn inspiration(&self, last: Option<&AnalysisResponse>) -> MotivationalMessage {
        if let Some(service) = &self.service {
            match service.fresh_inspiration().await {
                Ok(message) => return message,
                Err(e) => warn!(error = %e, "Fresh inspiration unavailable"),
            }
        }
        last.map(|analysis| analysis.motivational_message.clone())
            .unwrap_or_else(MotivationalMessage::fallback)
    }

    fn tomorrow(&self) -> String {
        let today = self.entries.today().date();
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
        day_name(tomorrow.weekday()).to_string()
    }
}
