//! crates/study_planner_core/src/domain/mod.rs
//!
//! Defines the pure, core data structures for the study planner.
//! The JSON shape of every document matches what is persisted locally and
//! remotely, so field names stay camelCase on the wire.

pub mod entry;
pub mod plan;
pub mod profile;
pub mod schedule;

pub use entry::{
    AnalysisRequest, AnalysisResponse, ConnectionType, DailyEntry, DashboardSummary, DateKey,
    DaySummary, EffortType, EvidenceStrength, MessageCategory, MotivationalMessage, PlanItem,
    PlanItemType, PsychologicalSupport, QuranicLink, ResearchConnection, StressLevel,
    StudyMethod, WebAnalysis, WebSource,
};
pub use plan::{
    todays_focus, Progress, Section, StudyPlan, SubjectData, SubjectId, SubjectTasks, Task,
    TaskFilter, TaskGroup, TaskSort, TodaysFocus,
};
pub use profile::{GradeLevel, UserKey, UserProfile};
pub use schedule::{day_name, WeeklySchedule, DAYS_OF_WEEK};
