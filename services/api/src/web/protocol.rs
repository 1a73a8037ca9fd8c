//! services/api/src/web/protocol.rs
//!
//! Request and response payloads exchanged between the browser client and the
//! API server. Domain documents are embedded as-is and described to OpenAPI as
//! free-form objects.

use serde::{Deserialize, Serialize};
use study_planner_core::domain::{
    AnalysisResponse, DailyEntry, DashboardSummary, GradeLevel, MotivationalMessage, Progress,
    StudyPlan, TaskFilter, TaskGroup, TaskSort, TodaysFocus, UserProfile, WeeklySchedule,
};
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Payloads Sent FROM the Client TO the Server
//=========================================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetTaskStatusRequest {
    pub is_completed: bool,
}

/// Query string for the task listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskListQuery {
    /// `all`, `completed` or `incomplete`.
    #[param(value_type = Option<String>)]
    pub filter: Option<TaskFilter>,
    /// `default`, `duration` or `title`.
    #[param(value_type = Option<String>)]
    pub sort: Option<TaskSort>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveProfileRequest {
    pub name: String,
    #[schema(value_type = String)]
    pub grade: GradeLevel,
}

impl SaveProfileRequest {
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            name: self.name,
            grade: self.grade,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceScheduleRequest {
    #[schema(value_type = Object)]
    pub schedule: WeeklySchedule,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddActivityRequest {
    pub label: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveEntryRequest {
    pub reflection: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub analysis: Option<AnalysisResponse>,
}

impl SaveEntryRequest {
    pub fn into_entry(self) -> DailyEntry {
        DailyEntry {
            reflection: self.reflection,
            analysis: self.analysis,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeDayRequest {
    pub reflection: String,
    #[schema(value_type = String)]
    pub grade: GradeLevel,
    /// Arabic day name; tomorrow when omitted.
    #[serde(default)]
    pub target_day: Option<String>,
}

//=========================================================================================
// Payloads Sent FROM the Server TO the Client
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct PlanResponse {
    #[schema(value_type = Object)]
    pub plan: StudyPlan,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskListResponse {
    #[schema(value_type = Vec<Object>)]
    pub groups: Vec<TaskGroup>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    #[schema(value_type = Object)]
    pub progress: Progress,
    #[schema(value_type = Object)]
    pub todays_focus: TodaysFocus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(value_type = Object)]
    pub profile: UserProfile,
    /// The normalized key the profile's records are stored under.
    pub key: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleResponse {
    #[schema(value_type = Object)]
    pub schedule: WeeklySchedule,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EntryResponse {
    pub date: String,
    #[schema(value_type = Object)]
    pub entry: DailyEntry,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[schema(value_type = Object)]
    pub summary: DashboardSummary,
    #[schema(value_type = Object)]
    pub inspiration: MotivationalMessage,
    #[schema(value_type = Object)]
    pub progress: Progress,
    #[schema(value_type = Object)]
    pub todays_focus: TodaysFocus,
}

/// Error body for analysis failures, carrying the message meant for the student.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisErrorResponse {
    pub kind: String,
    pub user_message: String,
}
