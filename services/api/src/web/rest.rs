//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the study plan endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{
    AddActivityRequest, AnalysisErrorResponse, AnalyzeDayRequest, DashboardResponse,
    EntryResponse, PlanResponse, ProfileResponse, ProgressResponse, ReplaceScheduleRequest,
    SaveEntryRequest, SaveProfileRequest, ScheduleResponse, SetTaskStatusRequest,
    TaskListQuery, TaskListResponse,
};
use crate::web::state::AppState;
use crate::web::{profiles, users};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Datelike;
use std::sync::Arc;
use study_planner_core::domain::{todays_focus, SubjectId, UserKey};
use tracing::{info, warn};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        get_plan_handler,
        set_task_status_handler,
        toggle_task_handler,
        list_tasks_handler,
        progress_handler,
        profiles::save_profile_handler,
        profiles::current_profile_handler,
        profiles::logout_handler,
        users::get_schedule_handler,
        users::replace_schedule_handler,
        users::add_activity_handler,
        users::remove_activity_handler,
        users::get_today_entry_handler,
        users::save_today_entry_handler,
        users::get_entry_by_date_handler,
        users::analyze_day_handler,
        users::dashboard_handler,
    ),
    components(
        schemas(
            SetTaskStatusRequest, SaveProfileRequest, ReplaceScheduleRequest,
            AddActivityRequest, SaveEntryRequest, AnalyzeDayRequest, PlanResponse,
            TaskListResponse, ProgressResponse, ProfileResponse, ScheduleResponse,
            EntryResponse, DashboardResponse, AnalysisErrorResponse,
        )
    ),
    tags(
        (name = "Study Planner API", description = "Local-first study plan, schedules and daily reflections.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Shared Extractor Helpers
//=========================================================================================

pub type HandlerError = (StatusCode, String);

pub(crate) fn parse_subject(raw: &str) -> Result<SubjectId, HandlerError> {
    raw.parse::<SubjectId>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

pub(crate) fn parse_user(name: &str) -> Result<UserKey, HandlerError> {
    UserKey::from_name(name).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

//=========================================================================================
// Plan Handlers
//=========================================================================================

/// Read the study plan: remote copy, else local copy, else the seed plan.
#[utoipa::path(
    get,
    path = "/plan",
    responses(
        (status = 200, description = "The current study plan", body = PlanResponse)
    )
)]
pub async fn get_plan_handler(State(state): State<Arc<AppState>>) -> Json<PlanResponse> {
    Json(PlanResponse {
        plan: state.plans.get_plan().await,
    })
}

/// Set one task's completion status. An unknown task id returns the plan unchanged.
#[utoipa::path(
    put,
    path = "/plan/subjects/{subject}/tasks/{task_id}",
    request_body = SetTaskStatusRequest,
    responses(
        (status = 200, description = "The updated plan", body = PlanResponse),
        (status = 400, description = "Unknown subject")
    ),
    params(
        ("subject" = String, Path, description = "english, arabic, chemistry, physics or math"),
        ("task_id" = String, Path, description = "Task id, e.g. phys_3_4")
    )
)]
pub async fn set_task_status_handler(
    State(state): State<Arc<AppState>>,
    Path((subject, task_id)): Path<(String, String)>,
    Json(req): Json<SetTaskStatusRequest>,
) -> Result<Json<PlanResponse>, HandlerError> {
    let subject = parse_subject(&subject)?;
    let current = state.plans.get_plan().await;
    if current.task_status(subject, &task_id).is_none() {
        warn!(%subject, task_id, "Status update for unknown task");
    }

    let plan = state
        .plans
        .update_task_status(&current, subject, &task_id, req.is_completed)
        .await;
    Ok(Json(PlanResponse { plan }))
}

/// Flip one task's completion status. An unknown task id returns the plan unchanged.
#[utoipa::path(
    post,
    path = "/plan/subjects/{subject}/tasks/{task_id}/toggle",
    responses(
        (status = 200, description = "The updated plan", body = PlanResponse),
        (status = 400, description = "Unknown subject")
    ),
    params(
        ("subject" = String, Path, description = "english, arabic, chemistry, physics or math"),
        ("task_id" = String, Path, description = "Task id, e.g. phys_3_4")
    )
)]
pub async fn toggle_task_handler(
    State(state): State<Arc<AppState>>,
    Path((subject, task_id)): Path<(String, String)>,
) -> Result<Json<PlanResponse>, HandlerError> {
    let subject = parse_subject(&subject)?;
    let plan = state.plans.toggle_task(subject, &task_id).await;
    Ok(Json(PlanResponse { plan }))
}

/// List a subject's tasks, grouped by section, filtered and sorted.
#[utoipa::path(
    get,
    path = "/plan/subjects/{subject}/tasks",
    responses(
        (status = 200, description = "Task groups for the subject", body = TaskListResponse),
        (status = 400, description = "Unknown subject or query value")
    ),
    params(
        ("subject" = String, Path, description = "english, arabic, chemistry, physics or math"),
        TaskListQuery
    )
)]
pub async fn list_tasks_handler(
    State(state): State<Arc<AppState>>,
    Path(subject): Path<String>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<TaskListResponse>, HandlerError> {
    let subject = parse_subject(&subject)?;
    let plan = state.plans.get_plan().await;
    let groups = plan
        .subject(subject)
        .map(|data| {
            data.task_groups(
                query.filter.unwrap_or_default(),
                query.sort.unwrap_or_default(),
            )
        })
        .unwrap_or_default();
    Ok(Json(TaskListResponse { groups }))
}

/// Overall progress and the subject to focus on today.
#[utoipa::path(
    get,
    path = "/plan/progress",
    responses(
        (status = 200, description = "Completion counts and today's focus", body = ProgressResponse)
    )
)]
pub async fn progress_handler(State(state): State<Arc<AppState>>) -> Json<ProgressResponse> {
    let progress = state.plans.get_plan().await.progress();
    let weekday = state.entries.today().date().weekday();
    info!(percent = progress.percent, "Progress requested");
    Json(ProgressResponse {
        progress,
        todays_focus: todays_focus(weekday),
    })
}
