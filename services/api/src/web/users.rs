//! services/api/src/web/users.rs
//!
//! Per-user endpoints: the weekly schedule, daily entries, the analysis
//! workflow and the dashboard.

use crate::web::protocol::{
    AddActivityRequest, AnalysisErrorResponse, AnalyzeDayRequest, DashboardResponse,
    EntryResponse, ReplaceScheduleRequest, SaveEntryRequest, ScheduleResponse,
};
use crate::web::rest::{parse_user, HandlerError};
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Datelike;
use std::sync::Arc;
use study_planner_core::domain::{
    todays_focus, DashboardSummary, DateKey, UserProfile, DAYS_OF_WEEK,
};
use study_planner_core::AnalysisError;
use tracing::error;

fn parse_day(day: &str) -> Result<&str, HandlerError> {
    let day = day.trim();
    if DAYS_OF_WEEK.contains(&day) {
        Ok(day)
    } else {
        Err((StatusCode::BAD_REQUEST, format!("Unknown day '{}'", day)))
    }
}

//=========================================================================================
// Schedule Handlers
//=========================================================================================

/// Read a user's weekly schedule.
#[utoipa::path(
    get,
    path = "/users/{name}/schedule",
    responses(
        (status = 200, description = "The user's schedule", body = ScheduleResponse),
        (status = 400, description = "Blank name"),
        (status = 404, description = "The user has no schedule yet")
    ),
    params(("name" = String, Path, description = "Display name; case and surrounding spaces are ignored"))
)]
pub async fn get_schedule_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ScheduleResponse>, HandlerError> {
    let user = parse_user(&name)?;
    let schedule = state
        .schedules
        .get_schedule(&user)
        .await
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("No schedule for {}", user)))?;
    Ok(Json(ScheduleResponse { schedule }))
}

/// Replace a user's whole weekly schedule.
#[utoipa::path(
    put,
    path = "/users/{name}/schedule",
    request_body = ReplaceScheduleRequest,
    responses(
        (status = 200, description = "The saved schedule", body = ScheduleResponse),
        (status = 400, description = "Blank name or unknown day")
    ),
    params(("name" = String, Path, description = "Display name"))
)]
pub async fn replace_schedule_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<ReplaceScheduleRequest>,
) -> Result<Json<ScheduleResponse>, HandlerError> {
    let user = parse_user(&name)?;
    for (day, _) in req.schedule.days() {
        parse_day(day)?;
    }
    let schedule = state.schedules.save_schedule(&user, req.schedule).await;
    Ok(Json(ScheduleResponse { schedule }))
}

/// Append an activity to one day.
#[utoipa::path(
    post,
    path = "/users/{name}/schedule/{day}/activities",
    request_body = AddActivityRequest,
    responses(
        (status = 200, description = "The updated schedule", body = ScheduleResponse),
        (status = 400, description = "Blank name or label, or unknown day")
    ),
    params(
        ("name" = String, Path, description = "Display name"),
        ("day" = String, Path, description = "Arabic day name, e.g. الأحد")
    )
)]
pub async fn add_activity_handler(
    State(state): State<Arc<AppState>>,
    Path((name, day)): Path<(String, String)>,
    Json(req): Json<AddActivityRequest>,
) -> Result<Json<ScheduleResponse>, HandlerError> {
    let user = parse_user(&name)?;
    let day = parse_day(&day)?;
    if req.label.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Activity label must not be blank".to_string()));
    }
    let schedule = state.schedules.add_activity(&user, day, &req.label).await;
    Ok(Json(ScheduleResponse { schedule }))
}

/// Remove the activity at `index` from one day. An out-of-range index changes nothing.
#[utoipa::path(
    delete,
    path = "/users/{name}/schedule/{day}/activities/{index}",
    responses(
        (status = 200, description = "The updated schedule", body = ScheduleResponse),
        (status = 400, description = "Blank name or unknown day")
    ),
    params(
        ("name" = String, Path, description = "Display name"),
        ("day" = String, Path, description = "Arabic day name"),
        ("index" = usize, Path, description = "Zero-based position within the day")
    )
)]
pub async fn remove_activity_handler(
    State(state): State<Arc<AppState>>,
    Path((name, day, index)): Path<(String, String, usize)>,
) -> Result<Json<ScheduleResponse>, HandlerError> {
    let user = parse_user(&name)?;
    let day = parse_day(&day)?;
    let schedule = state.schedules.remove_activity(&user, day, index).await;
    Ok(Json(ScheduleResponse { schedule }))
}

//=========================================================================================
// Daily Entry Handlers
//=========================================================================================

/// Read today's reflection and analysis.
#[utoipa::path(
    get,
    path = "/users/{name}/entries/today",
    responses(
        (status = 200, description = "Today's entry", body = EntryResponse),
        (status = 404, description = "Nothing written yet")
    ),
    params(("name" = String, Path, description = "Display name"))
)]
pub async fn get_today_entry_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<EntryResponse>, HandlerError> {
    let user = parse_user(&name)?;
    let date = state.entries.today();
    let entry = state
        .entries
        .get_entry(&user, &date)
        .await
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("No entry for {}", user)))?;
    Ok(Json(EntryResponse {
        date: date.to_string(),
        entry,
    }))
}

/// Write today's reflection. A missing analysis clears any stored one.
#[utoipa::path(
    put,
    path = "/users/{name}/entries/today",
    request_body = SaveEntryRequest,
    responses(
        (status = 200, description = "The saved entry", body = EntryResponse),
        (status = 400, description = "Blank name")
    ),
    params(("name" = String, Path, description = "Display name"))
)]
pub async fn save_today_entry_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<SaveEntryRequest>,
) -> Result<Json<EntryResponse>, HandlerError> {
    let user = parse_user(&name)?;
    let entry = state.entries.save_entry(&user, req.into_entry()).await;
    Ok(Json(EntryResponse {
        date: state.entries.today().to_string(),
        entry,
    }))
}

/// Read the entry for a given date (YYYY-MM-DD).
///
/// Dated history lives in the remote store; when it cannot answer, the
/// device's latest entry is returned.
#[utoipa::path(
    get,
    path = "/users/{name}/entries/{date}",
    responses(
        (status = 200, description = "The entry", body = EntryResponse),
        (status = 400, description = "Blank name or malformed date"),
        (status = 404, description = "No entry")
    ),
    params(
        ("name" = String, Path, description = "Display name"),
        ("date" = String, Path, description = "Date as YYYY-MM-DD")
    )
)]
pub async fn get_entry_by_date_handler(
    State(state): State<Arc<AppState>>,
    Path((name, date)): Path<(String, String)>,
) -> Result<Json<EntryResponse>, HandlerError> {
    let user = parse_user(&name)?;
    let date = DateKey::parse(&date).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let entry = state
        .entries
        .get_entry(&user, &date)
        .await
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("No entry for {} on {}", user, date)))?;
    Ok(Json(EntryResponse {
        date: date.to_string(),
        entry,
    }))
}

//=========================================================================================
// Analysis and Dashboard
//=========================================================================================

fn analysis_failure(e: AnalysisError) -> (StatusCode, Json<AnalysisErrorResponse>) {
    let (status, kind) = match &e {
        AnalysisError::EmptyReflection | AnalysisError::InvalidInput(_) => {
            (StatusCode::BAD_REQUEST, "invalid_input")
        }
        AnalysisError::QuotaExceeded(_) => (StatusCode::TOO_MANY_REQUESTS, "quota_exceeded"),
        AnalysisError::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        AnalysisError::Failed(_) => (StatusCode::BAD_GATEWAY, "failed"),
    };
    (
        status,
        Json(AnalysisErrorResponse {
            kind: kind.to_string(),
            user_message: e.user_message().to_string(),
        }),
    )
}

/// Analyze today's reflection and save it together with the result.
///
/// Nothing is saved when the analysis fails.
#[utoipa::path(
    post,
    path = "/users/{name}/entries/today/analysis",
    request_body = AnalyzeDayRequest,
    responses(
        (status = 200, description = "The saved entry with its analysis", body = EntryResponse),
        (status = 400, description = "Blank name or reflection", body = AnalysisErrorResponse),
        (status = 429, description = "Analysis quota exceeded", body = AnalysisErrorResponse),
        (status = 502, description = "Analysis failed", body = AnalysisErrorResponse),
        (status = 503, description = "Analysis service not configured", body = AnalysisErrorResponse)
    ),
    params(("name" = String, Path, description = "Display name"))
)]
pub async fn analyze_day_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<AnalyzeDayRequest>,
) -> Result<Json<EntryResponse>, (StatusCode, Json<AnalysisErrorResponse>)> {
    let profile = UserProfile {
        name,
        grade: req.grade,
    };
    let entry = state
        .analysis
        .analyze_and_save(&profile, &req.reflection, req.target_day.as_deref())
        .await
        .map_err(|e| {
            error!(user = %profile.name, error = %e, "Analyze-and-save request failed");
            analysis_failure(e)
        })?;
    Ok(Json(EntryResponse {
        date: state.entries.today().to_string(),
        entry,
    }))
}

/// Headline numbers for the user's dashboard.
#[utoipa::path(
    get,
    path = "/users/{name}/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 400, description = "Blank name")
    ),
    params(("name" = String, Path, description = "Display name"))
)]
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<DashboardResponse>, HandlerError> {
    let user = parse_user(&name)?;
    let latest = state
        .entries
        .get_today(&user)
        .await
        .and_then(|entry| entry.analysis);
    let inspiration = state.analysis.inspiration(latest.as_ref()).await;
    let progress = state.plans.get_plan().await.progress();
    let weekday = state.entries.today().date().weekday();

    Ok(Json(DashboardResponse {
        summary: DashboardSummary::from_analysis(latest.as_ref()),
        inspiration,
        progress,
        todays_focus: todays_focus(weekday),
    }))
}
