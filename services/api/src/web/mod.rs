pub mod middleware;
pub mod profiles;
pub mod protocol;
pub mod rest;
pub mod state;
pub mod users;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

pub use middleware::trace_requests;
pub use rest::ApiDoc;
pub use state::AppState;

/// Every API route, with request tracing applied.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Plan
        .route("/plan", get(rest::get_plan_handler))
        .route("/plan/progress", get(rest::progress_handler))
        .route("/plan/subjects/{subject}/tasks", get(rest::list_tasks_handler))
        .route(
            "/plan/subjects/{subject}/tasks/{task_id}",
            put(rest::set_task_status_handler),
        )
        .route(
            "/plan/subjects/{subject}/tasks/{task_id}/toggle",
            post(rest::toggle_task_handler),
        )
        // Profiles
        .route("/profiles", post(profiles::save_profile_handler))
        .route(
            "/profiles/current",
            get(profiles::current_profile_handler).delete(profiles::logout_handler),
        )
        // Per-user records
        .route(
            "/users/{name}/schedule",
            get(users::get_schedule_handler).put(users::replace_schedule_handler),
        )
        .route(
            "/users/{name}/schedule/{day}/activities",
            post(users::add_activity_handler),
        )
        .route(
            "/users/{name}/schedule/{day}/activities/{index}",
            delete(users::remove_activity_handler),
        )
        .route(
            "/users/{name}/entries/today",
            get(users::get_today_entry_handler).put(users::save_today_entry_handler),
        )
        .route(
            "/users/{name}/entries/today/analysis",
            post(users::analyze_day_handler),
        )
        .route(
            "/users/{name}/entries/{date}",
            get(users::get_entry_by_date_handler),
        )
        .route("/users/{name}/dashboard", get(users::dashboard_handler))
        .layer(axum_middleware::from_fn(trace_requests))
        .with_state(state)
}
