//! services/api/src/web/profiles.rs
//!
//! Device-local sign-in: save a profile, resume the last one, and log out.

use crate::web::protocol::{ProfileResponse, SaveProfileRequest};
use crate::web::rest::HandlerError;
use crate::web::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use study_planner_core::UserProfile;
use tracing::{info, warn};

/// POST /profiles - Save a profile and make it the current user
#[utoipa::path(
    post,
    path = "/profiles",
    request_body = SaveProfileRequest,
    responses(
        (status = 201, description = "Profile saved", body = ProfileResponse),
        (status = 400, description = "Blank name")
    )
)]
pub async fn save_profile_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), HandlerError> {
    let profile = req.into_profile();
    let key = state.profiles.save_profile(&profile).map_err(|e| {
        warn!(error = %e, "Rejected profile");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let profile = UserProfile {
        name: profile.name.trim().to_string(),
        ..profile
    };
    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse {
            profile,
            key: key.as_str().to_string(),
        }),
    ))
}

/// GET /profiles/current - The profile to resume with
#[utoipa::path(
    get,
    path = "/profiles/current",
    responses(
        (status = 200, description = "Signed-in profile", body = ProfileResponse),
        (status = 404, description = "Nobody is signed in")
    )
)]
pub async fn current_profile_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProfileResponse>, HandlerError> {
    let profile = state
        .profiles
        .last_user()
        .ok_or((StatusCode::NOT_FOUND, "Nobody is signed in".to_string()))?;
    let key = profile
        .key()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(ProfileResponse {
        profile,
        key: key.as_str().to_string(),
    }))
}

/// DELETE /profiles/current - Log out; the user's data stays on the device
#[utoipa::path(
    delete,
    path = "/profiles/current",
    responses(
        (status = 204, description = "Logged out")
    )
)]
pub async fn logout_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    state.profiles.logout();
    info!("Current user logged out");
    StatusCode::NO_CONTENT
}
