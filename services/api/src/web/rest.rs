//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{
    protocol::{ActionToggled, ErrorBody, NewMomentRequest},
    state::AppState,
    story_task::{story_process, StoryProgress},
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{Local, NaiveDate};
use momo_core::{
    domain::{Emotion, Moment, UserProfile, VaultReceipt},
    ports::PortError,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        add_moment_handler,
        get_day_handler,
        create_story_handler,
        story_progress_handler,
        toggle_action_handler,
        calendar_handler,
        get_profile_handler,
        insert_profile_handler,
        insert_sample_profile_handler,
    ),
    components(
        schemas(NewMomentRequest, ActionToggled, ErrorBody, StoryProgress)
    ),
    tags(
        (name = "Momo API", description = "Moments, daily stories and the vaulted user profile.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Mapping
//=========================================================================================

type ApiFailure = (StatusCode, Json<ErrorBody>);

fn failure(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Maps a port error onto an HTTP status, keeping its message for the UI.
pub fn port_failure(err: PortError) -> ApiFailure {
    let status = match &err {
        PortError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        PortError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
        PortError::Network(_) | PortError::Service { .. } | PortError::MalformedResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
        PortError::InFlight(_) => StatusCode::CONFLICT,
    };
    failure(status, err.to_string())
}

//=========================================================================================
// Day Handlers
//=========================================================================================

/// Log a new moment for a date.
#[utoipa::path(
    post,
    path = "/days/{date}/moments",
    request_body = NewMomentRequest,
    params(("date" = String, Path, description = "Calendar date, YYYY-MM-DD")),
    responses(
        (status = 201, description = "The stored moment with its derived emotion and tags"),
        (status = 400, description = "Blank text", body = ErrorBody)
    )
)]
pub async fn add_moment_handler(
    State(app_state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
    Json(request): Json<NewMomentRequest>,
) -> Result<impl IntoResponse, ApiFailure> {
    let mut moment = Moment::record(
        &request.text,
        app_state.classifier.as_ref(),
        Local::now().time(),
    )
    .map_err(port_failure)?;
    moment.location = request.location;
    moment.weather = request.weather;
    moment.strava_activity = request.strava_activity;

    app_state.store.write().await.add_moment(date, moment.clone());
    info!(%date, emotion = Emotion::label(moment.emotion), "Moment saved.");
    Ok((StatusCode::CREATED, Json(moment)))
}

/// Fetch a date's moments and summary. Unknown dates are empty.
#[utoipa::path(
    get,
    path = "/days/{date}",
    params(("date" = String, Path, description = "Calendar date, YYYY-MM-DD")),
    responses((status = 200, description = "The day's moments and optional summary"))
)]
pub async fn get_day_handler(
    State(app_state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
) -> impl IntoResponse {
    Json(app_state.store.read().await.get(date))
}

/// Generate the daily story for a date and store it.
///
/// The response is sent once the processing steps have run and the summary
/// has been written. If the client goes away, the task still finishes and
/// stores its result under the requested date.
#[utoipa::path(
    post,
    path = "/days/{date}/story",
    params(("date" = String, Path, description = "Calendar date, YYYY-MM-DD")),
    responses(
        (status = 200, description = "The generated summary"),
        (status = 400, description = "Nothing to summarize", body = ErrorBody),
        (status = 409, description = "A story for this date is already running", body = ErrorBody),
        (status = 502, description = "The text-generation service failed", body = ErrorBody),
        (status = 503, description = "Text generation is not configured", body = ErrorBody)
    )
)]
pub async fn create_story_handler(
    State(app_state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
) -> Result<impl IntoResponse, ApiFailure> {
    let task = tokio::spawn(story_process(app_state.clone(), date));
    match task.await {
        Ok(result) => result.map(Json).map_err(port_failure),
        Err(e) => {
            error!("Story task panicked: {:?}", e);
            Err(failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate story",
            ))
        }
    }
}

/// Current step of a running story task.
#[utoipa::path(
    get,
    path = "/days/{date}/story/progress",
    params(("date" = String, Path, description = "Calendar date, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Active step", body = StoryProgress),
        (status = 404, description = "No story is being written for this date", body = ErrorBody)
    )
)]
pub async fn story_progress_handler(
    State(app_state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<StoryProgress>, ApiFailure> {
    app_state
        .stories
        .progress(date)
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "No story in progress"))
}

/// Toggle whether a summary action is done.
#[utoipa::path(
    patch,
    path = "/days/{date}/actions/{action_id}",
    params(
        ("date" = String, Path, description = "Calendar date, YYYY-MM-DD"),
        ("action_id" = String, Path, description = "Action id within the summary")
    ),
    responses(
        (status = 200, description = "New completion state", body = ActionToggled),
        (status = 404, description = "No such action", body = ErrorBody)
    )
)]
pub async fn toggle_action_handler(
    State(app_state): State<Arc<AppState>>,
    Path((date, action_id)): Path<(NaiveDate, String)>,
) -> Result<Json<ActionToggled>, ApiFailure> {
    app_state
        .store
        .write()
        .await
        .toggle_action(date, &action_id)
        .map(|completed| Json(ActionToggled { completed }))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "No such action"))
}

/// Overview of every stored day in a month.
#[utoipa::path(
    get,
    path = "/calendar/{year}/{month}",
    params(
        ("year" = i32, Path, description = "Calendar year"),
        ("month" = u32, Path, description = "Month, 1-12")
    ),
    responses(
        (status = 200, description = "Days with moments or a summary, in date order"),
        (status = 400, description = "Month out of range", body = ErrorBody)
    )
)]
pub async fn calendar_handler(
    State(app_state): State<Arc<AppState>>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<impl IntoResponse, ApiFailure> {
    if !(1..=12).contains(&month) {
        return Err(failure(StatusCode::BAD_REQUEST, "Month must be between 1 and 12"));
    }
    Ok(Json(app_state.store.read().await.month(year, month)))
}

//=========================================================================================
// Profile Handlers
//=========================================================================================

/// Fetch the stored profile in plain text.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "The profile"),
        (status = 404, description = "No profile stored", body = ErrorBody),
        (status = 502, description = "Vault failure", body = ErrorBody),
        (status = 503, description = "Vault not configured", body = ErrorBody)
    )
)]
pub async fn get_profile_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiFailure> {
    match app_state.vault.fetch_profile().await.map_err(port_failure)? {
        Some(profile) => Ok(Json(profile)),
        None => Err(failure(StatusCode::NOT_FOUND, "No profile stored")),
    }
}

/// Store a profile in the vault.
#[utoipa::path(
    post,
    path = "/profile",
    request_body(
        content = Object,
        content_type = "application/json",
        description = "Profile fields; every field is optional but at least one is required"
    ),
    responses(
        (status = 201, description = "The vault id and any tokens"),
        (status = 400, description = "Empty profile", body = ErrorBody),
        (status = 502, description = "Vault failure", body = ErrorBody),
        (status = 503, description = "Vault not configured", body = ErrorBody)
    )
)]
pub async fn insert_profile_handler(
    State(app_state): State<Arc<AppState>>,
    Json(profile): Json<UserProfile>,
) -> Result<impl IntoResponse, ApiFailure> {
    if profile.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Profile has no fields"));
    }
    store_profile(&app_state, profile).await
}

/// Store the sample profile, optionally overridden by the fields in the body.
#[utoipa::path(
    post,
    path = "/profile/sample",
    request_body(
        content = Object,
        content_type = "application/json",
        description = "Optional profile fields that replace the sample's"
    ),
    responses(
        (status = 201, description = "The vault id and any tokens"),
        (status = 502, description = "Vault failure", body = ErrorBody),
        (status = 503, description = "Vault not configured", body = ErrorBody)
    )
)]
pub async fn insert_sample_profile_handler(
    State(app_state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiFailure> {
    let profile = if body.iter().all(u8::is_ascii_whitespace) {
        UserProfile::sample()
    } else {
        let partial: UserProfile = serde_json::from_slice(&body).map_err(|e| {
            failure(StatusCode::BAD_REQUEST, format!("Invalid profile JSON: {e}"))
        })?;
        UserProfile::sample().overlay(partial)
    };
    store_profile(&app_state, profile).await
}

async fn store_profile(
    app_state: &AppState,
    profile: UserProfile,
) -> Result<(StatusCode, Json<VaultReceipt>), ApiFailure> {
    match app_state.vault.insert_profile(&profile).await {
        Ok(receipt) => Ok((StatusCode::CREATED, Json(receipt))),
        Err(e) => {
            warn!(error = %e, "Failed to store profile.");
            Err(port_failure(e))
        }
    }
}
