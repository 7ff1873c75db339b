pub mod protocol;
pub mod rest;
pub mod state;
pub mod story_task;

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

pub use rest::{
    add_moment_handler, calendar_handler, create_story_handler, get_day_handler,
    get_profile_handler, insert_profile_handler, insert_sample_profile_handler,
    story_progress_handler, toggle_action_handler,
};
use state::AppState;

/// Builds the API router. CORS and the Swagger UI are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/days/{date}", get(get_day_handler))
        .route("/days/{date}/moments", post(add_moment_handler))
        .route("/days/{date}/story", post(create_story_handler))
        .route("/days/{date}/story/progress", get(story_progress_handler))
        .route("/days/{date}/actions/{action_id}", patch(toggle_action_handler))
        .route("/calendar/{year}/{month}", get(calendar_handler))
        .route("/profile", get(get_profile_handler).post(insert_profile_handler))
        .route("/profile/sample", post(insert_sample_profile_handler))
        .with_state(app_state)
}
