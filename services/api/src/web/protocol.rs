//! services/api/src/web/protocol.rs
//!
//! Request and response payloads exchanged between the presentation layer and
//! the API server that are not core domain types.

use momo_core::domain::StravaActivity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

//=========================================================================================
// Messages Sent FROM the Client TO the Server
//=========================================================================================

/// A new moment as typed by the user. External signals are optional.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMomentRequest {
    pub text: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub strava_activity: Option<StravaActivity>,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client
//=========================================================================================

/// The new state of a toggled action.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ActionToggled {
    pub completed: bool,
}

/// Body of every error response.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}
