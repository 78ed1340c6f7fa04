//! Handlers for match attendance under `/matches/{id}/attendance`.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use touchline_core::attendance::AttendanceStatus;
use touchline_core::error::CoreError;
use touchline_core::types::DbId;
use touchline_db::models::presence::{Presence, RecordPresence, RollCallEntry};
use touchline_db::repositories::{MatchRepo, PlayerRepo, PresenceRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /matches/{id}/attendance/{player_id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordAttendanceRequest {
    pub status: String,
    #[validate(length(max = 500))]
    pub comment: Option<String>,
}

async fn ensure_match(state: &AppState, id: DbId) -> AppResult<()> {
    MatchRepo::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Match",
            id,
        }))
}

/// Blank comments are stored as no comment.
fn normalized_comment(raw: Option<String>) -> Option<String> {
    raw.map(|c| c.trim().to_string()).filter(|c| !c.is_empty())
}

/// PUT /api/v1/matches/{id}/attendance/{player_id}
///
/// Records or replaces the player's attendance. `present` stamps the
/// arrival time; any other status clears it.
pub async fn record(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path((match_id, player_id)): Path<(DbId, DbId)>,
    Json(input): Json<RecordAttendanceRequest>,
) -> AppResult<Json<DataResponse<Presence>>> {
    input.validate()?;
    let status: AttendanceStatus = input.status.parse()?;

    ensure_match(&state, match_id).await?;
    PlayerRepo::find_by_id(&state.pool, player_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Player",
            id: player_id,
        }))?;

    let entry = RecordPresence {
        status: status.as_str().to_string(),
        comment: normalized_comment(input.comment),
        arrived_at: status.arrival_at(Utc::now()),
    };
    let presence = PresenceRepo::upsert(&state.pool, match_id, player_id, &entry).await?;

    tracing::info!(
        match_id,
        player_id,
        status = %status,
        recorded_by = user.user_id,
        "Attendance recorded"
    );

    Ok(Json(DataResponse { data: presence }))
}

/// GET /api/v1/matches/{id}/attendance
///
/// The whole squad, with `null` status for players not yet marked.
pub async fn roll_call(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(match_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<RollCallEntry>>>> {
    ensure_match(&state, match_id).await?;
    let entries = PresenceRepo::roll_call(&state.pool, match_id).await?;
    Ok(Json(DataResponse { data: entries }))
}
