//! Handlers for the `/lineups` resource.
//!
//! Every mutation goes through [`LineupService`](touchline_core::lineup_service::LineupService)
//! and answers with the same read model as `GET /lineups/{id}`, so the
//! pitch editor can redraw from the response alone.

use std::collections::{BTreeMap, HashSet};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Deserializer};
use touchline_core::lineup::LineupError;
use touchline_core::types::{DbId, LineupId, SlotId};
use touchline_db::models::lineup::{LineupDetail, LineupSummary};
use touchline_db::repositories::{LineupRepo, PlayerRepo};

use super::formations::{FormationPreview, FormationRequest};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /lineups`.
#[derive(Debug, Deserialize)]
pub struct CreateLineupRequest {
    pub name: String,
    pub formation: String,
    pub match_id: Option<DbId>,
}

/// Request body for `PUT /lineups/{id}`.
///
/// An absent `match_id` keeps the current link; an explicit `null`
/// detaches the lineup from its match.
#[derive(Debug, Deserialize)]
pub struct UpdateLineupRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub match_id: Option<Option<DbId>>,
}

/// One requested slot binding. A missing `player_id` empties the slot.
#[derive(Debug, Deserialize)]
pub struct AssignmentItem {
    pub slot_id: SlotId,
    pub player_id: Option<DbId>,
}

/// Request body for `PUT /lineups/{id}/assignments`.
#[derive(Debug, Deserialize)]
pub struct AssignmentsRequest {
    pub assignments: Vec<AssignmentItem>,
}

/// Deserialize a field that was present in the payload, even as `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Turn the request list into a slot-keyed map, rejecting repeated slots.
fn assignment_map(items: &[AssignmentItem]) -> AppResult<BTreeMap<SlotId, Option<DbId>>> {
    let mut map = BTreeMap::new();
    for item in items {
        if map.insert(item.slot_id, item.player_id).is_some() {
            return Err(AppError::BadRequest(format!(
                "Slot {} appears more than once",
                item.slot_id
            )));
        }
    }
    Ok(map)
}

async fn detail(state: &AppState, id: LineupId) -> AppResult<LineupDetail> {
    LineupRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Lineup(LineupError::UnknownLineup(id)))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/lineups
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<LineupSummary>>>> {
    let lineups = LineupRepo::list_summaries(&state.pool).await?;
    Ok(Json(DataResponse { data: lineups }))
}

/// POST /api/v1/lineups
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Json(input): Json<CreateLineupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<LineupDetail>>)> {
    let lineup = state
        .lineups()
        .create(&input.name, &input.formation, input.match_id)
        .await?;
    let data = detail(&state, lineup.id()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// GET /api/v1/lineups/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<LineupId>,
) -> AppResult<Json<DataResponse<LineupDetail>>> {
    let data = detail(&state, id).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/lineups/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<LineupId>,
    Json(input): Json<UpdateLineupRequest>,
) -> AppResult<Json<DataResponse<LineupDetail>>> {
    state
        .lineups()
        .update_details(id, input.name.as_deref(), input.match_id)
        .await?;
    let data = detail(&state, id).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/lineups/{id}/assignments
///
/// All-or-nothing: a repeated slot (400), an unknown player (400), a
/// foreign slot (404) or a player placed twice (422) leaves the lineup
/// unchanged.
pub async fn update_assignments(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<LineupId>,
    Json(input): Json<AssignmentsRequest>,
) -> AppResult<Json<DataResponse<LineupDetail>>> {
    let assignments = assignment_map(&input.assignments)?;

    let player_ids: Vec<DbId> = assignments
        .values()
        .flatten()
        .copied()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let missing = PlayerRepo::find_missing(&state.pool, &player_ids).await?;
    if let Some(player_id) = missing.first() {
        return Err(AppError::Lineup(LineupError::InvalidReference(format!(
            "player {player_id} does not exist"
        ))));
    }

    state.lineups().update_assignments(id, &assignments).await?;
    let data = detail(&state, id).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/lineups/{id}/formation
///
/// Regenerates the slots for the new formation. Every slot starts empty.
pub async fn change_formation(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<LineupId>,
    Json(input): Json<FormationRequest>,
) -> AppResult<Json<DataResponse<LineupDetail>>> {
    state
        .lineups()
        .change_formation(id, &input.formation)
        .await?;
    let data = detail(&state, id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/lineups/{id}/formation/preview
pub async fn preview_formation(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<LineupId>,
    Json(input): Json<FormationRequest>,
) -> AppResult<Json<DataResponse<FormationPreview>>> {
    let formation = input.formation.as_str();
    let slots = state.lineups().regenerate_formation(id, formation).await?;
    Ok(Json(DataResponse {
        data: FormationPreview::new(formation, slots),
    }))
}

/// DELETE /api/v1/lineups/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<LineupId>,
) -> AppResult<StatusCode> {
    state.lineups().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
