//! Handlers for the `/matches` resource.
//!
//! Creating a match also creates its default lineup in the same
//! transaction, so a match never exists without one.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use touchline_core::error::CoreError;
use touchline_core::fixture::validate_goals;
use touchline_core::lineup_service::{lineup_for_match, MatchRef};
use touchline_core::types::{DbId, LineupId, Timestamp};
use touchline_db::models::fixture::{CreateMatch, MatchListQuery, MatchResponse, UpdateMatch};
use touchline_db::models::lineup::LineupSummary;
use touchline_db::repositories::{LineupRepo, MatchRepo, PgLineupStore};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /matches`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMatchRequest {
    pub kickoff_at: Timestamp,
    #[validate(length(min = 1, max = 100))]
    pub opponent: String,
    #[validate(length(max = 200))]
    pub venue: Option<String>,
    pub is_home: Option<bool>,
}

/// Request body for `PUT /matches/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMatchRequest {
    pub kickoff_at: Option<Timestamp>,
    #[validate(length(min = 1, max = 100))]
    pub opponent: Option<String>,
    #[validate(length(max = 200))]
    pub venue: Option<String>,
    pub is_home: Option<bool>,
}

/// Request body for `PUT /matches/{id}/score`.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub goals_for: i32,
    pub goals_against: i32,
}

/// A newly created match and the lineup created with it.
#[derive(Debug, Serialize)]
pub struct CreatedMatch {
    #[serde(flatten)]
    pub fixture: MatchResponse,
    pub lineup_id: LineupId,
}

/// A match with the lineups prepared for it.
#[derive(Debug, Serialize)]
pub struct MatchWithLineups {
    #[serde(flatten)]
    pub fixture: MatchResponse,
    pub lineups: Vec<LineupSummary>,
}

fn match_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Match",
        id,
    })
}

fn trimmed_opponent(raw: &str) -> AppResult<String> {
    let opponent = raw.trim();
    if opponent.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Opponent must not be blank".to_string(),
        )));
    }
    Ok(opponent.to_string())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/matches?from=&to=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<MatchListQuery>,
) -> AppResult<Json<DataResponse<Vec<MatchResponse>>>> {
    let matches = MatchRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse {
        data: matches.into_iter().map(MatchResponse::from).collect(),
    }))
}

/// POST /api/v1/matches
///
/// Inserts the match and its empty default lineup atomically. A second
/// match on the same calendar day is a 409.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateMatchRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedMatch>>)> {
    input.validate()?;
    let create = CreateMatch {
        kickoff_at: input.kickoff_at,
        opponent: trimmed_opponent(&input.opponent)?,
        venue: input.venue,
        is_home: input.is_home,
    };

    let mut tx = state.pool.begin().await?;
    let fixture = MatchRepo::create_in_tx(&mut tx, &create).await?;
    let lineup = lineup_for_match(&MatchRef {
        id: fixture.id,
        opponent: fixture.opponent.clone(),
    })?;
    PgLineupStore::insert_in_tx(&mut tx, &lineup).await?;
    tx.commit().await?;

    tracing::info!(
        match_id = fixture.id,
        lineup_id = %lineup.id(),
        created_by = user.user_id,
        "Match created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedMatch {
                fixture: MatchResponse::from(fixture),
                lineup_id: lineup.id(),
            },
        }),
    ))
}

/// GET /api/v1/matches/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MatchWithLineups>>> {
    let fixture = MatchRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| match_not_found(id))?;
    let lineups = LineupRepo::list_for_match(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: MatchWithLineups {
            fixture: MatchResponse::from(fixture),
            lineups,
        },
    }))
}

/// PUT /api/v1/matches/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMatchRequest>,
) -> AppResult<Json<DataResponse<MatchResponse>>> {
    input.validate()?;
    let update = UpdateMatch {
        kickoff_at: input.kickoff_at,
        opponent: input.opponent.as_deref().map(trimmed_opponent).transpose()?,
        venue: input.venue,
        is_home: input.is_home,
    };

    let fixture = MatchRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| match_not_found(id))?;
    Ok(Json(DataResponse {
        data: MatchResponse::from(fixture),
    }))
}

/// PUT /api/v1/matches/{id}/score
pub async fn record_score(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<ScoreRequest>,
) -> AppResult<Json<DataResponse<MatchResponse>>> {
    validate_goals(input.goals_for, input.goals_against)?;

    let fixture = MatchRepo::record_score(&state.pool, id, input.goals_for, input.goals_against)
        .await?
        .ok_or_else(|| match_not_found(id))?;
    tracing::info!(match_id = id, score = ?fixture.score(), "Score recorded");
    Ok(Json(DataResponse {
        data: MatchResponse::from(fixture),
    }))
}

/// DELETE /api/v1/matches/{id}
///
/// Admin only. The match's lineups are deleted with it.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MatchRepo::delete(&state.pool, id).await? {
        tracing::info!(match_id = id, deleted_by = user.user_id, "Match deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(match_not_found(id))
    }
}
