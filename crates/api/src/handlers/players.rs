//! Handlers for the `/players` resource.
//!
//! All handlers require a staff role via [`RequireStaff`]. New players get
//! the configured default password and the `player` role.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use touchline_core::error::CoreError;
use touchline_core::people::{validate_jersey_number, validate_rating, PlayerPosition};
use touchline_core::types::DbId;
use touchline_db::models::user::{CreatePlayer, Player, UpdatePlayer};
use touchline_db::repositories::PlayerRepo;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /players`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlayerRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    pub position: String,
    pub jersey_number: Option<i16>,
    pub rating: Option<f32>,
}

/// Request body for `PUT /players/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlayerRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub jersey_number: Option<i16>,
    pub rating: Option<f32>,
}

/// Parse a position name into its canonical stored form.
fn parse_position(raw: &str) -> Result<String, CoreError> {
    raw.parse::<PlayerPosition>().map(|p| p.as_str().to_string())
}

fn check_player_fields(jersey_number: Option<i16>, rating: Option<f32>) -> AppResult<()> {
    validate_jersey_number(jersey_number)?;
    if let Some(rating) = rating {
        validate_rating(rating)?;
    }
    Ok(())
}

fn player_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Player",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/players
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<Player>>>> {
    let players = PlayerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: players }))
}

/// POST /api/v1/players
///
/// A duplicate email or jersey number is a 409.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreatePlayerRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Player>>)> {
    input.validate()?;
    check_player_fields(input.jersey_number, input.rating)?;

    let create = CreatePlayer {
        email: input.email.trim().to_string(),
        first_name: input.first_name.trim().to_string(),
        last_name: input.last_name.trim().to_string(),
        position: parse_position(&input.position)?,
        jersey_number: input.jersey_number,
        rating: input.rating,
    };

    let password_hash = hash_password(&state.config.player_default_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let player = PlayerRepo::create(&state.pool, &create, &password_hash).await?;
    tracing::info!(player_id = player.id, created_by = user.user_id, "Player created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: player })))
}

/// GET /api/v1/players/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Player>>> {
    let player = PlayerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| player_not_found(id))?;
    Ok(Json(DataResponse { data: player }))
}

/// PUT /api/v1/players/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlayerRequest>,
) -> AppResult<Json<DataResponse<Player>>> {
    input.validate()?;
    check_player_fields(input.jersey_number, input.rating)?;

    let update = UpdatePlayer {
        email: input.email.map(|s| s.trim().to_string()),
        first_name: input.first_name.map(|s| s.trim().to_string()),
        last_name: input.last_name.map(|s| s.trim().to_string()),
        position: input.position.as_deref().map(parse_position).transpose()?,
        jersey_number: input.jersey_number,
        rating: input.rating,
    };

    let player = PlayerRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| player_not_found(id))?;
    Ok(Json(DataResponse { data: player }))
}

/// DELETE /api/v1/players/{id}
///
/// Lineup slots holding the player become empty.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PlayerRepo::delete(&state.pool, id).await? {
        tracing::info!(player_id = id, deleted_by = user.user_id, "Player deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(player_not_found(id))
    }
}
