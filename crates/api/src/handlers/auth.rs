//! Handlers for the `/auth` resource (login, current identity).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use touchline_core::error::CoreError;
use touchline_core::people::UserKind;
use touchline_db::models::user::UserResponse;
use touchline_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Identity of the caller plus their player or staff profile.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub profile: UserKind,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".into(),
    ))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password and return a bearer token.
/// An unknown email and a wrong password produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    input.validate()?;

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Rejected login attempt");
        return Err(invalid_credentials());
    }

    let role = user
        .role()
        .map_err(|e| AppError::InternalError(format!("Stored role is invalid: {e}")))?;
    let access_token = generate_access_token(user.id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %role, "User logged in");

    Ok(Json(DataResponse {
        data: LoginResponse {
            access_token,
            token_type: "Bearer",
            expires_in: state.config.jwt.expires_in_secs(),
            user: UserResponse::from(&user),
        },
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<MeResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    let profile = user
        .kind_payload()
        .map_err(|e| AppError::InternalError(format!("Stored profile is invalid: {e}")))?;
    Ok(Json(DataResponse {
        data: MeResponse {
            user: UserResponse::from(&user),
            profile,
        },
    }))
}
