use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use touchline_core::error::CoreError;
use touchline_core::lineup::LineupError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`LineupError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `touchline_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A lineup editing error from `touchline_core::lineup`.
    #[error(transparent)]
    Lineup(#[from] LineupError),

    /// Request body failed declarative validation.
    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Lineup errors ---
            AppError::Lineup(err) => classify_lineup_error(err),

            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                errors.to_string(),
            ),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_lineup_error(err: &LineupError) -> (StatusCode, &'static str, String) {
    match err {
        LineupError::InvalidFormationFormat(_) => {
            (StatusCode::BAD_REQUEST, "INVALID_FORMATION", err.to_string())
        }
        LineupError::InvalidName(_) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        LineupError::UnknownSlot(_) | LineupError::UnknownLineup(_) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        LineupError::DuplicatePlayerAssignment { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "DUPLICATE_PLAYER_ASSIGNMENT",
            err.to_string(),
        ),
        LineupError::ConcurrentModification(_) => (
            StatusCode::CONFLICT,
            "CONCURRENT_MODIFICATION",
            "The lineup was changed or deleted by someone else, please retry".to_string(),
        ),
        LineupError::InvalidReference(_) => {
            (StatusCode::BAD_REQUEST, "INVALID_REFERENCE", err.to_string())
        }
        LineupError::CorruptLineup(_) | LineupError::Store(_) => {
            tracing::error!(error = %err, "Lineup persistence error");
            internal()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Foreign-key violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            match db_err.code().as_deref() {
                // PostgreSQL unique constraint violation
                Some("23505") => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    if constraint.starts_with("uq_") {
                        return (
                            StatusCode::CONFLICT,
                            "CONFLICT",
                            format!("Duplicate value violates unique constraint: {constraint}"),
                        );
                    }
                }
                // Foreign key violation
                Some("23503") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "INVALID_REFERENCE",
                        "Referenced record does not exist".to_string(),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn status_and_code(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body = body_json(response).await;
        (status, body["code"].as_str().unwrap_or_default().to_string())
    }

    #[tokio::test]
    async fn lineup_errors_map_to_documented_statuses() {
        let id = uuid::Uuid::now_v7();
        let cases = [
            (
                LineupError::InvalidFormationFormat("4-4".into()),
                StatusCode::BAD_REQUEST,
                "INVALID_FORMATION",
            ),
            (
                LineupError::InvalidName("empty".into()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (LineupError::UnknownSlot(id), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (LineupError::UnknownLineup(id), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                LineupError::DuplicatePlayerAssignment {
                    player_id: 7,
                    slot_id: id,
                },
                StatusCode::UNPROCESSABLE_ENTITY,
                "DUPLICATE_PLAYER_ASSIGNMENT",
            ),
            (
                LineupError::ConcurrentModification(id),
                StatusCode::CONFLICT,
                "CONCURRENT_MODIFICATION",
            ),
            (
                LineupError::InvalidReference("player 9".into()),
                StatusCode::BAD_REQUEST,
                "INVALID_REFERENCE",
            ),
            (
                LineupError::Store("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(
                status_and_code(AppError::Lineup(err)).await,
                (status, code.to_string())
            );
        }
    }

    #[tokio::test]
    async fn duplicate_message_names_the_slot() {
        let slot = uuid::Uuid::now_v7();
        let response = AppError::Lineup(LineupError::DuplicatePlayerAssignment {
            player_id: 7,
            slot_id: slot,
        })
        .into_response();
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains(&slot.to_string()));
    }

    #[tokio::test]
    async fn forbidden_maps_to_403() {
        let (status, code) =
            status_and_code(AppError::Core(CoreError::Forbidden("no".into()))).await;
        assert_eq!((status, code.as_str()), (StatusCode::FORBIDDEN, "FORBIDDEN"));
    }

    #[tokio::test]
    async fn row_not_found_maps_to_404() {
        let (status, _) = status_and_code(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
