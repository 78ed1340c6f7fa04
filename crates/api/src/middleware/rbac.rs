//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and checks its role against a fixed
//! allowed-role set with [`ensure_role`]. A failed check is a 403.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use touchline_core::roles::{ensure_role, Role, ADMIN_ROLES, ALL_ROLES, STAFF_ROLES};

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Check an already-extracted user against `allowed`.
pub fn authorize(user: &AuthUser, allowed: &[Role]) -> AppResult<()> {
    ensure_role(user.role, allowed).map_err(|e| {
        tracing::debug!(user_id = user.user_id, role = %user.role, "Role check failed");
        AppError::Core(e)
    })
}

/// Requires `admin` or `coach`: roster, match and lineup management.
///
/// ```ignore
/// async fn edit(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        authorize(&user, STAFF_ROLES)?;
        Ok(RequireStaff(user))
    }
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        authorize(&user, ADMIN_ROLES)?;
        Ok(RequireAdmin(user))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for route
/// handlers where "authentication required" should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        authorize(&user, ALL_ROLES)?;
        Ok(RequireAuth(user))
    }
}
