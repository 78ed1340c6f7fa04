//! First-run seeding of the admin account.

use touchline_core::people::StaffFunction;
use touchline_core::roles::Role;
use touchline_db::models::user::CreateStaff;
use touchline_db::repositories::UserRepo;
use touchline_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// Create the configured admin account unless an admin already exists.
///
/// Returns `true` if an account was created.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<bool> {
    if UserRepo::admin_exists(pool).await? {
        tracing::debug!("Admin account present, skipping bootstrap");
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateStaff {
        email: admin.email.clone(),
        first_name: "Admin".to_string(),
        last_name: "Touchline".to_string(),
        password_hash,
        role: Role::Admin.as_str().to_string(),
        staff_function: StaffFunction::HeadCoach.as_str().to_string(),
    };
    let user = UserRepo::create_staff(pool, &input).await?;
    tracing::info!(user_id = user.id, email = %user.email, "Bootstrapped admin account");
    Ok(true)
}
