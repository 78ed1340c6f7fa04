use crate::auth::jwt::JwtConfig;
use crate::auth::password::{validate_password_strength, MIN_PASSWORD_LENGTH};

/// Credentials of the first admin account, created at startup when no
/// admin exists yet.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on draining in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Initial password given to players created by staff.
    pub player_default_password: String,
    pub admin_bootstrap: Option<AdminBootstrap>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                       |
    /// | `PLAYER_DEFAULT_PASSWORD`| `Touchline2026!`           |
    /// | `ADMIN_EMAIL`            | unset (no bootstrap)       |
    /// | `ADMIN_PASSWORD`         | unset (no bootstrap)       |
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers or on a configured password shorter
    /// than [`MIN_PASSWORD_LENGTH`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let player_default_password =
            std::env::var("PLAYER_DEFAULT_PASSWORD").unwrap_or_else(|_| "Touchline2026!".into());
        if let Err(msg) = validate_password_strength(&player_default_password, MIN_PASSWORD_LENGTH)
        {
            panic!("PLAYER_DEFAULT_PASSWORD: {msg}");
        }

        let admin_bootstrap = match (
            std::env::var("ADMIN_EMAIL").ok(),
            std::env::var("ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => {
                if let Err(msg) = validate_password_strength(&password, MIN_PASSWORD_LENGTH) {
                    panic!("ADMIN_PASSWORD: {msg}");
                }
                Some(AdminBootstrap { email, password })
            }
            _ => None,
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            player_default_password,
            admin_bootstrap,
            jwt,
        }
    }
}
