#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use touchline_api::auth::jwt::{generate_access_token, JwtConfig};
use touchline_api::auth::password::hash_password;
use touchline_api::config::ServerConfig;
use touchline_api::router::build_app_router;
use touchline_api::state::AppState;
use touchline_core::people::StaffFunction;
use touchline_core::roles::Role;
use touchline_db::models::user::{CreatePlayer, CreateStaff, User};
use touchline_db::repositories::{PlayerRepo, UserRepo};

pub const TEST_PASSWORD: &str = "vestiaire-2026";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        player_default_password: "Touchline2026!".to_string(),
        admin_bootstrap: None,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a staff account with the given role, password [`TEST_PASSWORD`].
pub async fn create_staff(pool: &PgPool, email: &str, role: Role) -> User {
    let input = CreateStaff {
        email: email.to_string(),
        first_name: "Didier".to_string(),
        last_name: "Test".to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.as_str().to_string(),
        staff_function: StaffFunction::HeadCoach.as_str().to_string(),
    };
    UserRepo::create_staff(pool, &input)
        .await
        .expect("staff creation should succeed")
}

/// Insert a player and return its id.
pub async fn create_player(pool: &PgPool, first_name: &str, last_name: &str, number: i16) -> i64 {
    let input = CreatePlayer {
        email: format!("{}.{}@club.test", first_name.to_lowercase(), last_name.to_lowercase()),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        position: "midfielder".to_string(),
        jersey_number: Some(number),
        rating: None,
    };
    let hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    PlayerRepo::create(pool, &input, &hash)
        .await
        .expect("player creation should succeed")
        .id
}

/// Bearer token for `user_id` with `role`, signed with the test secret.
pub fn token_for(user_id: i64, role: Role) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

/// Create a coach account and return its token.
pub async fn coach_token(pool: &PgPool) -> String {
    let coach = create_staff(pool, "coach@club.test", Role::Coach).await;
    token_for(coach.id, Role::Coach)
}

/// Create an admin account and return its token.
pub async fn admin_token(pool: &PgPool) -> String {
    let admin = create_staff(pool, "admin@club.test", Role::Admin).await;
    token_for(admin.id, Role::Admin)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, &body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), &body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), &body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
