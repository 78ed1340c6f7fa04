//! HTTP-level tests for login, identity and role enforcement.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, TEST_PASSWORD};
use sqlx::PgPool;
use touchline_core::roles::Role;

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_token_and_user(pool: PgPool) {
    let coach = common::create_staff(&pool, "coach@club.test", Role::Coach).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "COACH@club.test", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["access_token"].is_string());
    assert_eq!(json["data"]["token_type"], "Bearer");
    assert_eq!(json["data"]["expires_in"], 3600);
    assert_eq!(json["data"]["user"]["id"], coach.id);
    assert_eq!(json["data"]["user"]["role"], "coach");
    assert_eq!(json["data"]["user"]["kind"], "staff");
    assert!(json["data"]["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_and_unknown_email_look_the_same(pool: PgPool) {
    common::create_staff(&pool, "coach@club.test", Role::Coach).await;
    let app = common::build_test_app(pool);

    let wrong = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "coach@club.test", "password": "not-the-password" }),
    )
    .await;
    let unknown = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "nobody@club.test", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong).await, body_json(unknown).await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_email_is_a_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "not-an-email", "password": "whatever" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_returns_the_token_owner(pool: PgPool) {
    let player_id = common::create_player(&pool, "Zinedine", "Zidane", 10).await;
    let token = common::token_for(player_id, Role::Player);
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], player_id);
    assert_eq!(json["data"]["full_name"], "Zinedine Zidane");
    assert_eq!(json["data"]["role"], "player");
    assert_eq!(json["data"]["profile"]["kind"], "player");
    assert_eq!(json["data"]["profile"]["position"], "midfielder");
    assert_eq!(json["data"]["profile"]["jersey_number"], 10);
    assert_eq!(json["data"]["profile"]["rating"], 5.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_includes_the_staff_function(pool: PgPool) {
    let coach = common::create_staff(&pool, "coach@club.test", Role::Coach).await;
    let token = common::token_for(coach.id, Role::Coach);
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["kind"], "staff");
    assert_eq!(json["data"]["profile"]["kind"], "staff");
    assert_eq!(json["data"]["profile"]["function"], "head_coach");
    assert!(json["data"]["profile"].get("position").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_or_forged_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let missing = get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let forged = get_auth(app, "/api/v1/auth/me", "not.a.jwt").await;
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(forged).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn players_cannot_manage_the_squad(pool: PgPool) {
    let player_id = common::create_player(&pool, "Lilian", "Thuram", 15).await;
    let token = common::token_for(player_id, Role::Player);
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/players", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
