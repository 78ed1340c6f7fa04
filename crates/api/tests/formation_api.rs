//! HTTP-level tests for the formation catalogue and previews.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn lists_curated_formations_in_switcher_order(pool: PgPool) {
    let token = common::coach_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/formations", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let codes: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["4-4-2", "4-3-3", "3-5-2", "3-4-3", "5-3-2", "4-5-1"]);
    assert_eq!(json["data"][1]["attackers"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn preview_of_curated_formation(pool: PgPool) {
    let token = common::coach_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/formations/preview",
        &token,
        serde_json::json!({ "formation": "4-4-2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["curated"], true);
    let slots = json["data"]["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 11);
    assert_eq!(slots[0]["label"], "Gardien");
    assert_eq!(slots[0]["position_order"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn preview_of_unknown_formation_uses_generic_layout(pool: PgPool) {
    let token = common::coach_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/formations/preview",
        &token,
        serde_json::json!({ "formation": "2-2-6" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["curated"], false);
    assert_eq!(json["data"]["slots"][0]["label"], "Goalkeeper");
    assert_eq!(json["data"]["slots"].as_array().unwrap().len(), 11);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn four_line_formation_is_rejected(pool: PgPool) {
    let token = common::coach_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/formations/preview",
        &token,
        serde_json::json!({ "formation": "4-2-3-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_FORMATION");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn padded_formation_code_is_rejected(pool: PgPool) {
    let token = common::coach_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/formations/preview",
        &token,
        serde_json::json!({ "formation": " 4-4-2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_FORMATION");
}
