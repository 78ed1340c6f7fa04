//! HTTP-level tests for lineup editing: assignments, formation changes,
//! details and deletion.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

struct Fixture {
    app: axum::Router,
    token: String,
    lineup: Value,
    players: Vec<i64>,
}

impl Fixture {
    fn uri(&self, suffix: &str) -> String {
        format!("/api/v1/lineups/{}{suffix}", self.lineup["id"].as_str().unwrap())
    }

    fn slot_id(&self, index: usize) -> Value {
        self.lineup["slots"][index]["id"].clone()
    }

    async fn assign(&self, assignments: Value) -> axum::response::Response {
        put_json_auth(
            self.app.clone(),
            &self.uri("/assignments"),
            &self.token,
            json!({ "assignments": assignments }),
        )
        .await
    }

    async fn current(&self) -> Value {
        let response = get_auth(self.app.clone(), &self.uri(""), &self.token).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["data"].clone()
    }
}

async fn setup(pool: PgPool) -> Fixture {
    let token = common::coach_token(&pool).await;
    let players = vec![
        common::create_player(&pool, "Hugo", "Lloris", 1).await,
        common::create_player(&pool, "Raphael", "Varane", 4).await,
        common::create_player(&pool, "Paul", "Pogba", 6).await,
    ];
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/lineups",
        &token,
        json!({ "name": "Équipe A", "formation": "4-3-3" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let lineup = body_json(response).await["data"].clone();

    Fixture {
        app,
        token,
        lineup,
        players,
    }
}

fn players_by_slot(lineup: &Value) -> Vec<Value> {
    lineup["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["player_id"].clone())
        .collect()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn new_lineup_has_empty_ordered_slots(pool: PgPool) {
    let f = setup(pool).await;

    assert_eq!(f.lineup["name"], "Équipe A");
    assert_eq!(f.lineup["formation"], "4-3-3");
    assert!(f.lineup["match_id"].is_null());
    let slots = f.lineup["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 11);
    for (i, slot) in slots.iter().enumerate() {
        assert_eq!(slot["position_order"], i + 1);
        assert!(slot["player_id"].is_null());
    }

    let list = body_json(get_auth(f.app.clone(), "/api/v1/lineups", &f.token).await).await;
    assert_eq!(list["data"][0]["id"], f.lineup["id"]);
    assert_eq!(list["data"][0]["assigned_count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_name_or_formation_is_rejected(pool: PgPool) {
    let f = setup(pool).await;

    let blank = post_json_auth(
        f.app.clone(),
        "/api/v1/lineups",
        &f.token,
        json!({ "name": "  ", "formation": "4-4-2" }),
    )
    .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let bad_formation = post_json_auth(
        f.app.clone(),
        "/api/v1/lineups",
        &f.token,
        json!({ "name": "B", "formation": "442" }),
    )
    .await;
    assert_eq!(bad_formation.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(bad_formation).await["code"], "INVALID_FORMATION");

    let unknown_match = post_json_auth(
        f.app.clone(),
        "/api/v1/lineups",
        &f.token,
        json!({ "name": "B", "formation": "4-4-2", "match_id": 999_999 }),
    )
    .await;
    assert_eq!(unknown_match.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(unknown_match).await["code"], "INVALID_REFERENCE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assignments_are_applied_and_joined_with_players(pool: PgPool) {
    let f = setup(pool).await;

    let response = f
        .assign(json!([
            { "slot_id": f.slot_id(0), "player_id": f.players[0] },
            { "slot_id": f.slot_id(5), "player_id": f.players[2] },
        ]))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let slots = &json["data"]["slots"];
    assert_eq!(slots[0]["player_id"], f.players[0]);
    assert_eq!(slots[0]["player_name"], "Hugo Lloris");
    assert_eq!(slots[0]["jersey_number"], 1);
    assert_eq!(slots[5]["player_name"], "Paul Pogba");
    assert!(slots[1]["player_id"].is_null());
    assert!(json["data"]["version"].as_i64().unwrap() > f.lineup["version"].as_i64().unwrap());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn player_in_two_slots_is_rejected_without_changes(pool: PgPool) {
    let f = setup(pool).await;
    f.assign(json!([{ "slot_id": f.slot_id(0), "player_id": f.players[0] }]))
        .await;
    let before = f.current().await;

    let response = f
        .assign(json!([{ "slot_id": f.slot_id(3), "player_id": f.players[0] }]))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "DUPLICATE_PLAYER_ASSIGNMENT");

    assert_eq!(players_by_slot(&f.current().await), players_by_slot(&before));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn players_can_swap_slots_in_one_request(pool: PgPool) {
    let f = setup(pool).await;
    f.assign(json!([
        { "slot_id": f.slot_id(1), "player_id": f.players[1] },
        { "slot_id": f.slot_id(2), "player_id": f.players[2] },
    ]))
    .await;

    let response = f
        .assign(json!([
            { "slot_id": f.slot_id(1), "player_id": f.players[2] },
            { "slot_id": f.slot_id(2), "player_id": f.players[1] },
        ]))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let slots = players_by_slot(&f.current().await);
    assert_eq!(slots[1], f.players[2]);
    assert_eq!(slots[2], f.players[1]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_assignment_requests_are_rejected(pool: PgPool) {
    let f = setup(pool).await;

    let repeated = f
        .assign(json!([
            { "slot_id": f.slot_id(0), "player_id": f.players[0] },
            { "slot_id": f.slot_id(0) },
        ]))
        .await;
    assert_eq!(repeated.status(), StatusCode::BAD_REQUEST);

    let unknown_player = f
        .assign(json!([{ "slot_id": f.slot_id(0), "player_id": 999_999 }]))
        .await;
    assert_eq!(unknown_player.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(unknown_player).await["code"], "INVALID_REFERENCE");

    let foreign_slot = f
        .assign(json!([{ "slot_id": uuid::Uuid::now_v7(), "player_id": f.players[0] }]))
        .await;
    assert_eq!(foreign_slot.status(), StatusCode::NOT_FOUND);

    assert!(players_by_slot(&f.current().await).iter().all(Value::is_null));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn clearing_a_slot_frees_the_player(pool: PgPool) {
    let f = setup(pool).await;
    f.assign(json!([{ "slot_id": f.slot_id(0), "player_id": f.players[0] }]))
        .await;

    let response = f
        .assign(json!([
            { "slot_id": f.slot_id(0), "player_id": null },
            { "slot_id": f.slot_id(4), "player_id": f.players[0] },
        ]))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let slots = players_by_slot(&f.current().await);
    assert!(slots[0].is_null());
    assert_eq!(slots[4], f.players[0]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn changing_formation_regenerates_empty_slots(pool: PgPool) {
    let f = setup(pool).await;
    f.assign(json!([{ "slot_id": f.slot_id(0), "player_id": f.players[0] }]))
        .await;

    let response = put_json_auth(
        f.app.clone(),
        &f.uri("/formation"),
        &f.token,
        json!({ "formation": "3-5-2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let lineup = body_json(response).await["data"].clone();
    assert_eq!(lineup["formation"], "3-5-2");
    assert_eq!(lineup["slots"].as_array().unwrap().len(), 11);
    assert_ne!(lineup["slots"][0]["id"], f.slot_id(0));
    assert!(players_by_slot(&lineup).iter().all(Value::is_null));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn padded_formation_codes_are_rejected(pool: PgPool) {
    let f = setup(pool).await;

    let create = post_json_auth(
        f.app.clone(),
        "/api/v1/lineups",
        &f.token,
        json!({ "name": "B", "formation": " 4-4-2" }),
    )
    .await;
    assert_eq!(create.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(create).await["code"], "INVALID_FORMATION");

    let change = put_json_auth(
        f.app.clone(),
        &f.uri("/formation"),
        &f.token,
        json!({ "formation": "3-5-2 " }),
    )
    .await;
    assert_eq!(change.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(change).await["code"], "INVALID_FORMATION");

    let lineup = f.current().await;
    assert_eq!(lineup["formation"], "4-3-3");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn formation_preview_does_not_touch_the_lineup(pool: PgPool) {
    let f = setup(pool).await;

    let response = post_json_auth(
        f.app.clone(),
        &f.uri("/formation/preview"),
        &f.token,
        json!({ "formation": "5-3-2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["formation"], "5-3-2");
    assert_eq!(json["data"]["curated"], true);

    let current = f.current().await;
    assert_eq!(current["formation"], "4-3-3");
    assert_eq!(current["version"], f.lineup["version"]);

    let missing = post_json_auth(
        f.app.clone(),
        &format!("/api/v1/lineups/{}/formation/preview", uuid::Uuid::now_v7()),
        &f.token,
        json!({ "formation": "5-3-2" }),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn details_update_renames_and_detaches(pool: PgPool) {
    let f = setup(pool).await;
    let created = body_json(
        post_json_auth(
            f.app.clone(),
            "/api/v1/matches",
            &f.token,
            json!({ "kickoff_at": "2026-11-07T18:00:00Z", "opponent": "Stade Brestois" }),
        )
        .await,
    )
    .await;
    let match_id = created["data"]["id"].clone();

    let linked = put_json_auth(
        f.app.clone(),
        &f.uri(""),
        &f.token,
        json!({ "name": "Équipe B", "match_id": match_id }),
    )
    .await;
    assert_eq!(linked.status(), StatusCode::OK);
    let json = body_json(linked).await;
    assert_eq!(json["data"]["name"], "Équipe B");
    assert_eq!(json["data"]["match_id"], match_id);

    let renamed_only = put_json_auth(
        f.app.clone(),
        &f.uri(""),
        &f.token,
        json!({ "name": "Équipe C" }),
    )
    .await;
    assert_eq!(body_json(renamed_only).await["data"]["match_id"], match_id);

    let detached = put_json_auth(f.app.clone(), &f.uri(""), &f.token, json!({ "match_id": null })).await;
    let json = body_json(detached).await;
    assert!(json["data"]["match_id"].is_null());
    assert_eq!(json["data"]["name"], "Équipe C");

    let dangling = put_json_auth(f.app.clone(), &f.uri(""), &f.token, json!({ "match_id": 999_999 })).await;
    assert_eq!(dangling.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_player_empties_their_slot(pool: PgPool) {
    let f = setup(pool).await;
    f.assign(json!([{ "slot_id": f.slot_id(2), "player_id": f.players[1] }]))
        .await;

    let response = delete_auth(
        f.app.clone(),
        &format!("/api/v1/players/{}", f.players[1]),
        &f.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(f.current().await["slots"][2]["player_id"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleted_lineup_is_gone(pool: PgPool) {
    let f = setup(pool).await;

    let response = delete_auth(f.app.clone(), &f.uri(""), &f.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let get = get_auth(f.app.clone(), &f.uri(""), &f.token).await;
    assert_eq!(get.status(), StatusCode::NOT_FOUND);

    let again = delete_auth(f.app.clone(), &f.uri(""), &f.token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let assign = f
        .assign(json!([{ "slot_id": f.slot_id(0), "player_id": f.players[0] }]))
        .await;
    assert_eq!(assign.status(), StatusCode::NOT_FOUND);
}
