//! End-to-end flows for crew member management used by the frontend.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use grandline::config::Config;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let db_path =
        std::env::temp_dir().join(format!("grandline-crew-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_url = format!("sqlite:{}", db_path.display());

    let state = grandline::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    grandline::api::router(state)
}

async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn put_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_seeded_roster_is_listed() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/crew")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let members = body["data"].as_array().unwrap();
    assert_eq!(members.len(), 10);
    assert_eq!(body["message"], "Found 10 crew members");
    assert_eq!(members[0]["name"], "Monkey D. Luffy");
    assert_eq!(members[0]["pirate_group_name"], "Straw Hat Pirates");
    assert_eq!(members[9]["name"], "Jinbe");
}

#[tokio::test]
async fn test_list_filters_by_group() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/pirate-groups")).await.unwrap();
    let body = body_json(response).await;
    let straw_hat_id = body["data"][0]["id"].as_i64().unwrap();
    let red_hair_id = body["data"][1]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/crew?pirate_group_id={straw_hat_id}")))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/crew?pirate_group_id={red_hair_id}")))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["message"], "Found 0 crew members");
}

#[tokio::test]
async fn test_get_missing_member_returns_404() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/crew/999999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_create_member_applies_defaults() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/crew",
            &json!({ "name": "Yamato", "role": "Guardian" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Yamato");
    assert_eq!(body["data"]["role"], "Guardian");
    assert_eq!(body["data"]["bounty"], "0");
    assert!(body["data"]["pirate_group_id"].is_null());
    assert!(body["data"]["pirate_group_name"].is_null());
    assert!(body["data"]["abilities"].is_object());
}

#[tokio::test]
async fn test_create_member_requires_name_and_role() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/api/crew", &json!({ "role": "Cook" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(post_json("/api/crew", &json!({ "name": "  ", "role": "Cook" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_member_rejects_unknown_group() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/crew",
            &json!({ "name": "Stowaway", "role": "Deckhand", "pirate_group_id": 424242 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("does not exist"));
}

#[tokio::test]
async fn test_empty_patch_leaves_member_unchanged() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/crew")).await.unwrap();
    let body = body_json(response).await;
    let before = body["data"][0].clone();
    let id = before["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(put_json(&format!("/api/crew/{id}"), &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/crew/{id}")))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"], before);
}

#[tokio::test]
async fn test_partial_patch_updates_only_given_fields() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/crew")).await.unwrap();
    let body = body_json(response).await;
    let member = body["data"][1].clone();
    let id = member["id"].as_i64().unwrap();
    assert_eq!(member["name"], "Roronoa Zoro");

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/crew/{id}"),
            &json!({ "bounty": "1,500,000,000 Berries" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["bounty"], "1,500,000,000 Berries");
    assert_eq!(body["data"]["name"], "Roronoa Zoro");
    assert_eq!(body["data"]["role"], member["role"]);
}

#[tokio::test]
async fn test_explicit_null_clears_group_membership() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/crew")).await.unwrap();
    let body = body_json(response).await;
    let id = body["data"][0]["id"].as_i64().unwrap();
    assert!(body["data"][0]["pirate_group_id"].is_number());

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/crew/{id}"),
            &json!({ "pirate_group_id": null }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["data"]["pirate_group_id"].is_null());
    assert!(body["data"]["pirate_group_name"].is_null());
}

#[tokio::test]
async fn test_delete_member_then_404() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/crew",
            &json!({ "name": "Temp Deckhand", "role": "Deckhand" }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/crew/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("Temp Deckhand"));

    let response = app
        .clone()
        .oneshot(get(&format!("/api/crew/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/crew/search?q=ZORO"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Roronoa Zoro");

    // Matches the role column as well.
    let response = app
        .clone()
        .oneshot(get("/api/crew/search?q=navigator"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["name"], "Nami");

    // And the devil fruit column.
    let response = app
        .clone()
        .oneshot(get("/api/crew/search?q=yomi"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["name"], "Brook");
}

#[tokio::test]
async fn test_group_delete_unblocks_after_reassignment() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/pirate-groups",
            &json!({ "name": "Kid Pirates", "captain": "Eustass Kid" }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let group_id = body["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/crew",
            &json!({ "name": "Killer", "role": "Combatant", "pirate_group_id": group_id }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let member_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["pirate_group_name"], "Kid Pirates");

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/pirate-groups/{group_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/crew/{member_id}"),
            &json!({ "pirate_group_id": null }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/pirate-groups/{group_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The member survives the group deletion, just unaffiliated.
    let response = app
        .clone()
        .oneshot(get(&format!("/api/crew/{member_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"]["pirate_group_id"].is_null());
}
