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
        std::env::temp_dir().join(format!("grandline-api-test-{}.db", uuid::Uuid::new_v4()));

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

async fn login(app: &Router, username: &str, password: &str) -> Response {
    app.clone()
        .oneshot(post_json(
            "/api/auth/login",
            &json!({ "username": username, "password": password }),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_ping_and_version() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/common/ping")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"], "pong");

    let response = app
        .clone()
        .oneshot(get("/api/common/version"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "grandline");
    assert!(body["data"]["version"].is_string());
}

#[tokio::test]
async fn test_login_succeeds_with_seeded_credentials() {
    let app = spawn_app().await;

    let response = login(&app, "admin", "admin123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["username"], "admin");
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = spawn_app().await;

    let response = login(&app, "admin", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);

    let response = login(&app, "nobody", "admin123").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = spawn_app().await;

    // Empty credentials are an authentication failure, same as wrong ones.
    let response = login(&app, "", "").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);

    let response = login(&app, "admin", "").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_roundtrip() {
    let app = spawn_app().await;

    let response = login(&app, "admin", "admin123").await;
    let body = body_json(response).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();
    let user_id = body["data"]["user"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/verify")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "admin");
    assert_eq!(body["data"]["user_id"].as_i64().unwrap(), user_id);
}

#[tokio::test]
async fn test_verify_rejects_missing_and_garbage_tokens() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/auth/verify")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/verify")
                .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Token is invalid");
}

#[tokio::test]
async fn test_seeded_groups_are_listed_in_insertion_order() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/pirate-groups")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let groups = body["data"].as_array().unwrap();
    assert_eq!(groups.len(), 5);
    assert_eq!(groups[0]["name"], "Straw Hat Pirates");
    assert_eq!(groups[1]["name"], "Red Hair Pirates");
    assert_eq!(groups[4]["name"], "Heart Pirates");
    assert_eq!(body["message"], "Found 5 pirate groups");
    // The member list is only embedded on request.
    assert!(groups[0].get("members").is_none());
}

#[tokio::test]
async fn test_group_with_members_embeds_full_roster() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/pirate-groups")).await.unwrap();
    let body = body_json(response).await;
    let straw_hat_id = body["data"][0]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!(
            "/api/pirate-groups/{straw_hat_id}?include_members=true"
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let members = body["data"]["members"].as_array().unwrap();
    assert_eq!(members.len(), 10);
    assert_eq!(members[0]["name"], "Monkey D. Luffy");
    assert!(members[0]["abilities"].is_object());
    assert_eq!(
        members[0]["abilities"]["haki_types"],
        "Conqueror's, Armament, Observation"
    );
    assert_eq!(members[0]["pirate_group_name"], "Straw Hat Pirates");
}

#[tokio::test]
async fn test_group_members_endpoint_counts_roster() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/pirate-groups")).await.unwrap();
    let body = body_json(response).await;
    let straw_hat_id = body["data"][0]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/pirate-groups/{straw_hat_id}/members")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["message"], "Straw Hat Pirates has 10 crew members");
}

#[tokio::test]
async fn test_create_group_applies_defaults_and_echoes_input() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/pirate-groups",
            &json!({ "name": "Buggy's Delivery", "captain": "Buggy" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Buggy's Delivery");
    assert_eq!(body["data"]["captain"], "Buggy");
    assert_eq!(body["data"]["total_bounty"], "0");
    assert_eq!(body["data"]["member_count"], 0);
}

#[tokio::test]
async fn test_create_group_rejects_duplicate_name() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/pirate-groups",
            &json!({ "name": "Straw Hat Pirates", "captain": "Impostor" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("already exists")
    );
}

#[tokio::test]
async fn test_create_group_requires_name_and_captain() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/api/pirate-groups", &json!({ "captain": "X" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(post_json("/api/pirate-groups", &json!({ "name": "Solo" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_group_applies_partial_patch() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/pirate-groups")).await.unwrap();
    let body = body_json(response).await;
    let heart = body["data"][4].clone();
    let id = heart["id"].as_i64().unwrap();
    assert_eq!(heart["name"], "Heart Pirates");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/pirate-groups/{id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "ship_name": "Polar Tang II" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["ship_name"], "Polar Tang II");
    // Untouched fields keep their prior values.
    assert_eq!(body["data"]["name"], "Heart Pirates");
    assert_eq!(body["data"]["captain"], heart["captain"]);
    assert_eq!(body["data"]["origin"], heart["origin"]);
}

#[tokio::test]
async fn test_update_group_rejects_rename_onto_existing_name() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/pirate-groups")).await.unwrap();
    let body = body_json(response).await;
    let red_hair_id = body["data"][1]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/pirate-groups/{red_hair_id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "name": "Straw Hat Pirates" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("already exists")
    );

    // Renaming a group to its own current name is not a conflict.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/pirate-groups/{red_hair_id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "name": "Red Hair Pirates" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_group_blocked_while_members_exist() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/pirate-groups")).await.unwrap();
    let body = body_json(response).await;
    let straw_hat_id = body["data"][0]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/pirate-groups/{straw_hat_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("crew members"));
}

#[tokio::test]
async fn test_delete_empty_group_succeeds() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/pirate-groups",
            &json!({ "name": "Short-Lived Pirates", "captain": "Nobody" }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/pirate-groups/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Short-Lived Pirates")
    );

    let response = app
        .clone()
        .oneshot(get(&format!("/api/pirate-groups/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_group_search_matches_name_captain_and_origin() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/pirate-groups/search?q=straw"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Straw Hat Pirates");

    let response = app
        .clone()
        .oneshot(get("/api/pirate-groups/search?q=SHANKS"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["name"], "Red Hair Pirates");

    let response = app
        .clone()
        .oneshot(get("/api/pirate-groups/search?q=North%20Blue"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["name"], "Heart Pirates");
}

#[tokio::test]
async fn test_empty_search_keyword_is_rejected_for_both_entities() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/pirate-groups/search?q="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get("/api/crew/search?q="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.clone().oneshot(get("/api/crew/search")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_api_route_returns_enveloped_404() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/does-not-exist"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_wrong_method_returns_405() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/pirate-groups")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_frontend_shell_is_served_at_root() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    // Unknown non-API paths fall back to the SPA shell.
    let response = app.clone().oneshot(get("/some/client/route")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
