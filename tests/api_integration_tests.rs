//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle against an in-memory database and a
//! stand-in upstream server bound to an ephemeral port.

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::{Path, Query},
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use pokedex_api::{api::create_router, storage::Database, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

async fn test_app(upstream_base: &str) -> Router {
    let config = Config {
        pokeapi_base_url: upstream_base.to_string(),
        ..Config::default()
    };
    let db = Database::open_in_memory().await.unwrap();
    create_router(AppState::new(&config, db))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Registers a user and returns the access token and the user payload.
async fn register(app: &Router, login: &str) -> (String, Value) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "name": login,
                "login": login,
                "email": format!("{login}@example.com"),
                "password": "hunter2",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_to_json(response.into_body()).await;
    let token = body["access_token"].as_str().unwrap().to_string();
    (token, body["user"].clone())
}

// == Stub Upstreams ==

/// An upstream that accepts every list query and echoes the limit/offset it
/// received, so clamping is observable from the outside.
async fn spawn_echo_upstream() -> String {
    async fn pokemon_list(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let limit: i64 = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(-1);
        let offset: i64 = params
            .get("offset")
            .and_then(|v| v.parse().ok())
            .unwrap_or(-1);
        Json(json!({
            "count": 1302,
            "next": null,
            "previous": null,
            "echo_limit": limit,
            "echo_offset": offset,
            "results": [{"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"}]
        }))
    }

    async fn pokemon_detail(Path(name): Path<String>) -> Json<Value> {
        Json(json!({"name": name, "id": 25}))
    }

    async fn type_list() -> Json<Value> {
        Json(json!({
            "count": 3,
            "results": [
                {"name": "fire", "url": "https://pokeapi.co/api/v2/type/10/"},
                {"name": "water", "url": "https://pokeapi.co/api/v2/type/11/"},
                {"name": ""}
            ]
        }))
    }

    async fn type_detail(Path(name): Path<String>) -> Json<Value> {
        Json(json!({
            "name": name,
            "pokemon": [
                {"pokemon": {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"}},
                {"pokemon": {"name": "no-url"}},
                {"pokemon": {"url": "https://pokeapi.co/api/v2/pokemon/99/"}},
                {"pokemon": {"name": "growlithe", "url": "https://pokeapi.co/api/v2/pokemon/58/"}}
            ]
        }))
    }

    let app = Router::new()
        .route("/pokemon", get(pokemon_list))
        .route("/pokemon/:name", get(pokemon_detail))
        .route("/type", get(type_list))
        .route("/type/:name", get(type_detail));

    serve_on_ephemeral_port(app).await
}

/// An upstream that rejects every list limit except 10 with 422, driving the
/// client down its degrading-limit sequence.
async fn spawn_picky_upstream() -> String {
    async fn pokemon_list(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        let limit: i64 = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(0);
        if limit == 10 {
            let results: Vec<_> = (0..10).map(|i| json!({"name": format!("poke-{i}")})).collect();
            (
                StatusCode::OK,
                Json(json!({"count": 10, "next": null, "previous": null, "results": results})),
            )
        } else {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"error": "limit rejected"})),
            )
        }
    }

    let app = Router::new().route("/pokemon", get(pokemon_list));
    serve_on_ephemeral_port(app).await
}

async fn serve_on_ephemeral_port(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// == Auth Tests ==

#[tokio::test]
async fn test_register_login_me_flow() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    let (token, user) = register(&app, "ash").await;
    assert_eq!(user["login"], "ash");

    // Login with the same credentials
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"login": "ash", "password": "hunter2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The token authenticates the profile endpoint
    let response = app
        .oneshot(get_request("/api/auth/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["login"], "ash");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_missing_fields_is_400() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({"login": "ash"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_login_is_409() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    register(&app, "ash").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "name": "Impostor",
                "login": "ash",
                "email": "other@example.com",
                "password": "pw",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_first_user_is_admin_second_is_not() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    let (_, first) = register(&app, "ash").await;
    let (_, second) = register(&app, "misty").await;

    assert_eq!(first["is_admin"], true);
    assert_eq!(second["is_admin"], false);
}

#[tokio::test]
async fn test_login_wrong_password_is_401() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    register(&app, "ash").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"login": "ash", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reset_password_by_email() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    register(&app, "ash").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/reset-password",
            None,
            json!({"login_or_email": "ash@example.com", "new_password": "raichu"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The old password no longer works, the new one does
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"login": "ash", "password": "hunter2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"login": "ash", "password": "raichu"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reset_password_unknown_handle_is_404() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/reset-password",
            None,
            json!({"login_or_email": "nobody", "new_password": "pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Admin Tests ==

#[tokio::test]
async fn test_user_listing_is_admin_only() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    let (admin_token, _) = register(&app, "ash").await;
    let (other_token, _) = register(&app, "misty").await;

    let response = app
        .clone()
        .oneshot(get_request("/api/auth/users", Some(&other_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(get_request("/api/auth/users", Some(&admin_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    // Newest first
    assert_eq!(users[0]["name"], "misty");
    assert_eq!(users[1]["name"], "ash");
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    let (admin_token, admin) = register(&app, "ash").await;
    let admin_id = admin["id"].as_i64().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/auth/users/{admin_id}"))
                .header("authorization", format!("Bearer {admin_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_deletes_other_user() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    let (admin_token, _) = register(&app, "ash").await;
    let (_, other) = register(&app, "misty").await;
    let other_id = other["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/auth/users/{other_id}"))
                .header("authorization", format!("Bearer {admin_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Gone from the listing
    let response = app
        .oneshot(get_request("/api/auth/users", Some(&admin_token)))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

// == Proxy Tests ==

#[tokio::test]
async fn test_pokemon_list_clamps_limit_and_offset() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    let response = app
        .oneshot(get_request("/api/pokemon?limit=2000&offset=-5", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["echo_limit"], 1000);
    assert_eq!(body["echo_offset"], 0);
}

#[tokio::test]
async fn test_pokemon_list_degrades_through_limit_candidates() {
    let upstream = spawn_picky_upstream().await;
    let app = test_app(&upstream).await;

    // 24 is rejected with 422; the client walks down to 10, which succeeds.
    let response = app
        .oneshot(get_request("/api/pokemon?limit=24", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["count"], 10);
    assert_eq!(body["results"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_pokemon_detail_passes_payload_through() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    let response = app
        .oneshot(get_request("/api/pokemon/pikachu", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["name"], "pikachu");
}

#[tokio::test]
async fn test_list_by_type_normalizes_entries() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    let response = app
        .oneshot(get_request("/api/type/fire", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["count"], 2);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["name"], "charmander");
    assert_eq!(results[1]["name"], "growlithe");
}

// == Cache Tests ==

#[tokio::test]
async fn test_cache_fills_and_clears() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;
    let (token, _) = register(&app, "ash").await;

    // Populate one entry per category
    for uri in [
        "/api/pokemon?limit=24",
        "/api/pokemon/pikachu",
        "/api/type",
        "/api/type/fire",
    ] {
        let response = app.clone().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get_request("/api/cache/stats", None))
        .await
        .unwrap();
    let stats = body_to_json(response.into_body()).await;
    assert_eq!(stats["total_entries"], 4);
    assert_eq!(stats["ttl_seconds"], 3600);
    assert_eq!(stats["categories"]["pokemon_list"], 1);
    assert_eq!(stats["categories"]["pokemon_detail"], 1);
    assert_eq!(stats["categories"]["type_list"], 1);
    assert_eq!(stats["categories"]["type_detail"], 1);

    // Flushing requires identity
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/cache/clear", None, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/cache/clear", Some(&token), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/api/cache/stats", None))
        .await
        .unwrap();
    let stats = body_to_json(response.into_body()).await;
    assert_eq!(stats["total_entries"], 0);
}

#[tokio::test]
async fn test_repeat_list_requests_share_one_cache_entry() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(get_request("/api/pokemon?limit=24", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get_request("/api/cache/stats", None))
        .await
        .unwrap();
    let stats = body_to_json(response.into_body()).await;
    assert_eq!(stats["total_entries"], 1);
}

// == Collection Tests ==

#[tokio::test]
async fn test_team_capacity_enforced_over_http() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;
    let (token, _) = register(&app, "ash").await;

    for i in 0..6 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/me/team",
                Some(&token),
                json!({"code": i.to_string(), "name": format!("member-{i}")}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // The seventh add is rejected and nothing is written
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/me/team",
            Some(&token),
            json!({"code": "7", "name": "overflow"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get_request("/api/me/team", Some(&token)))
        .await
        .unwrap();
    let team = body_to_json(response.into_body()).await;
    assert_eq!(team.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_member_deletion_never_leaks_across_owners() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;
    let (ash_token, _) = register(&app, "ash").await;
    let (misty_token, _) = register(&app, "misty").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/me/team",
            Some(&ash_token),
            json!({"code": "25", "name": "pikachu"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let member = body_to_json(response.into_body()).await;
    let member_id = member["id"].as_i64().unwrap();

    // Another user sees the row as absent
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/me/team/{member_id}"))
                .header("authorization", format!("Bearer {misty_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner removes it
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/me/team/{member_id}"))
                .header("authorization", format!("Bearer {ash_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_favorites_add_list_remove() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;
    let (token, _) = register(&app, "ash").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/me/favorites",
            Some(&token),
            json!({"code": "133", "name": "eevee", "image_url": "https://img/133.png"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let favorite = body_to_json(response.into_body()).await;
    assert_eq!(favorite["is_favorite"], true);
    assert_eq!(favorite["is_team_member"], false);
    let favorite_id = favorite["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(get_request("/api/me/favorites", Some(&token)))
        .await
        .unwrap();
    let favorites = body_to_json(response.into_body()).await;
    assert_eq!(favorites.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/me/favorites/{favorite_id}"))
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get_request("/api/me/favorites", Some(&token)))
        .await
        .unwrap();
    let favorites = body_to_json(response.into_body()).await;
    assert!(favorites.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_member_missing_fields_is_400() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;
    let (token, _) = register(&app, "ash").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/me/team",
            Some(&token),
            json!({"code": "25"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Seed Tests ==

#[tokio::test]
async fn test_seed_types_is_idempotent() {
    let upstream = spawn_echo_upstream().await;
    let app = test_app(&upstream).await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/seed/types", None, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    // The stub's empty-name entry is skipped
    assert_eq!(body["created"], 2);

    let response = app
        .oneshot(json_request("POST", "/api/auth/seed/types", None, json!({})))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["created"], 0);
}
