//! End-to-end tests for the memory endpoints, driven through the router

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use memories::api::{create_router, AppState};
use memories::config::DEFAULT_OWNER_ID;
use memories::Database;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_router(AppState::new(
        Database::open_in_memory().unwrap(),
        DEFAULT_OWNER_ID,
    ))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, created) = send(app, Method::POST, "/memories", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    created
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = app();
    let created = create(
        &app,
        json!({ "content": "a", "coverUrl": "http://x", "isPublic": true }),
    )
    .await;

    assert_eq!(created["content"], "a");
    assert_eq!(created["coverUrl"], "http://x");
    assert_eq!(created["isPublic"], true);
    assert!(created.get("createdAt").is_none());
    assert!(created.get("userId").is_none());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/memories/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["content"], "a");
    assert_eq!(fetched["coverUrl"], "http://x");
    assert_eq!(fetched["isPublic"], true);
    assert_eq!(fetched["userId"], DEFAULT_OWNER_ID);
    assert!(fetched["createdAt"].as_str().is_some());
}

#[tokio::test]
async fn test_create_defaults_is_public_to_false() {
    let app = app();
    let created = create(&app, json!({ "content": "a", "coverUrl": "b" })).await;
    assert_eq!(created["isPublic"], false);

    let id = created["id"].as_str().unwrap();
    let (_, fetched) = send(&app, Method::GET, &format!("/memories/{id}"), None).await;
    assert_eq!(fetched["isPublic"], false);
}

#[tokio::test]
async fn test_create_rejects_invalid_bodies() {
    let app = app();

    for body in [
        json!({ "coverUrl": "b" }),
        json!({ "content": "a" }),
        json!({ "content": 5, "coverUrl": "b" }),
        json!({ "content": "a", "coverUrl": "b", "isPublic": "yes" }),
    ] {
        let (status, error) = send(&app, Method::POST, "/memories", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["kind"], "validation");
    }

    let (_, list) = send(&app, Method::GET, "/memories", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/memories")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_in_creation_order_with_excerpts() {
    let app = app();
    let long = "z".repeat(150);
    let first = create(&app, json!({ "content": "hi", "coverUrl": "c1" })).await;
    let second = create(&app, json!({ "content": long, "coverUrl": "c2" })).await;
    let third = create(&app, json!({ "content": "third", "coverUrl": "c3" })).await;

    let (status, list) = send(&app, Method::GET, "/memories", None).await;
    assert_eq!(status, StatusCode::OK);

    let items = list.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["id"], first["id"]);
    assert_eq!(items[1]["id"], second["id"]);
    assert_eq!(items[2]["id"], third["id"]);

    assert_eq!(items[0]["excerpt"], "hi...");
    assert_eq!(items[0]["coverUrl"], "c1");
    assert_eq!(items[1]["excerpt"], format!("{}...", "z".repeat(115)));
    assert!(items[0].get("content").is_none());
}

#[tokio::test]
async fn test_partial_update_preserves_untouched_fields() {
    let app = app();
    let created = create(
        &app,
        json!({ "content": "a", "coverUrl": "b", "isPublic": false }),
    )
    .await;
    let uri = format!("/memories/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({ "isPublic": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({ "id": created["id"], "content": "a", "coverUrl": "b", "isPublic": true })
    );

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["content"], "a");
    assert_eq!(fetched["coverUrl"], "b");
    assert_eq!(fetched["isPublic"], true);
}

#[tokio::test]
async fn test_empty_update_leaves_record_unchanged() {
    let app = app();
    let created = create(&app, json!({ "content": "a", "coverUrl": "b" })).await;
    let uri = format!("/memories/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, created);
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let app = app();
    let (status, error) = send(
        &app,
        Method::PUT,
        "/memories/00000000-0000-4000-8000-000000000000",
        Some(json!({ "content": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["kind"], "not_found");
}

#[tokio::test]
async fn test_delete_then_get_and_delete_are_not_found() {
    let app = app();
    let created = create(&app, json!({ "content": "a", "coverUrl": "b" })).await;
    let uri = format!("/memories/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, error) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["kind"], "not_found");
}

#[tokio::test]
async fn test_invalid_id_is_validation_error() {
    let app = app();

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(json!({ "content": "x" }))),
        (Method::DELETE, None),
    ] {
        let (status, error) = send(&app, method, "/memories/not-a-uuid", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["kind"], "validation");
    }
}

#[tokio::test]
async fn test_id_lookup_is_case_insensitive() {
    let app = app();
    let created = create(&app, json!({ "content": "a", "coverUrl": "b" })).await;
    let upper = created["id"].as_str().unwrap().to_uppercase();

    let (status, fetched) = send(&app, Method::GET, &format!("/memories/{upper}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);
}

#[tokio::test]
async fn test_array_bodies_are_validation_errors() {
    let app = app();

    let (status, error) = send(
        &app,
        Method::POST,
        "/memories",
        Some(json!(["a", "http://x", true])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["kind"], "validation");

    let (_, list) = send(&app, Method::GET, "/memories", None).await;
    assert_eq!(list, json!([]));

    let created = create(&app, json!({ "content": "a", "coverUrl": "b" })).await;
    let uri = format!("/memories/{}", created["id"].as_str().unwrap());

    let (status, error) = send(&app, Method::PUT, &uri, Some(json!(["x", "y", true]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["kind"], "validation");

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["content"], "a");
    assert_eq!(fetched["coverUrl"], "b");
    assert_eq!(fetched["isPublic"], false);
}

#[tokio::test]
async fn test_storage_failure_is_server_error() {
    let db = Database::open_in_memory().unwrap();
    let app = create_router(AppState::new(db.clone(), DEFAULT_OWNER_ID));

    db.with_conn(|conn| {
        conn.execute("DROP TABLE memories", [])?;
        Ok(())
    })
    .await
    .unwrap();

    let (status, error) = send(&app, Method::GET, "/memories", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["kind"], "storage");

    let (status, error) = send(
        &app,
        Method::POST,
        "/memories",
        Some(json!({ "content": "a", "coverUrl": "b" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["kind"], "storage");
}
