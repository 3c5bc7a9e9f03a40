//! Integration tests for the save/load API.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use canvasboard_core::kurbo::Point;
use canvasboard_core::persistence::{PersistenceError, RemoteClient, RemoteConfig};
use canvasboard_core::shapes::{Shape, ShapeKind, ShapeTemplate};
use canvasboard_core::storage::{FileStorage, MemoryStorage, Storage};
use canvasboard_core::{Board, BoardEvent};
use canvasboard_server::{AppState, router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn memory_app() -> Router {
    router(Arc::new(AppState::new(Arc::new(MemoryStorage::new()))))
}

fn sample_canvas() -> Vec<Shape> {
    vec![
        Shape::with_id(
            "a",
            ShapeTemplate::new(ShapeKind::Square, "#ff0000").at(Point::new(10.0, 20.0)),
        ),
        Shape::with_id(
            "b",
            ShapeTemplate::new(ShapeKind::Other("blob".into()), "plum").at(Point::ZERO),
        ),
    ]
}

/// Helper to make a request and collect the status and body text.
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_health() {
    let app = memory_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_save_then_load() {
    let app = memory_app();
    let canvas = serde_json::to_value(sample_canvas()).unwrap();

    let (status, body) = post_json(
        &app,
        "/save",
        json!({"canvasName": "floor plan", "canvas": canvas}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let saved: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(saved["canvasName"], "floor plan");
    assert_eq!(saved["shapeCount"], 2);

    let (status, body) = get(&app, "/load?canvasName=floor%20plan").await;
    assert_eq!(status, StatusCode::OK);
    let loaded: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(loaded["canvas"], canvas);
}

#[tokio::test]
async fn test_save_overwrites_by_name() {
    let app = memory_app();
    let canvas = serde_json::to_value(sample_canvas()).unwrap();

    post_json(&app, "/save", json!({"canvasName": "plans", "canvas": canvas})).await;
    post_json(&app, "/save", json!({"canvasName": "plans", "canvas": []})).await;

    let (_, body) = get(&app, "/load?canvasName=plans").await;
    let loaded: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(loaded["canvas"], json!([]));
}

#[tokio::test]
async fn test_load_unknown_name() {
    let app = memory_app();
    let (status, body) = get(&app, "/load?canvasName=ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Canvas not found: ghost");
}

#[tokio::test]
async fn test_load_without_name() {
    let app = memory_app();
    let (status, body) = get(&app, "/load").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Missing canvasName");
}

#[tokio::test]
async fn test_save_with_blank_name() {
    let app = memory_app();
    let (status, body) = post_json(&app, "/save", json!({"canvasName": "  ", "canvas": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Missing canvasName");
}

#[tokio::test]
async fn test_save_malformed_body() {
    let app = memory_app();
    let (status, _) = post_json(&app, "/save", json!({"canvas": "nope"})).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_file_backed_save() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());
    let app = router(Arc::new(AppState::new(storage.clone())));
    let canvas = serde_json::to_value(sample_canvas()).unwrap();

    let (status, _) = post_json(&app, "/save", json!({"canvasName": "plans", "canvas": canvas})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(storage.load("plans").await.unwrap(), sample_canvas());
}

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        canvasboard_server::serve(listener, Arc::new(MemoryStorage::new()))
            .await
            .unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_remote_client_round_trip() {
    let client = RemoteClient::new(RemoteConfig::with_base_url(spawn_server().await));

    assert_eq!(client.save("plans", &sample_canvas()).await.unwrap(), "plans");
    assert_eq!(client.load("plans").await.unwrap(), sample_canvas());
}

#[tokio::test]
async fn test_remote_client_surfaces_server_text() {
    let client = RemoteClient::new(RemoteConfig::with_base_url(spawn_server().await));

    match client.load("ghost").await {
        Err(PersistenceError::RemoteLoadFailure(text)) => {
            assert_eq!(text, "Canvas not found: ghost");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    match client.save(" ", &[]).await {
        Err(PersistenceError::RemoteSaveFailure(text)) => assert_eq!(text, "Missing canvasName"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_board_load_replaces_drawing() {
    let client = RemoteClient::new(RemoteConfig::with_base_url(spawn_server().await));
    client.save("plans", &sample_canvas()).await.unwrap();

    let mut board = Board::new();
    let sender = board.sender();
    sender.send(BoardEvent::RemoteLoaded(client.load("plans").await));
    sender.send(BoardEvent::RemoteLoaded(client.load("ghost").await));
    let notices = board.pump();

    assert_eq!(board.drawing().shapes(), sample_canvas().as_slice());
    assert!(!notices[0].is_error());
    assert!(notices[1].is_error());
}
