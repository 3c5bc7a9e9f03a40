//! Canvas Board Save/Load Server
//!
//! Stores whole drawings under user-chosen names.
//!
//! ## Endpoints
//!
//! - `GET /` - Banner
//! - `GET /health` - Health check
//! - `POST /save` - Body `{"canvasName": "plans", "canvas": [Shape, ...]}`
//! - `GET /load?canvasName=plans` - Responds `{"canvas": [Shape, ...]}`
//!
//! Failures respond with a plain-text body meant to be shown to the user as-is.

pub mod config;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use canvasboard_core::persistence::{LoadResponse, SaveRequest};
use canvasboard_core::storage::{Storage, StorageError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state.
pub struct AppState {
    storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

/// Errors returned by the API handlers.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Missing canvasName")]
    MissingName,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::MissingName => StatusCode::BAD_REQUEST,
            ServerError::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

/// Response to a successful save.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub canvas_name: String,
    pub shape_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadQuery {
    canvas_name: Option<String>,
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/save", post(save_canvas))
        .route("/load", get(load_canvas))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API on a bound listener until the server stops.
pub async fn serve(listener: TcpListener, storage: Arc<dyn Storage>) -> std::io::Result<()> {
    axum::serve(listener, router(Arc::new(AppState::new(storage)))).await
}

/// Index page
async fn index() -> &'static str {
    "Canvas Board Server - POST /save, GET /load?canvasName="
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

/// POST /save - Store a canvas under its name, replacing any previous one.
async fn save_canvas(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, ServerError> {
    if request.canvas_name.trim().is_empty() {
        return Err(ServerError::MissingName);
    }

    state.storage.save(&request.canvas_name, &request.canvas).await?;
    info!(
        "Saved canvas {} ({} shapes)",
        request.canvas_name,
        request.canvas.len()
    );

    Ok(Json(SaveResponse {
        shape_count: request.canvas.len(),
        canvas_name: request.canvas_name,
    }))
}

/// GET /load - Fetch a canvas by name.
async fn load_canvas(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoadQuery>,
) -> Result<Json<LoadResponse>, ServerError> {
    let name = query
        .canvas_name
        .filter(|name| !name.trim().is_empty())
        .ok_or(ServerError::MissingName)?;

    let canvas = state.storage.load(&name).await?;
    info!("Loaded canvas {} ({} shapes)", name, canvas.len());

    Ok(Json(LoadResponse {
        canvas: Some(canvas),
    }))
}
