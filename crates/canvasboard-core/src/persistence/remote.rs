//! Client for the remote save/load server.

use super::{PersistenceError, PersistenceResult};
use crate::shapes::Shape;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default server address.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3030";

/// Body of a save request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub canvas_name: String,
    pub canvas: Vec<Shape>,
}

/// Body of a successful load response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<Vec<Shape>>,
}

/// Where the save/load server lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Scheme, host and optional path prefix.
    pub base_url: String,
    pub save_path: String,
    pub load_path: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            save_path: "/save".to_string(),
            load_path: "/load".to_string(),
        }
    }
}

impl RemoteConfig {
    /// Config pointing at `base_url` with the default endpoint paths.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }

    /// Full URL of the save endpoint.
    pub fn save_url(&self) -> Result<Url, url::ParseError> {
        self.endpoint(&self.save_path)
    }

    /// Full URL of the load endpoint for `canvas_name`.
    pub fn load_url(&self, canvas_name: &str) -> Result<Url, url::ParseError> {
        let mut url = self.endpoint(&self.load_path)?;
        url.query_pairs_mut().append_pair("canvasName", canvas_name);
        Ok(url)
    }
}

/// HTTP client for saving and loading named canvases.
///
/// Calls neither block nor serialize against each other; callers that start
/// several loads apply the results in whatever order they complete.
#[derive(Debug, Clone, Default)]
pub struct RemoteClient {
    client: Client,
    config: RemoteConfig,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Store `shapes` on the server under `canvas_name`.
    ///
    /// Returns the saved name. A rejected save carries the server's error text.
    pub async fn save(&self, canvas_name: &str, shapes: &[Shape]) -> PersistenceResult<String> {
        let url = self
            .config
            .save_url()
            .map_err(|e| PersistenceError::RemoteSaveFailure(format!("Invalid server URL: {}", e)))?;
        let body = SaveRequest {
            canvas_name: canvas_name.to_string(),
            canvas: shapes.to_vec(),
        };

        log::info!("Saving canvas '{}' ({} shapes) to {}", canvas_name, shapes.len(), url);
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Save request failed: {}", e);
                PersistenceError::RemoteSaveFailure(e.to_string())
            })?;

        if !response.status().is_success() {
            return Err(PersistenceError::RemoteSaveFailure(error_text(response).await));
        }
        Ok(canvas_name.to_string())
    }

    /// Fetch the canvas stored under `canvas_name`.
    pub async fn load(&self, canvas_name: &str) -> PersistenceResult<Vec<Shape>> {
        let url = self
            .config
            .load_url(canvas_name)
            .map_err(|e| PersistenceError::RemoteLoadFailure(format!("Invalid server URL: {}", e)))?;

        log::info!("Loading canvas '{}' from {}", canvas_name, url);
        let response = self.client.get(url).send().await.map_err(|e| {
            log::warn!("Load request failed: {}", e);
            PersistenceError::RemoteLoadFailure(e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(PersistenceError::RemoteLoadFailure(error_text(response).await));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PersistenceError::RemoteLoadFailure(e.to_string()))?;
        let parsed: LoadResponse = serde_json::from_str(&body)
            .map_err(|e| PersistenceError::RemoteLoadFailure(format!("Invalid response: {}", e)))?;

        parsed
            .canvas
            .ok_or_else(|| PersistenceError::MissingCanvasData(canvas_name.to_string()))
    }
}

/// Body text of a failed response, or its status if the body is empty.
async fn error_text(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => status.to_string(),
        Err(e) => format!("{}: {}", status, e),
    }
}
