//! Server configuration from command-line flags and environment.

use canvasboard_core::storage::{FileStorage, MemoryStorage, Storage, StorageResult};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Default listen address.
pub const DEFAULT_ADDR: &str = "0.0.0.0:3030";

#[derive(Debug, Clone, Parser)]
#[command(name = "canvasboard-server", version, about = "Save/load backend for Canvas Board")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "CANVASBOARD_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: SocketAddr,

    /// Directory for saved canvases [default: platform data dir]
    #[arg(long, env = "CANVASBOARD_DATA_DIR", conflicts_with = "memory")]
    pub data_dir: Option<PathBuf>,

    /// Keep canvases in memory only; they are lost on exit
    #[arg(long, env = "CANVASBOARD_MEMORY")]
    pub memory: bool,
}

impl ServerConfig {
    /// Build the storage backend this configuration selects.
    pub fn storage(&self) -> StorageResult<Arc<dyn Storage>> {
        if self.memory {
            return Ok(Arc::new(MemoryStorage::new()));
        }
        let storage = match &self.data_dir {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        Ok(Arc::new(storage))
    }

    /// Human-readable description of where canvases are kept.
    pub fn storage_location(&self) -> String {
        match (&self.data_dir, self.memory) {
            (_, true) => "memory".to_string(),
            (Some(dir), false) => dir.display().to_string(),
            (None, false) => "the platform data directory".to_string(),
        }
    }
}
