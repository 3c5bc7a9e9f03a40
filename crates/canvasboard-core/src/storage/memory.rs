//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::shapes::Shape;
use std::collections::HashMap;
use std::sync::RwLock;

/// Canvases held in a map for the lifetime of the process.
///
/// Used by the server when no data directory is configured, and by tests.
#[derive(Default)]
pub struct MemoryStorage {
    canvases: RwLock<HashMap<String, Vec<Shape>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned<E>(_: E) -> StorageError {
        StorageError::Other("Canvas map lock poisoned".to_string())
    }
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, canvas: &[Shape]) -> BoxFuture<'_, StorageResult<()>> {
        let result = self
            .canvases
            .write()
            .map(|mut canvases| {
                canvases.insert(name.to_string(), canvas.to_vec());
            })
            .map_err(Self::poisoned);
        Box::pin(async move { result })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<Shape>>> {
        let result = self
            .canvases
            .read()
            .map_err(Self::poisoned)
            .and_then(|canvases| {
                canvases
                    .get(name)
                    .cloned()
                    .ok_or_else(|| StorageError::NotFound(name.to_string()))
            });
        Box::pin(async move { result })
    }
}
