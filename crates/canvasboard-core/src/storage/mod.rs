//! Storage backends for named canvases.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::shapes::Shape;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Canvas not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for canvas storage backends.
///
/// A canvas is the shape list saved under a user-chosen name. Saving under an
/// existing name overwrites it.
pub trait Storage: Send + Sync {
    /// Save a canvas.
    fn save(&self, name: &str, canvas: &[Shape]) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a canvas. Unknown names are [`StorageError::NotFound`].
    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<Shape>>>;
}
