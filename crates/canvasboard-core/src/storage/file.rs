//! File-based storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::persistence::{import_json, write_drawing};
use crate::shapes::Shape;
use std::fs;
use std::path::PathBuf;

/// Stores each canvas as a JSON file (`{"shapes": [...]}`) in a directory.
pub struct FileStorage {
    /// Base directory for canvas storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/canvasboard/canvases/`
    /// On Windows: `%LOCALAPPDATA%\canvasboard\canvases\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("canvasboard").join("canvases"))
    }

    fn canvas_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", encode_name(name)))
    }
}

/// File stem for a canvas name.
///
/// ASCII letters, digits, `-` and `_` pass through; every other byte becomes
/// `%XX`. Distinct names always get distinct stems, and no stem contains a
/// path separator.
fn encode_name(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    stem
}

impl Storage for FileStorage {
    fn save(&self, name: &str, canvas: &[Shape]) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.canvas_path(name);
        let result = write_drawing(&path, canvas).map_err(|e| StorageError::Io(e.to_string()));
        Box::pin(async move { result })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<Shape>>> {
        let path = self.canvas_path(name);
        let name = name.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(name));
            }

            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;

            import_json(&json).map(|state| state.shapes).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })
        })
    }
}
