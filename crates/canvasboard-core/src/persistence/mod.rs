//! Converting drawings to and from their external representations.
//!
//! Two exchanges exist: a local JSON file (`{"shapes": [...]}`) and a remote
//! save/load server keyed by canvas name.

mod remote;

pub use remote::{DEFAULT_SERVER_URL, LoadResponse, RemoteClient, RemoteConfig, SaveRequest};

use crate::shapes::Shape;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the file written by [`export_to_file`].
pub const EXPORT_FILE_NAME: &str = "drawing.json";

/// Persistence errors. None of them leave the drawing modified.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The import text was not a drawing.
    #[error("Invalid file format: {0}")]
    MalformedImport(String),
    /// The server rejected a save, or it could not be reached.
    #[error("{0}")]
    RemoteSaveFailure(String),
    /// The server rejected a load, or it could not be reached.
    #[error("{0}")]
    RemoteLoadFailure(String),
    /// The load response had no canvas in it.
    #[error("No canvas data found for '{0}'")]
    MissingCanvasData(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// The local file format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingState {
    pub shapes: Vec<Shape>,
}

/// Serialize shapes to the local file format.
pub fn export_json(shapes: &[Shape]) -> PersistenceResult<String> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        shapes: &'a [Shape],
    }

    serde_json::to_string(&Borrowed { shapes })
        .map_err(|e| PersistenceError::Io(format!("Failed to serialize drawing: {}", e)))
}

/// Parse the local file format.
pub fn import_json(text: &str) -> PersistenceResult<DrawingState> {
    serde_json::from_str(text).map_err(|e| PersistenceError::MalformedImport(e.to_string()))
}

/// Write `drawing.json` into `dir` and return its path.
pub fn export_to_file(dir: &Path, shapes: &[Shape]) -> PersistenceResult<PathBuf> {
    let path = dir.join(EXPORT_FILE_NAME);
    write_drawing(&path, shapes)?;
    Ok(path)
}

/// Write shapes in the local file format to an exact path.
pub fn write_drawing(path: &Path, shapes: &[Shape]) -> PersistenceResult<()> {
    let json = export_json(shapes)?;
    fs::write(path, json)
        .map_err(|e| PersistenceError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

/// Read a `.json` file in the local file format.
pub fn import_from_file(path: &Path) -> PersistenceResult<DrawingState> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(PersistenceError::MalformedImport(format!(
            "{} is not a .json file",
            path.display()
        )));
    }

    let text = fs::read_to_string(path)
        .map_err(|e| PersistenceError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    import_json(&text)
}
