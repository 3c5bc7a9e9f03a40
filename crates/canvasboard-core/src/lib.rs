//! Canvas Board Core Library
//!
//! Shape model, drawing store and persistence for the Canvas Board drawing board.

pub mod board;
pub mod canvas;
pub mod factory;
pub mod persistence;
pub mod shapes;
pub mod storage;

pub use kurbo;

pub use board::{Board, BoardEvent, BoardSender, Notice, ShapeSelector};
pub use canvas::{Canvas, Drawing, ShapeCounts, Theme};
pub use factory::{DragPayload, instantiate, recolor, reposition};
pub use persistence::{
    DrawingState, EXPORT_FILE_NAME, PersistenceError, PersistenceResult, RemoteClient,
    RemoteConfig,
};
pub use shapes::{PALETTE, Shape, ShapeId, ShapeKind, ShapeTemplate, next_color};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
