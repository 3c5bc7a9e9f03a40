//! The board: single owner of the canvas and the event channel that feeds it.
//!
//! Everything that wants to change the drawing (the shape selector, pointer
//! glue, finished file reads, finished server calls) holds a [`BoardSender`]
//! and posts a [`BoardEvent`]. The board applies events in the order they
//! arrive, so when two remote loads overlap the one that lands last wins.

use crate::canvas::{Canvas, Drawing};
use crate::factory::DragPayload;
use crate::persistence::{DrawingState, PersistenceError};
use crate::shapes::{Shape, ShapeId, ShapeKind, ShapeTemplate};
use kurbo::Point;
use std::fmt;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Something that happened which may change the board.
#[derive(Debug)]
pub enum BoardEvent {
    /// Drag-channel data dropped at a client-space point.
    DropTemplate { payload: String, point: Point },
    /// A shape on the canvas started being dragged.
    DragStart(ShapeId),
    /// The dragged shape's pointer moved.
    DragTo { id: ShapeId, pointer: Point },
    /// The drag finished.
    DragEnd,
    /// Single click on a shape (recolor).
    Click(ShapeId),
    /// Double click on a shape (delete).
    DoubleClick(ShapeId),
    /// Switch light/dark display.
    ToggleTheme,
    /// A local file import finished.
    Imported(Result<DrawingState, PersistenceError>),
    /// A remote load finished.
    RemoteLoaded(Result<Vec<Shape>, PersistenceError>),
    /// A remote save finished.
    RemoteSaved(Result<String, PersistenceError>),
}

/// A message for the user, produced while applying events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Info(msg) | Notice::Error(msg) => f.write_str(msg),
        }
    }
}

impl From<PersistenceError> for Notice {
    fn from(err: PersistenceError) -> Self {
        Notice::Error(err.to_string())
    }
}

/// Cloneable handle for posting events to a [`Board`].
#[derive(Debug, Clone)]
pub struct BoardSender {
    tx: Sender<BoardEvent>,
}

impl BoardSender {
    /// Post an event. Events sent after the board is gone are dropped.
    pub fn send(&self, event: BoardEvent) {
        if let Err(e) = self.tx.send(event) {
            log::warn!("Board closed, dropping event: {:?}", e.0);
        }
    }
}

/// Top-level owner of the canvas.
pub struct Board {
    canvas: Canvas,
    tx: Sender<BoardEvent>,
    rx: Receiver<BoardEvent>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board with an empty drawing.
    pub fn new() -> Self {
        Self::with_drawing(Drawing::new())
    }

    /// Create a board around an existing drawing.
    pub fn with_drawing(drawing: Drawing) -> Self {
        let (tx, rx) = channel();
        Self {
            canvas: Canvas::with_drawing(drawing),
            tx,
            rx,
        }
    }

    /// A new handle for posting events.
    pub fn sender(&self) -> BoardSender {
        BoardSender { tx: self.tx.clone() }
    }

    /// A selector wired to this board.
    pub fn selector(&self) -> ShapeSelector {
        ShapeSelector::new(self.sender())
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn drawing(&self) -> &Drawing {
        &self.canvas.drawing
    }

    /// Apply every pending event, in arrival order.
    pub fn pump(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            if let Some(notice) = self.handle(event) {
                notices.push(notice);
            }
        }
        notices
    }

    /// Apply a single event.
    pub fn handle(&mut self, event: BoardEvent) -> Option<Notice> {
        match event {
            BoardEvent::DropTemplate { payload, point } => {
                self.canvas.drop_payload(&payload, point);
                None
            }
            BoardEvent::DragStart(id) => {
                self.canvas.drag_start(&id);
                None
            }
            BoardEvent::DragTo { id, pointer } => {
                self.canvas.drag_to(&id, pointer);
                None
            }
            BoardEvent::DragEnd => {
                self.canvas.drag_end();
                None
            }
            BoardEvent::Click(id) => {
                self.canvas.click(&id);
                None
            }
            BoardEvent::DoubleClick(id) => {
                self.canvas.double_click(&id);
                None
            }
            BoardEvent::ToggleTheme => {
                self.canvas.toggle_theme();
                None
            }
            BoardEvent::Imported(result) => match result {
                Ok(state) => {
                    log::info!("Imported {} shapes", state.shapes.len());
                    self.canvas.drawing.replace_all(state.shapes);
                    None
                }
                Err(e) => {
                    log::error!("Error importing file: {}", e);
                    Some(e.into())
                }
            },
            BoardEvent::RemoteLoaded(result) => match result {
                Ok(shapes) => {
                    let count = shapes.len();
                    self.canvas.drawing.replace_all(shapes);
                    Some(Notice::Info(format!("Loaded {} shapes", count)))
                }
                Err(e) => {
                    log::error!("Error loading canvas: {}", e);
                    Some(e.into())
                }
            },
            BoardEvent::RemoteSaved(result) => match result {
                Ok(name) => Some(Notice::Info(format!("Saved canvas '{}'", name))),
                Err(e) => {
                    log::error!("Error saving canvas: {}", e);
                    Some(e.into())
                }
            },
        }
    }
}

/// The palette of templates a user drags shapes from.
pub struct ShapeSelector {
    templates: Vec<ShapeTemplate>,
    sender: BoardSender,
}

impl ShapeSelector {
    /// Selector offering the default templates.
    pub fn new(sender: BoardSender) -> Self {
        Self {
            templates: ShapeTemplate::defaults(),
            sender,
        }
    }

    pub fn templates(&self) -> &[ShapeTemplate] {
        &self.templates
    }

    /// Drag-channel data for dragging `kind` out of the selector.
    pub fn drag_payload(&self, kind: &ShapeKind) -> Option<String> {
        let template = self.templates.iter().find(|t| &t.kind == kind)?;
        match DragPayload::new(template.clone()).encode() {
            Ok(payload) => Some(payload),
            Err(e) => {
                log::error!("Failed to encode drag payload: {}", e);
                None
            }
        }
    }

    /// Drag `kind` onto the canvas and release it at a client-space point.
    ///
    /// Returns false if the selector has no template for `kind`.
    pub fn drop_at(&self, kind: &ShapeKind, point: Point) -> bool {
        let Some(payload) = self.drag_payload(kind) else {
            return false;
        };
        self.sender.send(BoardEvent::DropTemplate { payload, point });
        true
    }
}
