//! Shape definitions for the drawing board.

mod palette;

pub use palette::{PALETTE, next_color, palette_index};

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a shape.
///
/// Generated shapes carry a UUIDv4 string; imported drawings may carry any string.
pub type ShapeId = String;

/// Default edge length of a freshly dropped shape, in pixels.
pub const DEFAULT_SHAPE_SIZE: f64 = 80.0;

/// The kind of geometry a shape draws.
///
/// The closed set of seven kinds is what the selector offers. Drawings read from
/// disk or from the server may name other kinds; those are carried through
/// untouched in [`ShapeKind::Other`] so an import/export cycle is lossless.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    Square,
    Circle,
    Triangle,
    Diamond,
    Pentagon,
    Star,
    Hexagon,
    /// A kind outside the known set.
    Other(String),
}

impl ShapeKind {
    /// All known kinds, in selector order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Square,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Diamond,
        ShapeKind::Pentagon,
        ShapeKind::Star,
        ShapeKind::Hexagon,
    ];

    /// Wire name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Pentagon => "pentagon",
            ShapeKind::Star => "star",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Other(name) => name,
        }
    }
}

impl From<String> for ShapeKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "square" => ShapeKind::Square,
            "circle" => ShapeKind::Circle,
            "triangle" => ShapeKind::Triangle,
            "diamond" => ShapeKind::Diamond,
            "pentagon" => ShapeKind::Pentagon,
            "star" => ShapeKind::Star,
            "hexagon" => ShapeKind::Hexagon,
            _ => ShapeKind::Other(name),
        }
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when parsing a name that is not a known shape kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown shape type: {0}")]
pub struct UnknownShapeKind(pub String);

impl FromStr for ShapeKind {
    type Err = UnknownShapeKind;

    /// Strict parse: only the seven known kinds are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ShapeKind::from(s.to_ascii_lowercase()) {
            ShapeKind::Other(_) => Err(UnknownShapeKind(s.to_string())),
            kind => Ok(kind),
        }
    }
}

/// A shape placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Geometry kind. Fixed at creation.
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Left edge in canvas-local pixels.
    pub x: f64,
    /// Top edge in canvas-local pixels.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Fill color as a CSS hex string.
    pub color: String,
}

impl Shape {
    /// Reconstruct a shape with a specific ID (for storage and tests).
    pub fn with_id(id: impl Into<ShapeId>, shape: NewShape) -> Self {
        Self {
            id: id.into(),
            kind: shape.kind,
            x: shape.x,
            y: shape.y,
            width: shape.width,
            height: shape.height,
            rotation: shape.rotation,
            color: shape.color,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Bounding rectangle in canvas-local coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Center point in canvas-local coordinates.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}

/// A fully positioned shape that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShape {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    pub color: String,
}

/// A stamp for new shapes: everything except identity and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeTemplate {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    pub color: String,
}

impl ShapeTemplate {
    /// Default 80x80 unrotated template for a kind.
    pub fn new(kind: ShapeKind, color: impl Into<String>) -> Self {
        Self {
            kind,
            width: DEFAULT_SHAPE_SIZE,
            height: DEFAULT_SHAPE_SIZE,
            rotation: 0.0,
            color: color.into(),
        }
    }

    /// Position this template with its top-left corner at `origin`.
    pub fn at(&self, origin: Point) -> NewShape {
        NewShape {
            kind: self.kind.clone(),
            x: origin.x,
            y: origin.y,
            width: self.width,
            height: self.height,
            rotation: self.rotation,
            color: self.color.clone(),
        }
    }

    /// The seven templates the selector offers.
    pub fn defaults() -> Vec<ShapeTemplate> {
        vec![
            ShapeTemplate::new(ShapeKind::Square, "#ff0000"),
            ShapeTemplate::new(ShapeKind::Circle, "#00ff00"),
            ShapeTemplate::new(ShapeKind::Triangle, "#0000ff"),
            ShapeTemplate::new(ShapeKind::Diamond, "#ffff00"),
            ShapeTemplate::new(ShapeKind::Pentagon, "#ff8800"),
            ShapeTemplate::new(ShapeKind::Star, "#ff00ff"),
            ShapeTemplate::new(ShapeKind::Hexagon, "#00ffff"),
        ]
    }
}
