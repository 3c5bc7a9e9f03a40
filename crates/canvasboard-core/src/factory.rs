//! Shape factory: turns templates and pointer positions into shapes.
//!
//! All positions here are canvas-local. The pointer always marks the center of
//! the shape, both when dropping a new one and while dragging an existing one.

use crate::shapes::{NewShape, Shape, ShapeTemplate, next_color};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Create a new shape from a template, centered on the drop point.
pub fn instantiate(template: &ShapeTemplate, drop: Point) -> NewShape {
    let half = Vec2::new(template.width / 2.0, template.height / 2.0);
    template.at(drop - half)
}

/// Move a shape so that its center sits under the pointer.
///
/// `pointer` is in the same (client) space as `container_origin`, the top-left
/// corner of the canvas container.
pub fn reposition(shape: &Shape, pointer: Point, container_origin: Point) -> Shape {
    let local = pointer - container_origin;
    Shape {
        x: local.x - shape.width / 2.0,
        y: local.y - shape.height / 2.0,
        ..shape.clone()
    }
}

/// Copy of the shape with its color advanced one palette step.
pub fn recolor(shape: &Shape) -> Shape {
    Shape {
        color: next_color(&shape.color).to_string(),
        ..shape.clone()
    }
}

/// Data carried on the drag channel while a template is dragged onto the canvas.
///
/// This is a template plus zeroed coordinates. A payload that carries an `id`
/// describes a shape that already exists and is not a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub template: ShapeTemplate,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl DragPayload {
    /// Payload for dragging `template` out of the selector.
    pub fn new(template: ShapeTemplate) -> Self {
        Self {
            id: None,
            template,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Serialize for the drag channel.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a drag channel string.
    pub fn decode(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// The template to stamp, or `None` if the payload names an existing shape.
    pub fn into_template(self) -> Option<ShapeTemplate> {
        match self.id {
            Some(_) => None,
            None => Some(self.template),
        }
    }
}
