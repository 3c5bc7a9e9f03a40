//! Drawing store and canvas view state.

use crate::factory::{self, DragPayload};
use crate::shapes::{NewShape, Shape, ShapeId, ShapeKind};
use kurbo::Point;
use serde::Serialize;
use uuid::Uuid;

/// The ordered collection of shapes on the canvas.
///
/// This is the single owner of shape data. Order is creation order and is kept
/// so exports are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    shapes: Vec<Shape>,
    /// Bumped by every mutation that changed something.
    revision: u64,
}

impl Drawing {
    /// Create an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a drawing holding `shapes` as-is.
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self { shapes, revision: 0 }
    }

    /// Assign a fresh ID to `shape` and append it.
    pub fn add(&mut self, shape: NewShape) -> &Shape {
        let id = Uuid::new_v4().to_string();
        log::debug!("Adding {} {}", shape.kind, id);
        self.shapes.push(Shape::with_id(id, shape));
        self.revision += 1;
        &self.shapes[self.shapes.len() - 1]
    }

    /// Replace the shape with ID `id`.
    ///
    /// The replacement keeps the existing ID and kind. Returns false, and leaves
    /// the drawing untouched, if no such shape exists.
    pub fn update(&mut self, id: &str, replacement: Shape) -> bool {
        let mut found = false;
        for shape in self.shapes.iter_mut().filter(|s| s.id == id) {
            *shape = Shape {
                id: shape.id.clone(),
                kind: shape.kind.clone(),
                ..replacement.clone()
            };
            found = true;
        }
        if found {
            self.revision += 1;
        } else {
            log::debug!("Ignoring update of unknown shape {}", id);
        }
        found
    }

    /// Remove the shape with ID `id`. No-op if absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.shapes.len();
        self.shapes.retain(|s| s.id != id);
        let removed = self.shapes.len() != before;
        if removed {
            self.revision += 1;
        } else {
            log::debug!("Ignoring removal of unknown shape {}", id);
        }
        removed
    }

    /// Discard every shape and adopt `shapes` verbatim.
    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        log::debug!("Replacing {} shapes with {}", self.shapes.len(), shapes.len());
        self.shapes = shapes;
        self.revision += 1;
    }

    /// Number of shapes of each known kind. Unknown kinds are not counted.
    pub fn counts_by_type(&self) -> ShapeCounts {
        let mut counts = ShapeCounts::default();
        for shape in &self.shapes {
            counts.increment(&shape.kind);
        }
        counts
    }

    /// Shapes in creation order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Get a shape by ID.
    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Change counter; differs whenever the contents may differ.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Per-kind tally of the shapes in a drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShapeCounts {
    pub square: usize,
    pub circle: usize,
    pub triangle: usize,
    pub diamond: usize,
    pub pentagon: usize,
    pub star: usize,
    pub hexagon: usize,
}

impl ShapeCounts {
    fn slot(&mut self, kind: &ShapeKind) -> Option<&mut usize> {
        match kind {
            ShapeKind::Square => Some(&mut self.square),
            ShapeKind::Circle => Some(&mut self.circle),
            ShapeKind::Triangle => Some(&mut self.triangle),
            ShapeKind::Diamond => Some(&mut self.diamond),
            ShapeKind::Pentagon => Some(&mut self.pentagon),
            ShapeKind::Star => Some(&mut self.star),
            ShapeKind::Hexagon => Some(&mut self.hexagon),
            ShapeKind::Other(_) => None,
        }
    }

    fn increment(&mut self, kind: &ShapeKind) {
        if let Some(count) = self.slot(kind) {
            *count += 1;
        }
    }

    /// Count for one kind; always zero for unknown kinds.
    pub fn get(&self, kind: &ShapeKind) -> usize {
        match kind {
            ShapeKind::Square => self.square,
            ShapeKind::Circle => self.circle,
            ShapeKind::Triangle => self.triangle,
            ShapeKind::Diamond => self.diamond,
            ShapeKind::Pentagon => self.pentagon,
            ShapeKind::Star => self.star,
            ShapeKind::Hexagon => self.hexagon,
            ShapeKind::Other(_) => 0,
        }
    }

    /// Sum over all known kinds.
    pub fn total(&self) -> usize {
        ShapeKind::ALL.iter().map(|k| self.get(k)).sum()
    }
}

/// Display theme. Has no effect on drawing logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Runtime canvas state (not persisted).
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    /// The drawing being edited.
    pub drawing: Drawing,
    /// Current display theme.
    pub theme: Theme,
    /// Top-left of the canvas container in client coordinates.
    origin: Point,
    /// Shape currently being dragged, if any.
    dragging: Option<ShapeId>,
}

impl Canvas {
    /// Create a canvas with an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas around an existing drawing.
    pub fn with_drawing(drawing: Drawing) -> Self {
        Self {
            drawing,
            ..Self::default()
        }
    }

    /// Set where the canvas container sits in client coordinates.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Handle a drop of drag-channel data at a client-space point.
    ///
    /// Returns the ID of the created shape. Payloads that fail to parse or
    /// that describe an existing shape are ignored.
    pub fn drop_payload(&mut self, payload: &str, client: Point) -> Option<ShapeId> {
        let template = match DragPayload::decode(payload) {
            Ok(p) => p.into_template()?,
            Err(e) => {
                log::debug!("Ignoring unreadable drop payload: {}", e);
                return None;
            }
        };
        if !client.is_finite() {
            log::debug!("Ignoring drop at non-finite point {:?}", client);
            return None;
        }
        let local = (client - self.origin).to_point();
        let shape = factory::instantiate(&template, local);
        Some(self.drawing.add(shape).id.clone())
    }

    /// Begin dragging a shape.
    pub fn drag_start(&mut self, id: &str) {
        if self.drawing.get(id).is_some() {
            self.dragging = Some(id.to_string());
        }
    }

    /// Move the shape under drag so its center follows the pointer.
    ///
    /// A pointer at exactly (0, 0) is the platform's end-of-drag report and
    /// is ignored, as are NaN and infinite positions. Returns true if a shape
    /// moved.
    pub fn drag_to(&mut self, id: &str, pointer: Point) -> bool {
        if pointer.x == 0.0 || pointer.y == 0.0 || !pointer.is_finite() {
            return false;
        }
        let Some(shape) = self.drawing.get(id) else {
            return false;
        };
        let moved = factory::reposition(shape, pointer, self.origin);
        self.drawing.update(id, moved)
    }

    /// Finish the current drag.
    pub fn drag_end(&mut self) {
        self.dragging = None;
    }

    /// ID of the shape being dragged.
    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// Advance a shape's color one palette step.
    pub fn click(&mut self, id: &str) -> bool {
        let Some(shape) = self.drawing.get(id) else {
            return false;
        };
        let recolored = factory::recolor(shape);
        self.drawing.update(id, recolored)
    }

    /// Delete a shape.
    pub fn double_click(&mut self, id: &str) -> bool {
        if self.dragging.as_deref() == Some(id) {
            self.dragging = None;
        }
        self.drawing.remove(id)
    }

    /// Switch between light and dark display.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeTemplate;
    use std::collections::HashSet;

    fn template(kind: ShapeKind) -> ShapeTemplate {
        ShapeTemplate::defaults()
            .into_iter()
            .find(|t| t.kind == kind)
            .unwrap()
    }

    fn add(drawing: &mut Drawing, kind: ShapeKind) -> ShapeId {
        drawing
            .add(template(kind).at(Point::new(0.0, 0.0)))
            .id()
            .to_string()
    }

    #[test]
    fn test_drawing_creation() {
        let drawing = Drawing::new();
        assert!(drawing.is_empty());
        assert_eq!(drawing.revision(), 0);
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut drawing = Drawing::new();
        let ids: HashSet<ShapeId> = (0..50)
            .map(|i| add(&mut drawing, ShapeKind::ALL[i % 7].clone()))
            .collect();
        assert_eq!(drawing.len(), 50);
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut drawing = Drawing::new();
        let a = add(&mut drawing, ShapeKind::Square);
        let b = add(&mut drawing, ShapeKind::Star);
        let order: Vec<&str> = drawing.shapes().iter().map(Shape::id).collect();
        assert_eq!(order, vec![a.as_str(), b.as_str()]);
    }

    #[test]
    fn test_update_replaces_fields() {
        let mut drawing = Drawing::new();
        let id = add(&mut drawing, ShapeKind::Circle);
        let mut replacement = drawing.get(&id).unwrap().clone();
        replacement.x = 42.0;
        replacement.color = "#0000ff".to_string();

        let before = drawing.revision();
        assert!(drawing.update(&id, replacement));
        let shape = drawing.get(&id).unwrap();
        assert_eq!(shape.x, 42.0);
        assert_eq!(shape.color, "#0000ff");
        assert!(drawing.revision() > before);
    }

    #[test]
    fn test_update_keeps_id_and_kind() {
        let mut drawing = Drawing::new();
        let id = add(&mut drawing, ShapeKind::Circle);
        let impostor = Shape::with_id("other", template(ShapeKind::Star).at(Point::new(1.0, 1.0)));

        assert!(drawing.update(&id, impostor));
        let shape = drawing.get(&id).unwrap();
        assert_eq!(shape.id(), id);
        assert_eq!(shape.kind, ShapeKind::Circle);
        assert_eq!(shape.x, 1.0);
        assert!(drawing.get("other").is_none());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut drawing = Drawing::new();
        add(&mut drawing, ShapeKind::Square);
        let snapshot = drawing.clone();
        let stray = Shape::with_id("missing", template(ShapeKind::Square).at(Point::ZERO));

        assert!(!drawing.update("missing", stray));
        assert_eq!(drawing, snapshot);
    }

    #[test]
    fn test_remove_shape() {
        let mut drawing = Drawing::new();
        let id = add(&mut drawing, ShapeKind::Square);
        assert!(drawing.remove(&id));
        assert!(drawing.is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut drawing = Drawing::new();
        add(&mut drawing, ShapeKind::Square);
        let snapshot = drawing.clone();
        assert!(!drawing.remove("missing"));
        assert_eq!(drawing, snapshot);
    }

    #[test]
    fn test_replace_all_adopts_verbatim() {
        let mut drawing = Drawing::new();
        add(&mut drawing, ShapeKind::Square);
        let incoming = vec![
            Shape::with_id("b", template(ShapeKind::Star).at(Point::new(5.0, 5.0))),
            Shape::with_id("a", template(ShapeKind::Circle).at(Point::new(1.0, 1.0))),
        ];
        drawing.replace_all(incoming.clone());
        assert_eq!(drawing.shapes(), incoming.as_slice());
    }

    #[test]
    fn test_counts_by_type() {
        let mut drawing = Drawing::new();
        add(&mut drawing, ShapeKind::Square);
        add(&mut drawing, ShapeKind::Square);
        add(&mut drawing, ShapeKind::Circle);

        let counts = drawing.counts_by_type();
        assert_eq!(
            counts,
            ShapeCounts {
                square: 2,
                circle: 1,
                ..ShapeCounts::default()
            }
        );
        assert_eq!(
            serde_json::to_value(counts).unwrap(),
            serde_json::json!({
                "square": 2, "circle": 1, "triangle": 0, "diamond": 0,
                "pentagon": 0, "star": 0, "hexagon": 0
            })
        );
    }

    #[test]
    fn test_counts_ignore_unknown_kinds() {
        let mut drawing = Drawing::new();
        drawing.replace_all(vec![
            Shape::with_id("a", template(ShapeKind::Hexagon).at(Point::ZERO)),
            Shape::with_id(
                "b",
                ShapeTemplate::new(ShapeKind::Other("blob".into()), "#fff").at(Point::ZERO),
            ),
        ]);
        let counts = drawing.counts_by_type();
        assert_eq!(counts.hexagon, 1);
        assert_eq!(counts.total(), 1);
        assert_eq!(counts.get(&ShapeKind::Other("blob".into())), 0);
    }

    #[test]
    fn test_drop_payload_uses_container_origin() {
        let mut canvas = Canvas::new();
        canvas.set_origin(Point::new(20.0, 10.0));
        let payload = DragPayload::new(template(ShapeKind::Triangle)).encode().unwrap();

        let id = canvas.drop_payload(&payload, Point::new(120.0, 110.0)).unwrap();
        let shape = canvas.drawing.get(&id).unwrap();
        assert_eq!((shape.x, shape.y), (60.0, 60.0));
        assert_eq!(shape.kind, ShapeKind::Triangle);
    }

    #[test]
    fn test_drop_ignores_bad_payloads() {
        let mut canvas = Canvas::new();
        assert!(canvas.drop_payload("{not json", Point::new(5.0, 5.0)).is_none());
        let existing = r##"{"id":"x","type":"star","x":0,"y":0,"width":80,"height":80,"rotation":0,"color":"#ff00ff"}"##;
        assert!(canvas.drop_payload(existing, Point::new(5.0, 5.0)).is_none());
        assert!(canvas.drawing.is_empty());
    }

    #[test]
    fn test_drag_moves_center_to_pointer() {
        let mut canvas = Canvas::new();
        let id = add(&mut canvas.drawing, ShapeKind::Square);
        canvas.drag_start(&id);
        assert_eq!(canvas.dragging(), Some(id.as_str()));

        assert!(canvas.drag_to(&id, Point::new(300.0, 200.0)));
        assert_eq!(canvas.drawing.get(&id).unwrap().center(), Point::new(300.0, 200.0));

        // End-of-drag (0, 0) reports are skipped
        assert!(!canvas.drag_to(&id, Point::new(0.0, 0.0)));
        assert_eq!(canvas.drawing.get(&id).unwrap().center(), Point::new(300.0, 200.0));

        canvas.drag_end();
        assert_eq!(canvas.dragging(), None);
    }

    #[test]
    fn test_drag_ignores_non_finite_pointer() {
        let mut canvas = Canvas::new();
        let id = add(&mut canvas.drawing, ShapeKind::Square);
        let before = canvas.drawing.clone();

        assert!(!canvas.drag_to(&id, Point::new(f64::NAN, 5.0)));
        assert!(!canvas.drag_to(&id, Point::new(5.0, f64::INFINITY)));
        assert_eq!(canvas.drawing, before);
    }

    #[test]
    fn test_drop_ignores_non_finite_point() {
        let mut canvas = Canvas::new();
        let payload = DragPayload::new(template(ShapeKind::Circle)).encode().unwrap();
        assert!(canvas.drop_payload(&payload, Point::new(f64::NAN, 10.0)).is_none());
        assert!(canvas.drop_payload(&payload, Point::new(10.0, f64::NEG_INFINITY)).is_none());
        assert!(canvas.drawing.is_empty());
    }

    #[test]
    fn test_click_cycles_color() {
        let mut canvas = Canvas::new();
        let id = add(&mut canvas.drawing, ShapeKind::Square);
        assert!(canvas.click(&id));
        assert_eq!(canvas.drawing.get(&id).unwrap().color, "#00ff00");
        assert!(!canvas.click("missing"));
    }

    #[test]
    fn test_double_click_deletes() {
        let mut canvas = Canvas::new();
        let id = add(&mut canvas.drawing, ShapeKind::Square);
        canvas.drag_start(&id);
        assert!(canvas.double_click(&id));
        assert!(canvas.drawing.is_empty());
        assert_eq!(canvas.dragging(), None);
    }

    #[test]
    fn test_toggle_theme() {
        let mut canvas = Canvas::new();
        assert_eq!(canvas.theme, Theme::Light);
        canvas.toggle_theme();
        assert_eq!(canvas.theme, Theme::Dark);
        canvas.toggle_theme();
        assert_eq!(canvas.theme, Theme::Light);
    }
}
