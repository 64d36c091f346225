//! Handle definitions for element manipulation.

use crate::element::Element;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in canvas pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// Distance from the top edge to the rotation grip.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Grabbing this corner moves the left edge (otherwise the right one).
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// Grabbing this corner moves the top edge (otherwise the bottom one).
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// The kind of handle - determines what manipulation it performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Corner(Corner),
    Rotate,
}

/// Visual shape of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleShape {
    #[default]
    Square,
    Circle,
}

/// A manipulation handle attached to the selected element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    /// Position in canvas coordinates.
    pub position: Point,
    pub shape: HandleShape,
}

impl Handle {
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self {
            kind,
            position,
            shape: HandleShape::default(),
        }
    }

    pub fn with_shape(mut self, shape: HandleShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Corner handles plus a rotation grip, following the element's rotation.
pub fn get_handles(element: &Element) -> Vec<Handle> {
    let bounds = element.bounds();
    let transform = element.transform();

    let mut handles: Vec<Handle> = Corner::ALL
        .into_iter()
        .map(|corner| {
            let x = if corner.moves_left_edge() { bounds.x0 } else { bounds.x1 };
            let y = if corner.moves_top_edge() { bounds.y0 } else { bounds.y1 };
            Handle::new(HandleKind::Corner(corner), transform * Point::new(x, y))
        })
        .collect();

    let grip = Point::new(bounds.center().x, bounds.y0 - ROTATE_HANDLE_OFFSET);
    handles.push(Handle::new(HandleKind::Rotate, transform * grip).with_shape(HandleShape::Circle));
    handles
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(element: &Element, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(element)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}
