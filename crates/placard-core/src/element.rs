//! Layout elements placed on the canvas.

use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an element.
pub type ElementId = Uuid;

/// Smallest width/height a corner resize can produce.
pub const MIN_RESIZE_SIZE: i32 = 30;

/// Position given to freshly created elements.
pub const DEFAULT_POSITION: (i32, i32) = (50, 50);

/// Offset applied to both axes when duplicating.
pub const DUPLICATE_OFFSET: i32 = 20;

/// Largest magnitude accepted for parsed geometry values.
pub const MAX_COORDINATE: i32 = 1_000_000;

/// Content given to new text elements.
pub const DEFAULT_TEXT: &str = "Text";

/// The kind of a placed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Text,
    Line,
    Arrow,
    Ellipse,
}

/// Error returned when parsing an unknown element kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown element type: {0}")]
pub struct UnknownKind(pub String);

impl ElementKind {
    /// All kinds, in toolbar order.
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Rectangle,
        ElementKind::Text,
        ElementKind::Line,
        ElementKind::Arrow,
        ElementKind::Ellipse,
    ];

    /// Lowercase name as stored in layouts.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Rectangle => "rectangle",
            ElementKind::Text => "text",
            ElementKind::Line => "line",
            ElementKind::Arrow => "arrow",
            ElementKind::Ellipse => "ellipse",
        }
    }

    /// Capitalized name used for display.
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Rectangle => "Rectangle",
            ElementKind::Text => "Text",
            ElementKind::Line => "Line",
            ElementKind::Arrow => "Arrow",
            ElementKind::Ellipse => "Ellipse",
        }
    }

    /// Default (width, height) for a new element of this kind.
    pub fn default_size(self) -> (i32, i32) {
        match self {
            ElementKind::Rectangle => (100, 100),
            ElementKind::Text => (120, 40),
            ElementKind::Line => (150, 4),
            ElementKind::Arrow => (150, 20),
            ElementKind::Ellipse => (100, 100),
        }
    }

    /// Lines and arrows resize by length only.
    pub fn resizes_by_length(self) -> bool {
        matches!(self, ElementKind::Line | ElementKind::Arrow)
    }

    /// Whether elements of this kind carry text content.
    pub fn has_text(self) -> bool {
        matches!(self, ElementKind::Text)
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            ElementKind::Rectangle => 0,
            ElementKind::Text => 1,
            ElementKind::Line => 2,
            ElementKind::Arrow => 3,
            ElementKind::Ellipse => 4,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: i32,
    pub height: i32,
}

impl CanvasSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Clamp a left offset so an element of `width` stays inside the canvas.
    pub fn clamp_left(&self, left: i32, width: i32) -> i32 {
        clamp_axis(left, self.width, width)
    }

    /// Clamp a top offset so an element of `height` stays inside the canvas.
    pub fn clamp_top(&self, top: i32, height: i32) -> i32 {
        clamp_axis(top, self.height, height)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Clamp `value` into `[0, extent - size]`. The lower bound wins when the
/// element is larger than the canvas.
pub fn clamp_axis(value: i32, extent: i32, size: i32) -> i32 {
    value.min(extent.saturating_sub(size)).max(0)
}

/// A placed shape, text box, line, arrow or ellipse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) kind: ElementKind,
    /// Per-kind sequence number, used for naming only.
    pub(crate) index: u32,
    /// Offset from the canvas origin.
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    /// Rotation in degrees. Never normalized.
    pub rotation: i32,
    pub background_color: String,
    /// Corner radius in pixels.
    pub border_radius: i32,
    /// Text content; only text elements carry it.
    pub text: Option<String>,
    /// Stacking order, kept equal to list position + 1 by the document.
    pub(crate) z_index: u32,
}

impl Element {
    /// Create an element of `kind` with default geometry.
    pub(crate) fn new(kind: ElementKind, index: u32) -> Self {
        let (width, height) = kind.default_size();
        Self {
            id: Uuid::new_v4(),
            kind,
            index,
            left: DEFAULT_POSITION.0,
            top: DEFAULT_POSITION.1,
            width,
            height,
            rotation: 0,
            background_color: String::new(),
            border_radius: 0,
            text: kind.has_text().then(|| DEFAULT_TEXT.to_string()),
            z_index: 0,
        }
    }

    /// Copy every field into a new element with a fresh id and index.
    pub(crate) fn duplicate(&self, index: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            index,
            left: self.left.saturating_add(DUPLICATE_OFFSET),
            top: self.top.saturating_add(DUPLICATE_OFFSET),
            ..self.clone()
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn z_index(&self) -> u32 {
        self.z_index
    }

    /// Human-readable name, e.g. "Rectangle 3".
    pub fn name(&self) -> String {
        format!("{} {}", self.kind.label(), self.index)
    }

    /// Unrotated bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.left as f64,
            self.top as f64,
            self.left.saturating_add(self.width) as f64,
            self.top.saturating_add(self.height) as f64,
        )
    }

    /// Center of the bounding box; rotation does not move it.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Transform from the element's unrotated frame to canvas coordinates.
    pub fn transform(&self) -> Affine {
        Affine::rotate_about((self.rotation as f64).to_radians(), self.center())
    }

    /// Check whether a canvas point falls on the rotated element body.
    pub fn hit_test(&self, point: Point) -> bool {
        let local = self.transform().inverse() * point;
        self.bounds().contains(local)
    }

    /// Keep the element inside the canvas.
    pub fn clamp_to(&mut self, canvas: CanvasSize) {
        self.left = canvas.clamp_left(self.left, self.width);
        self.top = canvas.clamp_top(self.top, self.height);
    }
}

/// Per-kind monotonic counters used to number new elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeCounters {
    counts: [u32; 5],
}

impl ShapeCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest index issued (or observed) for `kind`.
    pub fn current(&self, kind: ElementKind) -> u32 {
        self.counts[kind.slot()]
    }

    /// Bump the counter for `kind` and return the new value.
    pub fn next(&mut self, kind: ElementKind) -> u32 {
        let slot = &mut self.counts[kind.slot()];
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Raise the counter so it is at least `index`. Never lowers it.
    pub fn observe(&mut self, kind: ElementKind, index: u32) {
        let slot = &mut self.counts[kind.slot()];
        *slot = (*slot).max(index);
    }
}
