//! Pointer-driven manipulation: dragging, corner resizing and rotation.
//!
//! A single [`Interaction`] owns the current [`Mode`]. A new mode can only be
//! entered from [`Mode::Idle`], and any pointer-up returns to idle. All
//! geometry is computed from values captured at grab time plus the pointer
//! delta, so repeated moves never accumulate rounding error.

use crate::document::LayoutDocument;
use crate::element::{CanvasSize, Element, ElementId, MIN_RESIZE_SIZE};
use crate::widget::Corner;
use kurbo::{Point, Vec2};

/// Captured state for moving an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub element: ElementId,
    pub start_pointer: Point,
    pub start_left: i32,
    pub start_top: i32,
}

/// Captured state for resizing from a corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeState {
    pub element: ElementId,
    pub corner: Corner,
    pub start_pointer: Point,
    pub start_left: i32,
    pub start_top: i32,
    pub start_width: i32,
    pub start_height: i32,
}

/// Captured state for rotating around a fixed center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateState {
    pub element: ElementId,
    /// Bounding-box center at grab time. Not recomputed during the drag.
    pub center: Point,
}

/// The current manipulation mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
    Rotating(RotateState),
}

impl Mode {
    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Idle)
    }

    /// Element being manipulated, if any.
    pub fn element(&self) -> Option<ElementId> {
        match self {
            Mode::Idle => None,
            Mode::Dragging(s) => Some(s.element),
            Mode::Resizing(s) => Some(s.element),
            Mode::Rotating(s) => Some(s.element),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Dragging(_) => "dragging",
            Mode::Resizing(_) => "resizing",
            Mode::Rotating(_) => "rotating",
        }
    }
}

/// What a pointer move changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { left: i32, top: i32 },
    Resized { left: i32, top: i32, width: i32, height: i32 },
    Rotated(i32),
}

/// The interaction state machine.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    mode: Mode,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode.is_idle()
    }

    /// Start moving `element`. Returns false if another mode is active.
    pub fn begin_drag(&mut self, element: &Element, pointer: Point) -> bool {
        self.enter(Mode::Dragging(DragState {
            element: element.id(),
            start_pointer: pointer,
            start_left: element.left,
            start_top: element.top,
        }))
    }

    /// Start resizing `element` from `corner`.
    pub fn begin_resize(&mut self, element: &Element, corner: Corner, pointer: Point) -> bool {
        self.enter(Mode::Resizing(ResizeState {
            element: element.id(),
            corner,
            start_pointer: pointer,
            start_left: element.left,
            start_top: element.top,
            start_width: element.width,
            start_height: element.height,
        }))
    }

    /// Start rotating `element` around its current center.
    pub fn begin_rotate(&mut self, element: &Element) -> bool {
        self.enter(Mode::Rotating(RotateState {
            element: element.id(),
            center: element.center(),
        }))
    }

    fn enter(&mut self, mode: Mode) -> bool {
        if !self.mode.is_idle() {
            log::debug!("Ignoring {} while {}", mode.name(), self.mode.name());
            return false;
        }
        log::debug!("Interaction: idle -> {}", mode.name());
        self.mode = mode;
        true
    }

    /// Apply a pointer move to the element under manipulation.
    pub fn pointer_move(&mut self, document: &mut LayoutDocument, pointer: Point) -> Option<MoveOutcome> {
        let canvas = document.canvas();
        let element = document.get_mut(self.mode.element()?)?;

        match self.mode {
            Mode::Idle => None,
            Mode::Dragging(state) => {
                let (left, top) = drag_position(&state, element, pointer, canvas);
                element.left = left;
                element.top = top;
                Some(MoveOutcome::Moved { left, top })
            }
            Mode::Resizing(state) => {
                apply_resize(element, &state, pointer);
                Some(MoveOutcome::Resized {
                    left: element.left,
                    top: element.top,
                    width: element.width,
                    height: element.height,
                })
            }
            Mode::Rotating(state) => {
                let angle = rotation_angle(state.center, pointer);
                element.rotation = angle;
                Some(MoveOutcome::Rotated(angle))
            }
        }
    }

    /// End any manipulation, returning the mode that was active.
    pub fn end(&mut self) -> Mode {
        let previous = std::mem::take(&mut self.mode);
        if !previous.is_idle() {
            log::debug!("Interaction: {} -> idle", previous.name());
        }
        previous
    }
}

/// Pointer delta rounded to whole pixels.
fn pixel_delta(start: Point, pointer: Point) -> (i32, i32) {
    let delta: Vec2 = pointer - start;
    (delta.x.round() as i32, delta.y.round() as i32)
}

/// New position for a drag, clamped to the canvas on both axes.
pub fn drag_position(state: &DragState, element: &Element, pointer: Point, canvas: CanvasSize) -> (i32, i32) {
    let (dx, dy) = pixel_delta(state.start_pointer, pointer);
    (
        canvas.clamp_left(state.start_left.saturating_add(dx), element.width),
        canvas.clamp_top(state.start_top.saturating_add(dy), element.height),
    )
}

/// Resize `element` from the captured state.
///
/// Lines and arrows only change length. Other kinds move the grabbed edges;
/// each dimension is floored at [`MIN_RESIZE_SIZE`] without shifting the
/// position back, so shrinking past the floor makes the far edge jump.
/// The position is not clamped: growing from a right or bottom corner never
/// moves the element.
pub fn apply_resize(element: &mut Element, state: &ResizeState, pointer: Point) {
    let (dx, dy) = pixel_delta(state.start_pointer, pointer);

    if element.kind().resizes_by_length() {
        element.width = state.start_width.saturating_add(dx).max(MIN_RESIZE_SIZE);
        return;
    }

    let (width, left) = if state.corner.moves_left_edge() {
        (state.start_width.saturating_sub(dx), state.start_left.saturating_add(dx))
    } else {
        (state.start_width.saturating_add(dx), state.start_left)
    };
    let (height, top) = if state.corner.moves_top_edge() {
        (state.start_height.saturating_sub(dy), state.start_top.saturating_add(dy))
    } else {
        (state.start_height.saturating_add(dy), state.start_top)
    };

    element.width = width.max(MIN_RESIZE_SIZE);
    element.height = height.max(MIN_RESIZE_SIZE);
    element.left = left;
    element.top = top;
}

/// Angle from `center` to `pointer` in whole degrees.
pub fn rotation_angle(center: Point, pointer: Point) -> i32 {
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    dy.atan2(dx).to_degrees().round() as i32
}
