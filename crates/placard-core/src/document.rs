//! The layout document: an ordered layer list of elements.

use crate::element::{CanvasSize, Element, ElementId, ElementKind, ShapeCounters};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Direction for moving an element within the layer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerDirection {
    /// Toward the end of the list (higher in the stack).
    Up,
    /// Toward the start of the list (lower in the stack).
    Down,
}

/// All placed elements, back to front.
///
/// List position defines stacking: index 0 is z-index 1. Every mutating
/// operation relabels z-indices so they stay a contiguous `1..=N`.
#[derive(Debug, Clone, Default)]
pub struct LayoutDocument {
    elements: Vec<Element>,
    counters: ShapeCounters,
    canvas: CanvasSize,
}

impl LayoutDocument {
    /// Create an empty document for a canvas of the given size.
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            elements: Vec::new(),
            counters: ShapeCounters::new(),
            canvas,
        }
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn counters(&self) -> &ShapeCounters {
        &self.counters
    }

    /// Elements in stacking order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    /// Position of an element in the layer list.
    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    /// Create a new element of `kind` on top of the stack.
    pub fn create(&mut self, kind: ElementKind) -> &Element {
        let index = self.counters.next(kind);
        let mut element = Element::new(kind, index);
        element.clamp_to(self.canvas);
        self.push(element)
    }

    /// Duplicate an element, offset by (+20, +20), on top of the stack.
    /// The offset is applied as is, even past the canvas edge.
    pub fn duplicate(&mut self, id: ElementId) -> Option<&Element> {
        let kind = self.get(id)?.kind;
        let index = self.counters.next(kind);
        let copy = self.get(id)?.duplicate(index);
        Some(self.push(copy))
    }

    /// Append a restored element, keeping its kind and index as stored.
    pub(crate) fn restore(&mut self, element: Element) -> &Element {
        self.counters.observe(element.kind, element.index);
        self.push(element)
    }

    fn push(&mut self, element: Element) -> &Element {
        self.elements.push(element);
        self.reassign_z_indices();
        let last = self.elements.len() - 1;
        &self.elements[last]
    }

    /// Remove an element by identity.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let pos = self.position(id)?;
        let removed = self.elements.remove(pos);
        self.reassign_z_indices();
        Some(removed)
    }

    /// Swap an element with its neighbour. Returns false at either end.
    pub fn reorder(&mut self, id: ElementId, direction: LayerDirection) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let target = match direction {
            LayerDirection::Up if pos + 1 < self.elements.len() => pos + 1,
            LayerDirection::Down if pos > 0 => pos - 1,
            _ => return false,
        };
        self.elements.swap(pos, target);
        self.reassign_z_indices();
        true
    }

    /// Move an element to a new position, clamped to the canvas.
    pub fn move_to(&mut self, id: ElementId, left: i32, top: i32) -> bool {
        let canvas = self.canvas;
        let Some(element) = self.get_mut(id) else {
            return false;
        };
        element.left = canvas.clamp_left(left, element.width);
        element.top = canvas.clamp_top(top, element.height);
        true
    }

    /// Move an element by a delta, clamped to the canvas.
    pub fn nudge(&mut self, id: ElementId, dx: i32, dy: i32) -> bool {
        let Some((left, top)) = self.get(id).map(|el| (el.left, el.top)) else {
            return false;
        };
        self.move_to(id, left.saturating_add(dx), top.saturating_add(dy))
    }

    /// Topmost element whose body contains `point`.
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|el| el.hit_test(point))
            .map(|el| el.id)
    }

    /// Remove every element. Counters are kept.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    fn reassign_z_indices(&mut self) {
        for (i, element) in self.elements.iter_mut().enumerate() {
            element.z_index = i as u32 + 1;
        }
    }
}
