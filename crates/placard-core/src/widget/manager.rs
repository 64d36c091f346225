//! Widget manager tracking the single selected element.

use super::handles::{Handle, get_handles};
use super::state::WidgetState;
use crate::document::LayoutDocument;
use crate::element::ElementId;

/// Tracks UI state for elements in the document.
///
/// At most one element is selected. The selection is a weak reference: it
/// is cleared when its target is removed.
#[derive(Debug, Clone, Default)]
pub struct WidgetManager {
    selected: Option<ElementId>,
}

impl WidgetManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: ElementId) -> WidgetState {
        if self.is_selected(id) {
            WidgetState::Selected
        } else {
            WidgetState::Normal
        }
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Select an element, deselecting the previous one first.
    /// Returns the previously selected element.
    pub fn select(&mut self, id: ElementId) -> Option<ElementId> {
        let previous = self.clear_selection();
        self.selected = Some(id);
        previous.filter(|&prev| prev != id)
    }

    /// Clear the selection, returning what was selected.
    pub fn clear_selection(&mut self) -> Option<ElementId> {
        self.selected.take()
    }

    /// Forget a removed element.
    pub fn remove(&mut self, id: ElementId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Handles for the selected element, if any.
    pub fn handles(&self, document: &LayoutDocument) -> Vec<Handle> {
        self.selected
            .and_then(|id| document.get(id))
            .map(get_handles)
            .unwrap_or_default()
    }
}
