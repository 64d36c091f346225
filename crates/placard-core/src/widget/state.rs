//! Widget state definitions.

/// The UI state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// Plain display, no handles.
    #[default]
    Normal,
    /// Selected: drawn with the selected marker and handles.
    Selected,
}

impl WidgetState {
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected)
    }
}
