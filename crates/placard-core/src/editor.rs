//! The editor controller.
//!
//! [`Editor`] owns the document, the selection, the interaction state machine
//! and the properties panel, and writes the layout back to storage after
//! every completed change. Hosts feed it pointer and key events in canvas
//! coordinates and render from its accessors.

use crate::config::EditorConfig;
use crate::document::{LayerDirection, LayoutDocument};
use crate::element::{Element, ElementId, ElementKind};
use crate::export::ExportFile;
use crate::input::{KeyEvent, Modifiers, PointerEvent};
use crate::interaction::{Interaction, Mode, MoveOutcome};
use crate::panels::{LayerEntry, PropertiesPanel, PropertyField, apply_property, layer_entries};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::storage::{LayoutStore, Storage};
use crate::widget::{HANDLE_HIT_TOLERANCE, Handle, HandleKind, WidgetManager, hit_test_handles};
use kurbo::Point;
use std::sync::Arc;

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A handle of the selected element.
    Handle(HandleKind),
    /// An element body. The element is now selected.
    Element(ElementId),
    /// Empty canvas. The selection was cleared.
    Canvas,
}

/// Layout editor state and operations.
pub struct Editor<S: Storage> {
    config: EditorConfig,
    document: LayoutDocument,
    widgets: WidgetManager,
    interaction: Interaction,
    properties: PropertiesPanel,
    store: LayoutStore<S>,
}

impl<S: Storage> Editor<S> {
    /// Create an empty editor. Nothing is read from storage.
    pub fn new(config: EditorConfig, storage: Arc<S>) -> Self {
        let store = LayoutStore::new(storage, config.storage_key.clone());
        Self {
            document: LayoutDocument::new(config.canvas()),
            widgets: WidgetManager::new(),
            interaction: Interaction::new(),
            properties: PropertiesPanel::default(),
            store,
            config,
        }
    }

    /// Create an editor and restore the stored layout.
    pub fn open(config: EditorConfig, storage: Arc<S>) -> Self {
        let mut editor = Self::new(config, storage);
        editor.load();
        editor
    }

    /// Append the stored layout to the document. Returns the number of
    /// elements restored.
    pub fn load(&mut self) -> usize {
        self.store.load_into(&mut self.document)
    }

    /// Write the layout to storage. Failures are logged, not returned.
    pub fn save(&mut self) {
        if let Err(e) = self.store.save(&self.document) {
            log::error!("Failed to save layout: {}", e);
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &LayoutDocument {
        &self.document
    }

    pub fn store(&self) -> &LayoutStore<S> {
        &self.store
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.widgets.selected()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.widgets.selected().and_then(|id| self.document.get(id))
    }

    pub fn mode(&self) -> &Mode {
        self.interaction.mode()
    }

    pub fn properties(&self) -> &PropertiesPanel {
        &self.properties
    }

    /// Layer panel rows in list order.
    pub fn layers(&self) -> Vec<LayerEntry> {
        layer_entries(&self.document, &self.widgets)
    }

    /// Handles of the selected element.
    pub fn handles(&self) -> Vec<Handle> {
        self.widgets.handles(&self.document)
    }

    // --- Toolbar and selection ---

    /// Toolbar action: create an element of `kind` on top of the stack.
    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        let id = self.document.create(kind).id();
        log::info!("Added {}", self.document.get(id).map(Element::name).unwrap_or_default());
        self.save();
        id
    }

    /// Select an element and push its fields into the properties panel.
    /// Returns false if the element does not exist.
    pub fn select(&mut self, id: ElementId) -> bool {
        let Some(element) = self.document.get(id) else {
            return false;
        };
        self.widgets.select(id);
        self.properties.refresh(element);
        true
    }

    /// Clear the selection, ending any manipulation in progress.
    pub fn clear_selection(&mut self) {
        self.interaction.end();
        self.widgets.clear_selection();
    }

    /// Remove every element and the stored layout. Shape counters are kept
    /// for the rest of the session.
    pub fn clear(&mut self) {
        self.clear_selection();
        self.document.clear();
        if let Err(e) = self.store.clear() {
            log::error!("Failed to remove stored layout: {}", e);
        }
    }

    // --- Pointer input ---

    /// Resolve a pointer-down and enter the matching mode.
    ///
    /// Handles of the selection are tested before element bodies, and
    /// bodies front to back. Returns None while another manipulation is
    /// still in progress.
    pub fn pointer_down(&mut self, point: Point) -> Option<PointerTarget> {
        if !self.interaction.is_idle() {
            log::debug!("Pointer down ignored while {}", self.interaction.mode().name());
            return None;
        }

        if let Some(element) = self.widgets.selected().and_then(|id| self.document.get(id)) {
            if let Some(kind) = hit_test_handles(element, point, HANDLE_HIT_TOLERANCE) {
                match kind {
                    HandleKind::Corner(corner) => self.interaction.begin_resize(element, corner, point),
                    HandleKind::Rotate => self.interaction.begin_rotate(element),
                };
                return Some(PointerTarget::Handle(kind));
            }
        }

        match self.document.element_at(point) {
            Some(id) => {
                self.select(id);
                if let Some(element) = self.document.get(id) {
                    self.interaction.begin_drag(element, point);
                }
                Some(PointerTarget::Element(id))
            }
            None => {
                self.clear_selection();
                Some(PointerTarget::Canvas)
            }
        }
    }

    /// Apply a pointer move to the element under manipulation. Rotation is
    /// reflected live into the properties panel.
    pub fn pointer_move(&mut self, point: Point) -> Option<MoveOutcome> {
        let outcome = self.interaction.pointer_move(&mut self.document, point)?;
        if let MoveOutcome::Rotated(angle) = outcome {
            self.properties.rotation = angle;
        }
        Some(outcome)
    }

    /// End any manipulation and persist. Returns the mode that ended.
    pub fn pointer_up(&mut self) -> Mode {
        let ended = self.interaction.end();
        if let Some(element) = self.widgets.selected().and_then(|id| self.document.get(id)) {
            self.properties.refresh(element);
        }
        self.save();
        ended
    }

    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => {
                self.pointer_down(position);
            }
            PointerEvent::Move { position } => {
                self.pointer_move(position);
            }
            PointerEvent::Up { .. } => {
                self.pointer_up();
            }
        }
    }

    // --- Keyboard ---

    /// Run the shortcut bound to `key`. Returns true if the key is bound,
    /// so the host can suppress the browser default.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> bool {
        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            return false;
        };
        log::debug!("Shortcut {:?}", action);
        match action {
            ShortcutAction::Save => self.save(),
            ShortcutAction::Duplicate => {
                self.duplicate_selected();
            }
            ShortcutAction::Deselect => self.clear_selection(),
            ShortcutAction::Delete => {
                self.delete_selected();
            }
            ShortcutAction::Nudge { dx, dy } => {
                self.nudge_selected(dx, dy);
            }
        }
        true
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        self.handle_key(&event.key, event.modifiers)
    }

    // --- Selection actions ---

    /// Duplicate the selection. The copy becomes the selection.
    pub fn duplicate_selected(&mut self) -> Option<ElementId> {
        let id = self.widgets.selected()?;
        let copy = self.document.duplicate(id)?.id();
        self.select(copy);
        self.save();
        Some(copy)
    }

    /// Remove the selected element and clear the selection.
    pub fn delete_selected(&mut self) -> Option<Element> {
        let id = self.widgets.selected()?;
        self.interaction.end();
        let removed = self.document.remove(id)?;
        self.widgets.remove(id);
        log::info!("Deleted {}", removed.name());
        self.save();
        Some(removed)
    }

    /// Move the selection by a pixel offset, clamped to the canvas.
    pub fn nudge_selected(&mut self, dx: i32, dy: i32) -> bool {
        let Some(id) = self.widgets.selected() else {
            return false;
        };
        if !self.document.nudge(id, dx, dy) {
            return false;
        }
        if let Some(element) = self.document.get(id) {
            self.properties.refresh(element);
        }
        self.save();
        true
    }

    /// Raise the selection one step in the stack.
    pub fn move_up(&mut self) -> bool {
        self.reorder_selected(LayerDirection::Up)
    }

    /// Lower the selection one step in the stack.
    pub fn move_down(&mut self) -> bool {
        self.reorder_selected(LayerDirection::Down)
    }

    fn reorder_selected(&mut self, direction: LayerDirection) -> bool {
        let Some(id) = self.widgets.selected() else {
            return false;
        };
        let moved = self.document.reorder(id, direction);
        self.save();
        moved
    }

    // --- Properties panel ---

    /// Apply a properties panel edit to the selection and persist.
    /// Returns false with no selection or when the field does not apply.
    pub fn set_property(&mut self, field: PropertyField, value: &str) -> bool {
        let canvas = self.document.canvas();
        let Some(element) = self.widgets.selected().and_then(|id| self.document.get_mut(id)) else {
            return false;
        };
        if !apply_property(element, field, value, canvas) {
            return false;
        }
        self.properties.refresh(element);
        if field == PropertyField::Background {
            self.properties.background = value.to_string();
        }
        self.save();
        true
    }

    // --- Export ---

    pub fn export_names(&self) -> Result<ExportFile, serde_json::Error> {
        ExportFile::names(&self.document)
    }

    pub fn export_html(&self) -> ExportFile {
        ExportFile::html(&self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::widget::Corner;

    fn editor() -> (Editor<MemoryStorage>, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (Editor::new(EditorConfig::default(), storage.clone()), storage)
    }

    #[test]
    fn test_add_element_persists() {
        let (mut editor, storage) = editor();
        editor.add_element(ElementKind::Rectangle);
        assert_eq!(editor.store().save_count(), 1);
        assert!(storage.get_item("layout").unwrap().unwrap().contains("\"rectangle\""));
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn test_pointer_down_selects_and_drags() {
        let (mut editor, _) = editor();
        let id = editor.add_element(ElementKind::Rectangle);

        let target = editor.pointer_down(Point::new(100.0, 100.0));
        assert_eq!(target, Some(PointerTarget::Element(id)));
        assert_eq!(editor.selected(), Some(id));
        assert_eq!(editor.mode().name(), "dragging");

        editor.pointer_move(Point::new(130.0, 90.0));
        let el = editor.document().get(id).unwrap();
        assert_eq!((el.left, el.top), (80, 40));

        let saves = editor.store().save_count();
        assert_eq!(editor.pointer_up().name(), "dragging");
        assert!(editor.mode().is_idle());
        assert_eq!(editor.store().save_count(), saves + 1);
        assert_eq!((editor.properties().x, editor.properties().y), (80, 40));
    }

    #[test]
    fn test_drag_clamps_to_boundary() {
        let (mut editor, _) = editor();
        let id = editor.add_element(ElementKind::Rectangle);
        editor.pointer_down(Point::new(60.0, 60.0));
        editor.pointer_move(Point::new(5000.0, -5000.0));
        let el = editor.document().get(id).unwrap();
        assert_eq!((el.left, el.top), (700, 0));
    }

    #[test]
    fn test_pointer_down_on_canvas_clears_selection() {
        let (mut editor, _) = editor();
        let id = editor.add_element(ElementKind::Rectangle);
        editor.select(id);

        assert_eq!(editor.pointer_down(Point::new(700.0, 500.0)), Some(PointerTarget::Canvas));
        assert_eq!(editor.selected(), None);
        assert!(editor.mode().is_idle());
    }

    #[test]
    fn test_handles_take_precedence() {
        let (mut editor, _) = editor();
        let id = editor.add_element(ElementKind::Rectangle);
        editor.select(id);

        // Bottom-right corner sits inside the element body too.
        let target = editor.pointer_down(Point::new(149.0, 149.0));
        assert_eq!(target, Some(PointerTarget::Handle(HandleKind::Corner(Corner::BottomRight))));
        editor.pointer_move(Point::new(199.0, 169.0));
        let el = editor.document().get(id).unwrap();
        assert_eq!((el.width, el.height), (150, 120));
        editor.pointer_up();
    }

    #[test]
    fn test_rotation_updates_panel_live() {
        let (mut editor, _) = editor();
        let id = editor.add_element(ElementKind::Rectangle);
        editor.select(id);

        let grip = editor
            .handles()
            .into_iter()
            .find(|h| h.kind == HandleKind::Rotate)
            .unwrap();
        assert_eq!(editor.pointer_down(grip.position), Some(PointerTarget::Handle(HandleKind::Rotate)));

        // Center is (100, 100); straight below is 90 degrees.
        editor.pointer_move(Point::new(100.0, 200.0));
        assert_eq!(editor.properties().rotation, 90);
        assert_eq!(editor.document().get(id).unwrap().rotation, 90);
    }

    #[test]
    fn test_pointer_down_ignored_while_busy() {
        let (mut editor, _) = editor();
        editor.add_element(ElementKind::Rectangle);
        editor.pointer_down(Point::new(100.0, 100.0));
        assert_eq!(editor.pointer_down(Point::new(700.0, 500.0)), None);
        assert_eq!(editor.mode().name(), "dragging");
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let (mut editor, _) = editor();
        let id = editor.add_element(ElementKind::Text);
        editor.select(id);

        assert!(editor.handle_key("ArrowRight", Modifiers::shift()));
        assert_eq!(editor.document().get(id).unwrap().left, 60);

        assert!(editor.handle_key("d", Modifiers::ctrl()));
        assert_eq!(editor.document().len(), 2);
        let copy = editor.selected().unwrap();
        assert_ne!(copy, id);
        assert_eq!(editor.document().get(copy).unwrap().name(), "Text 2");

        assert!(editor.handle_key("Escape", Modifiers::NONE));
        assert_eq!(editor.selected(), None);

        assert!(!editor.handle_key("x", Modifiers::NONE));
    }

    #[test]
    fn test_ctrl_s_saves() {
        let (mut editor, _) = editor();
        assert!(editor.handle_key_event(&KeyEvent::new("s", Modifiers::ctrl())));
        assert_eq!(editor.store().save_count(), 1);
    }

    #[test]
    fn test_delete_selected() {
        let (mut editor, _) = editor();
        let a = editor.add_element(ElementKind::Rectangle);
        editor.add_element(ElementKind::Ellipse);

        assert!(editor.delete_selected().is_none());
        assert_eq!(editor.document().len(), 2);

        editor.select(a);
        assert!(editor.handle_key("Delete", Modifiers::NONE));
        assert_eq!(editor.document().len(), 1);
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.document().elements()[0].z_index(), 1);
    }

    #[test]
    fn test_move_up_and_down() {
        let (mut editor, _) = editor();
        let a = editor.add_element(ElementKind::Rectangle);
        let b = editor.add_element(ElementKind::Line);

        assert!(!editor.move_up());
        editor.select(a);
        assert!(editor.move_up());
        assert_eq!(editor.document().position(a), Some(1));
        assert_eq!(editor.document().get(a).unwrap().z_index(), 2);
        assert_eq!(editor.document().get(b).unwrap().z_index(), 1);
        assert!(!editor.move_up());
        assert!(editor.move_down());
        assert_eq!(editor.document().position(a), Some(0));
    }

    #[test]
    fn test_set_property_requires_selection() {
        let (mut editor, _) = editor();
        editor.add_element(ElementKind::Rectangle);
        let saves = editor.store().save_count();
        assert!(!editor.set_property(PropertyField::X, "10"));
        assert_eq!(editor.store().save_count(), saves);
    }

    #[test]
    fn test_set_property_writes_through() {
        let (mut editor, _) = editor();
        let id = editor.add_element(ElementKind::Rectangle);
        editor.select(id);

        assert!(editor.set_property(PropertyField::X, "900"));
        assert_eq!(editor.document().get(id).unwrap().left, 700);
        assert_eq!(editor.properties().x, 700);

        assert!(editor.set_property(PropertyField::Background, "#ff0000"));
        assert_eq!(editor.document().get(id).unwrap().background_color, "#ff0000");
        assert_eq!(editor.properties().background, "#ff0000");

        assert!(!editor.set_property(PropertyField::Text, "nope"));
    }

    #[test]
    fn test_background_is_not_read_back() {
        let (mut editor, _) = editor();
        let a = editor.add_element(ElementKind::Rectangle);
        let b = editor.add_element(ElementKind::Rectangle);
        editor.select(a);
        editor.set_property(PropertyField::Background, "#123456");

        editor.select(b);
        assert_eq!(editor.properties().background, "#123456");
        assert_eq!(editor.document().get(b).unwrap().background_color, "");
    }

    #[test]
    fn test_open_restores_layout() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut editor = Editor::new(EditorConfig::default(), storage.clone());
            editor.add_element(ElementKind::Arrow);
            editor.add_element(ElementKind::Text);
        }
        let editor = Editor::open(EditorConfig::default(), storage);
        let names: Vec<_> = editor.layers().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Arrow 1", "Text 1"]);
    }

    #[test]
    fn test_clear_keeps_counters() {
        let (mut editor, storage) = editor();
        editor.add_element(ElementKind::Ellipse);
        editor.clear();
        assert!(editor.document().is_empty());
        assert!(!storage.contains("layout").unwrap());
        let id = editor.add_element(ElementKind::Ellipse);
        assert_eq!(editor.document().get(id).unwrap().index(), 2);
    }

    #[test]
    fn test_escape_stops_active_drag() {
        let (mut editor, _) = editor();
        let id = editor.add_element(ElementKind::Rectangle);
        editor.pointer_down(Point::new(100.0, 100.0));
        editor.pointer_move(Point::new(110.0, 100.0));

        assert!(editor.handle_key("Escape", Modifiers::NONE));
        assert!(editor.mode().is_idle());
        assert_eq!(editor.pointer_move(Point::new(300.0, 300.0)), None);
        assert_eq!(editor.document().get(id).unwrap().left, 60);
    }

    #[test]
    fn test_huge_typed_width_resizes_without_overflow() {
        let (mut editor, _) = editor();
        let id = editor.add_element(ElementKind::Rectangle);
        editor.select(id);
        assert!(editor.set_property(PropertyField::Width, "2147483647"));
        assert_eq!(editor.document().get(id).unwrap().width, crate::element::MAX_COORDINATE);

        let target = editor.pointer_down(Point::new(0.0, 50.0));
        assert_eq!(target, Some(PointerTarget::Handle(HandleKind::Corner(Corner::TopLeft))));
        editor.pointer_move(Point::new(-10.0, 50.0));
        let el = editor.document().get(id).unwrap();
        assert_eq!((el.left, el.width), (-10, crate::element::MAX_COORDINATE + 10));
        editor.pointer_up();
    }

    #[test]
    fn test_layers_follow_widget_state() {
        let (mut editor, _) = editor();
        let a = editor.add_element(ElementKind::Rectangle);
        editor.add_element(ElementKind::Text);
        editor.select(a);
        let active: Vec<_> = editor.layers().into_iter().map(|l| l.active).collect();
        assert_eq!(active, vec![true, false]);

        editor.delete_selected();
        assert!(editor.layers().iter().all(|l| !l.active));
    }
}
