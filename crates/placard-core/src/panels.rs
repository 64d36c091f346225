//! Layer list and properties panel models.
//!
//! Both panels are derived views over the document and the selection. The
//! host renders them however it likes and reports edits back through
//! [`apply_property`].

use crate::document::LayoutDocument;
use crate::element::{CanvasSize, Element, ElementId};
use crate::persistence::parse_px;
use crate::widget::WidgetManager;
use serde::{Deserialize, Serialize};

/// One row in the layer panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub id: ElementId,
    pub name: String,
    pub active: bool,
}

/// Build the layer panel rows in list order.
pub fn layer_entries(document: &LayoutDocument, widgets: &WidgetManager) -> Vec<LayerEntry> {
    document
        .iter()
        .map(|el| LayerEntry {
            id: el.id(),
            name: el.name(),
            active: widgets.state(el.id()).is_selected(),
        })
        .collect()
}

/// Editable fields of the properties panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyField {
    Width,
    Height,
    X,
    Y,
    Rotation,
    Radius,
    Background,
    Text,
}

/// Values currently shown in the properties panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertiesPanel {
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
    pub rotation: i32,
    pub radius: i32,
    /// Last value typed into the color field. Never loaded from an element.
    pub background: String,
    pub text: String,
    pub text_visible: bool,
}

impl Default for PropertiesPanel {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            x: 0,
            y: 0,
            rotation: 0,
            radius: 0,
            background: "#000000".to_string(),
            text: String::new(),
            text_visible: false,
        }
    }
}

impl PropertiesPanel {
    /// Push an element's fields into the panel. The background field is
    /// left untouched.
    pub fn refresh(&mut self, element: &Element) {
        self.width = element.width;
        self.height = element.height;
        self.x = element.left;
        self.y = element.top;
        self.rotation = element.rotation;
        self.radius = element.border_radius;
        self.text_visible = element.kind().has_text();
        if let Some(text) = &element.text {
            self.text = text.clone();
        }
    }
}

/// Apply one edited field to an element.
///
/// Numeric input is parsed leniently (unparseable becomes 0). Positions are
/// clamped to the canvas; sizes are floored at 1 and the position is
/// re-clamped. Returns false when the field does not apply to the element.
pub fn apply_property(element: &mut Element, field: PropertyField, value: &str, canvas: CanvasSize) -> bool {
    match field {
        PropertyField::Width => {
            element.width = parse_px(value).max(1);
            element.clamp_to(canvas);
        }
        PropertyField::Height => {
            element.height = parse_px(value).max(1);
            element.clamp_to(canvas);
        }
        PropertyField::X => element.left = canvas.clamp_left(parse_px(value), element.width),
        PropertyField::Y => element.top = canvas.clamp_top(parse_px(value), element.height),
        PropertyField::Rotation => element.rotation = parse_px(value),
        PropertyField::Radius => element.border_radius = parse_px(value).max(0),
        PropertyField::Background => element.background_color = value.to_string(),
        PropertyField::Text => {
            if !element.kind().has_text() {
                return false;
            }
            element.text = Some(value.to_string());
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn doc() -> (LayoutDocument, ElementId) {
        let mut doc = LayoutDocument::new(CanvasSize::new(800, 600));
        let id = doc.create(ElementKind::Rectangle).id();
        (doc, id)
    }

    #[test]
    fn test_layer_entries_mark_selection() {
        let (mut doc, rect) = doc();
        doc.create(ElementKind::Text);

        let mut widgets = WidgetManager::new();
        assert!(layer_entries(&doc, &widgets).iter().all(|e| !e.active));

        widgets.select(rect);
        let entries = layer_entries(&doc, &widgets);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Rectangle 1", "Text 1"]);
        assert!(entries[0].active);
        assert!(!entries[1].active);
    }

    #[test]
    fn test_x_is_clamped_to_canvas() {
        let (mut doc, id) = doc();
        let canvas = doc.canvas();
        let el = doc.get_mut(id).unwrap();

        apply_property(el, PropertyField::X, "500", canvas);
        assert_eq!(el.left, 500);
        apply_property(el, PropertyField::X, "900", canvas);
        assert_eq!(el.left, 700);
        apply_property(el, PropertyField::X, "-4", canvas);
        assert_eq!(el.left, 0);
    }

    #[test]
    fn test_unparseable_number_is_zero() {
        let (mut doc, id) = doc();
        let canvas = doc.canvas();
        let el = doc.get_mut(id).unwrap();

        apply_property(el, PropertyField::Rotation, "abc", canvas);
        assert_eq!(el.rotation, 0);
        apply_property(el, PropertyField::Y, "", canvas);
        assert_eq!(el.top, 0);
    }

    #[test]
    fn test_rotation_is_not_normalized() {
        let (mut doc, id) = doc();
        let canvas = doc.canvas();
        let el = doc.get_mut(id).unwrap();
        apply_property(el, PropertyField::Rotation, "370", canvas);
        assert_eq!(el.rotation, 370);
    }

    #[test]
    fn test_width_reclamps_position() {
        let (mut doc, id) = doc();
        doc.move_to(id, 700, 0);
        let canvas = doc.canvas();
        let el = doc.get_mut(id).unwrap();

        apply_property(el, PropertyField::Width, "300px", canvas);
        assert_eq!(el.width, 300);
        assert_eq!(el.left, 500);
    }

    #[test]
    fn test_text_only_applies_to_text_elements() {
        let (mut doc, rect) = doc();
        let text = doc.create(ElementKind::Text).id();
        let canvas = doc.canvas();

        assert!(!apply_property(doc.get_mut(rect).unwrap(), PropertyField::Text, "x", canvas));
        assert_eq!(doc.get(rect).unwrap().text, None);

        assert!(apply_property(doc.get_mut(text).unwrap(), PropertyField::Text, "hello", canvas));
        assert_eq!(doc.get(text).unwrap().text.as_deref(), Some("hello"));
    }

    #[test]
    fn test_refresh_skips_background() {
        let (mut doc, id) = doc();
        doc.get_mut(id).unwrap().background_color = "#ff0000".to_string();

        let mut panel = PropertiesPanel::default();
        panel.background = "#00ff00".to_string();
        panel.refresh(doc.get(id).unwrap());

        assert_eq!(panel.background, "#00ff00");
        assert_eq!((panel.width, panel.height, panel.x, panel.y), (100, 100, 50, 50));
        assert!(!panel.text_visible);
    }
}
