//! End-to-end editing scenarios driven through the public editor API.

use kurbo::Point;
use placard_core::{
    Editor, EditorConfig, ElementKind, MemoryStorage, Modifiers, PointerTarget, PropertyField,
    Storage,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn editor_with(storage: Arc<MemoryStorage>) -> Editor<MemoryStorage> {
    Editor::open(EditorConfig::default(), storage)
}

fn assert_z_order(editor: &Editor<MemoryStorage>) {
    for (i, el) in editor.document().iter().enumerate() {
        assert_eq!(el.z_index() as usize, i + 1, "z-index of {}", el.name());
    }
}

#[test]
fn test_rotation_370_is_stored_verbatim() {
    let storage = Arc::new(MemoryStorage::new());
    let mut editor = editor_with(storage.clone());
    let id = editor.add_element(ElementKind::Rectangle);
    editor.select(id);
    assert!(editor.set_property(PropertyField::Rotation, "370"));

    let reopened = editor_with(storage);
    assert_eq!(reopened.document().elements()[0].rotation, 370);
}

#[test]
fn test_loaded_index_advances_counter() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set_item(
            "layout",
            r#"[{"type":"text","index":3,"left":"10px","top":"10px","width":"120px",
                 "height":"40px","backgroundColor":"","text":"Hello","rotation":0,"zIndex":1}]"#,
        )
        .unwrap();

    let mut editor = editor_with(storage);
    assert_eq!(editor.document().len(), 1);
    let id = editor.add_element(ElementKind::Text);
    assert_eq!(editor.document().get(id).unwrap().index(), 4);
    assert_eq!(editor.document().get(id).unwrap().name(), "Text 4");

    let rect = editor.add_element(ElementKind::Rectangle);
    assert_eq!(editor.document().get(rect).unwrap().index(), 1);
}

#[test]
fn test_duplicate_copies_properties() {
    let mut editor = editor_with(Arc::new(MemoryStorage::new()));
    let id = editor.add_element(ElementKind::Text);
    editor.select(id);
    editor.set_property(PropertyField::Width, "200");
    editor.set_property(PropertyField::Rotation, "45");
    editor.set_property(PropertyField::Text, "Headline");

    assert!(editor.handle_key("d", Modifiers::ctrl()));
    let copy_id = editor.selected().unwrap();
    let original = editor.document().get(id).unwrap();
    let copy = editor.document().get(copy_id).unwrap();

    assert_eq!(copy.kind(), original.kind());
    assert_eq!((copy.width, copy.height), (original.width, original.height));
    assert_eq!(copy.rotation, original.rotation);
    assert_eq!(copy.text, original.text);
    assert_eq!((copy.left, copy.top), (original.left + 20, original.top + 20));
    assert!(copy.index() > original.index());
    assert_z_order(&editor);
}

#[test]
fn test_delete_removes_exactly_one() {
    let mut editor = editor_with(Arc::new(MemoryStorage::new()));
    editor.add_element(ElementKind::Rectangle);
    let middle = editor.add_element(ElementKind::Ellipse);
    editor.add_element(ElementKind::Line);

    assert!(editor.handle_key("Backspace", Modifiers::NONE));
    assert_eq!(editor.document().len(), 3);

    editor.select(middle);
    assert!(editor.handle_key("Backspace", Modifiers::NONE));
    assert_eq!(editor.document().len(), 2);
    assert!(editor.document().get(middle).is_none());
    assert_eq!(editor.selected(), None);
    assert_z_order(&editor);
}

#[test]
fn test_layout_round_trips_through_storage() {
    let storage = Arc::new(MemoryStorage::new());
    let mut editor = editor_with(storage.clone());
    for kind in ElementKind::ALL {
        editor.add_element(kind);
    }
    let rect = editor.document().elements()[0].id();
    editor.select(rect);
    editor.set_property(PropertyField::Background, "#abcdef");
    editor.set_property(PropertyField::X, "320");
    editor.set_property(PropertyField::Radius, "8");
    editor.move_up();

    let reopened = editor_with(storage);
    let before: Vec<_> = editor
        .document()
        .iter()
        .map(|e| (e.name(), e.left, e.top, e.width, e.height, e.rotation, e.background_color.clone(), e.text.clone(), e.border_radius))
        .collect();
    let after: Vec<_> = reopened
        .document()
        .iter()
        .map(|e| (e.name(), e.left, e.top, e.width, e.height, e.rotation, e.background_color.clone(), e.text.clone(), e.border_radius))
        .collect();
    assert_eq!(before, after);
    assert_z_order(&reopened);
}

#[test]
fn test_x_beyond_canvas_clamps() {
    let mut editor = editor_with(Arc::new(MemoryStorage::new()));
    let id = editor.add_element(ElementKind::Rectangle);
    editor.select(id);

    editor.set_property(PropertyField::X, "500");
    assert_eq!(editor.document().get(id).unwrap().left, 500);
    editor.set_property(PropertyField::X, "5000");
    assert_eq!(editor.document().get(id).unwrap().left, 700);
}

#[test]
fn test_resize_respects_minimum() {
    let mut editor = editor_with(Arc::new(MemoryStorage::new()));
    let id = editor.add_element(ElementKind::Ellipse);
    editor.select(id);

    // Drag the top-left corner far past the bottom-right one.
    assert!(matches!(
        editor.pointer_down(Point::new(50.0, 50.0)),
        Some(PointerTarget::Handle(_))
    ));
    editor.pointer_move(Point::new(400.0, 400.0));
    editor.pointer_up();

    let el = editor.document().get(id).unwrap();
    assert_eq!((el.width, el.height), (30, 30));
    assert_eq!((el.left, el.top), (400, 400));
}

#[test]
fn test_line_resizes_length_only() {
    let mut editor = editor_with(Arc::new(MemoryStorage::new()));
    let id = editor.add_element(ElementKind::Line);
    editor.select(id);

    // Right end of a 150x4 line at (50, 50).
    editor.pointer_down(Point::new(200.0, 54.0));
    editor.pointer_move(Point::new(100.0, 300.0));
    editor.pointer_up();

    let el = editor.document().get(id).unwrap();
    assert_eq!((el.left, el.top, el.width, el.height), (50, 50, 50, 4));
}

#[test]
fn test_every_pointer_up_persists() {
    let storage = Arc::new(MemoryStorage::new());
    let mut editor = editor_with(storage);
    editor.pointer_up();
    editor.pointer_up();
    assert_eq!(editor.store().save_count(), 2);
}

#[test]
fn test_malformed_storage_opens_empty() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item("layout", "definitely not json").unwrap();
    let editor = editor_with(storage);
    assert!(editor.document().is_empty());
}

#[test]
fn test_exports() {
    let mut editor = editor_with(Arc::new(MemoryStorage::new()));
    editor.add_element(ElementKind::Arrow);
    editor.add_element(ElementKind::Rectangle);

    let names = editor.export_names().unwrap();
    assert_eq!(names.file_name, "design.json");
    let parsed: Vec<String> = serde_json::from_str(&names.contents).unwrap();
    assert_eq!(parsed, vec!["Arrow 1", "Rectangle 1"]);

    let html = editor.export_html();
    assert_eq!(html.file_name, "design.html");
    assert!(html.contents.contains("z-index:2;"));
}
