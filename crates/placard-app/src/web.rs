//! WebAssembly entry point and browser bridge.
//!
//! The host page owns the DOM. It forwards pointer and key events to
//! [`WebEditor`] in canvas coordinates and re-renders from the JSON views.

use kurbo::Point;
use placard_core::storage::LocalStorage;
use placard_core::{
    Editor, EditorConfig, ElementId, ElementKind, ExportFile, HandleKind, Modifiers,
    PointerTarget, PropertyField,
};
use serde_json::json;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Initialize logging and panic reporting.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Failed to initialize logger: {}", e).into());
    }

    log::info!("Starting Placard (WASM)");
}

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_id(id: &str) -> Result<ElementId, JsError> {
    id.parse().map_err(js_error)
}

/// Layout editor exposed to the host page.
#[wasm_bindgen]
pub struct WebEditor {
    editor: Editor<LocalStorage>,
}

#[wasm_bindgen]
impl WebEditor {
    /// Open the layout stored in `localStorage` on a canvas of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_width: i32, canvas_height: i32) -> WebEditor {
        let config = EditorConfig::default().with_canvas(canvas_width, canvas_height);
        let editor = Editor::open(config, Arc::new(LocalStorage::new()));
        log::info!("Opened layout with {} elements", editor.document().len());
        WebEditor { editor }
    }

    /// Toolbar action. Returns the new element's id.
    #[wasm_bindgen(js_name = addElement)]
    pub fn add_element(&mut self, kind: &str) -> Result<String, JsError> {
        let kind: ElementKind = kind.parse().map_err(js_error)?;
        Ok(self.editor.add_element(kind).to_string())
    }

    /// Returns "resize", "rotate", "element", "canvas", or "busy".
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> String {
        let target = match self.editor.pointer_down(Point::new(x, y)) {
            Some(PointerTarget::Handle(HandleKind::Corner(_))) => "resize",
            Some(PointerTarget::Handle(HandleKind::Rotate)) => "rotate",
            Some(PointerTarget::Element(_)) => "element",
            Some(PointerTarget::Canvas) => "canvas",
            None => "busy",
        };
        target.to_string()
    }

    /// Returns true if an element changed and the canvas needs a redraw.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.editor.pointer_move(Point::new(x, y)).is_some()
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.editor.pointer_up();
    }

    /// Returns true if the key is bound; the page should then call
    /// `preventDefault`.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> bool {
        self.editor.handle_key(key, Modifiers { shift, ctrl, alt, meta })
    }

    /// Select from the layer panel.
    pub fn select(&mut self, id: &str) -> Result<bool, JsError> {
        Ok(self.editor.select(parse_id(id)?))
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.editor.clear_selection();
    }

    #[wasm_bindgen(js_name = selectedId)]
    pub fn selected_id(&self) -> Option<String> {
        self.editor.selected().map(|id| id.to_string())
    }

    #[wasm_bindgen(js_name = moveUp)]
    pub fn move_up(&mut self) -> bool {
        self.editor.move_up()
    }

    #[wasm_bindgen(js_name = moveDown)]
    pub fn move_down(&mut self) -> bool {
        self.editor.move_down()
    }

    #[wasm_bindgen(js_name = duplicateSelected)]
    pub fn duplicate_selected(&mut self) -> Option<String> {
        self.editor.duplicate_selected().map(|id| id.to_string())
    }

    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> bool {
        self.editor.delete_selected().is_some()
    }

    /// Apply a properties panel edit. `field` is one of width, height, x, y,
    /// rotation, radius, background or text.
    #[wasm_bindgen(js_name = setProperty)]
    pub fn set_property(&mut self, field: &str, value: &str) -> Result<bool, JsError> {
        let field: PropertyField = serde_json::from_value(json!(field)).map_err(js_error)?;
        Ok(self.editor.set_property(field, value))
    }

    pub fn save(&mut self) {
        self.editor.save();
    }

    /// Elements in stacking order.
    #[wasm_bindgen(js_name = elementsJson)]
    pub fn elements_json(&self) -> Result<String, JsError> {
        serde_json::to_string(self.editor.document().elements()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = layersJson)]
    pub fn layers_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.editor.layers()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = propertiesJson)]
    pub fn properties_json(&self) -> Result<String, JsError> {
        serde_json::to_string(self.editor.properties()).map_err(js_error)
    }

    /// Handles of the selection as `{kind, x, y}` objects.
    #[wasm_bindgen(js_name = handlesJson)]
    pub fn handles_json(&self) -> Result<String, JsError> {
        let handles: Vec<_> = self
            .editor
            .handles()
            .into_iter()
            .map(|h| json!({ "kind": h.kind, "x": h.position.x, "y": h.position.y }))
            .collect();
        serde_json::to_string(&handles).map_err(js_error)
    }

    #[wasm_bindgen(js_name = downloadNames)]
    pub fn download_names(&self) -> Result<(), JsValue> {
        let file = self.editor.export_names().map_err(|e| JsValue::from_str(&e.to_string()))?;
        download_file(&file)
    }

    #[wasm_bindgen(js_name = downloadHtml)]
    pub fn download_html(&self) -> Result<(), JsValue> {
        download_file(&self.editor.export_html())
    }
}

/// Offer `file` to the user through a temporary object URL.
fn download_file(file: &ExportFile) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;

    let blob_parts = js_sys::Array::new();
    blob_parts.push(&JsValue::from_str(&file.contents));

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(file.mime_type);

    let blob = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let a = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    a.set_href(&url);
    a.set_download(file.file_name);
    a.click();

    web_sys::Url::revoke_object_url(&url).ok();
    log::info!("Downloaded {}", file.file_name);
    Ok(())
}
