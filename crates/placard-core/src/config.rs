//! Editor configuration.

use crate::element::CanvasSize;
use serde::{Deserialize, Serialize};

/// Storage key the layout blob lives under.
pub const DEFAULT_STORAGE_KEY: &str = "layout";

/// Settings for an [`Editor`](crate::Editor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub storage_key: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let canvas = CanvasSize::default();
        Self {
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    pub fn with_canvas(mut self, width: i32, height: i32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }
}
