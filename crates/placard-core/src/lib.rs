//! Placard Core Library
//!
//! Platform-agnostic data structures and logic for the Placard layout editor.

pub mod config;
pub mod document;
pub mod editor;
pub mod element;
pub mod export;
pub mod input;
pub mod interaction;
pub mod panels;
pub mod persistence;
pub mod shortcuts;
pub mod storage;
pub mod widget;

pub use config::EditorConfig;
pub use document::{LayerDirection, LayoutDocument};
pub use editor::{Editor, PointerTarget};
pub use element::{CanvasSize, Element, ElementId, ElementKind};
pub use export::ExportFile;
pub use input::{KeyEvent, Modifiers, PointerEvent};
pub use interaction::{Interaction, Mode, MoveOutcome};
pub use panels::{LayerEntry, PropertiesPanel, PropertyField};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use storage::{LayoutStore, MemoryStorage, Storage, StorageError, StorageResult};
pub use widget::{Corner, Handle, HandleKind, HandleShape, WidgetManager, WidgetState};
