//! Placard Application
//!
//! Host shells around the layout editor: a native command-line front end
//! and a WebAssembly bridge for the browser page.

mod shortcuts;

#[cfg(not(target_arch = "wasm32"))]
mod app;

pub use shortcuts::{Shortcut, ShortcutRegistry};

#[cfg(not(target_arch = "wasm32"))]
pub use app::{App, AppConfig, AppError, Command, CONFIG_ENV_VAR};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{WebEditor, run_wasm};
