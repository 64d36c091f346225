//! Keyboard shortcut registry and documentation.

use placard_core::{Modifiers, ShortcutAction, ShortcutMap};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// `KeyboardEvent.key` name.
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// The editor action this shortcut triggers.
    pub fn action(&self) -> Option<ShortcutAction> {
        let modifiers = Modifiers {
            ctrl: self.ctrl,
            shift: self.shift,
            ..Modifiers::NONE
        };
        ShortcutMap::resolve(self.key, modifiers)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("S", true, false, "Save layout"),
            Shortcut::new("D", true, false, "Duplicate selection"),
            Shortcut::new("Escape", false, false, "Clear selection"),
            Shortcut::new("Delete", false, false, "Delete selection"),
            Shortcut::new("Backspace", false, false, "Delete selection"),
            Shortcut::new("ArrowLeft", false, false, "Nudge left 1px"),
            Shortcut::new("ArrowRight", false, false, "Nudge right 1px"),
            Shortcut::new("ArrowUp", false, false, "Nudge up 1px"),
            Shortcut::new("ArrowDown", false, false, "Nudge down 1px"),
            Shortcut::new("ArrowLeft", false, true, "Nudge left 10px"),
            Shortcut::new("ArrowRight", false, true, "Nudge right 10px"),
            Shortcut::new("ArrowUp", false, true, "Nudge up 10px"),
            Shortcut::new("ArrowDown", false, true, "Nudge down 10px"),
        ]
    }

    /// Shortcut table as printable text.
    pub fn render() -> String {
        let mut out = String::from("=== Keyboard Shortcuts ===\n");
        for shortcut in Self::all() {
            out.push_str(&format!("  {:20} {}\n", shortcut.format(), shortcut.description));
        }
        out
    }
}
