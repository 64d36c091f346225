//! Keyboard shortcut mapping.
//!
//! Maps `KeyboardEvent.key` values plus modifiers to editor actions, so the
//! same bindings apply to every host.

use crate::input::Modifiers;

/// Pixels moved per arrow key press.
pub const NUDGE_STEP: i32 = 1;
/// Pixels moved per arrow key press with Shift held.
pub const NUDGE_STEP_LARGE: i32 = 10;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Save,
    Duplicate,
    Deselect,
    Delete,
    Nudge { dx: i32, dy: i32 },
}

/// Resolves key events into shortcut actions.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key to an action, or `None` if the combo is unbound.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            match key {
                "s" | "S" => return Some(ShortcutAction::Save),
                "d" | "D" => return Some(ShortcutAction::Duplicate),
                _ => {}
            }
        }

        let step = if modifiers.shift { NUDGE_STEP_LARGE } else { NUDGE_STEP };
        match key {
            "Escape" => Some(ShortcutAction::Deselect),
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "ArrowLeft" => Some(ShortcutAction::Nudge { dx: -step, dy: 0 }),
            "ArrowRight" => Some(ShortcutAction::Nudge { dx: step, dy: 0 }),
            "ArrowUp" => Some(ShortcutAction::Nudge { dx: 0, dy: -step }),
            "ArrowDown" => Some(ShortcutAction::Nudge { dx: 0, dy: step }),
            _ => None,
        }
    }
}
