//! Selection state and manipulation handles.
//!
//! Elements remain pure data. The widget manager tracks which one is
//! selected and derives the transient handles drawn around it:
//! - four corner handles for resizing
//! - one rotation grip above the top edge
//!
//! Handles are computed on demand and never stored with an element.

mod handles;
mod manager;
mod state;

pub use handles::{
    Corner, HANDLE_HIT_TOLERANCE, Handle, HandleKind, HandleShape, ROTATE_HANDLE_OFFSET,
    get_handles, hit_test_handles,
};
pub use manager::WidgetManager;
pub use state::WidgetState;
