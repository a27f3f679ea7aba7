//! Input handling for editing surfaces
//!
//! This module provides keyboard and mouse input handling using
//! leafwing-input-manager for action-based keybindings.

mod actions;
mod cursor;
mod keybindings;
mod keyboard;
mod mouse;

// Re-export public types
pub use actions::{apply_input, AppliedInput, InputEdit};
pub use cursor::{find_word_boundary_left, find_word_boundary_right, CaretMotion};
pub use keybindings::{default_input_map, EditorAction};
pub use keyboard::{action_event, handle_keyboard_input};
pub use mouse::{handle_mouse_input, handle_mouse_wheel, max_scroll_top, screen_to_char_pos, MouseDragState};

// Re-export leafwing types for user customization
pub use leafwing_input_manager::prelude::{ActionState, Actionlike, ButtonlikeChord, InputMap};
