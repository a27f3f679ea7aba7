use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

/// Create the default input map with all keybindings
pub fn default_input_map() -> InputMap<EditorAction> {
    let mut input_map = InputMap::default();

    // Indentation
    input_map.insert(EditorAction::Indent, KeyCode::Tab);
    input_map.insert(EditorAction::Outdent, ButtonlikeChord::new([KeyCode::ShiftLeft, KeyCode::Tab]));
    input_map.insert(EditorAction::Outdent, ButtonlikeChord::new([KeyCode::ShiftRight, KeyCode::Tab]));

    // Host controls (Ctrl on Linux/Windows, Cmd on macOS)
    for modifier in [KeyCode::ControlLeft, KeyCode::ControlRight, KeyCode::SuperLeft, KeyCode::SuperRight] {
        input_map.insert(EditorAction::Save, ButtonlikeChord::new([modifier, KeyCode::KeyS]));
        input_map.insert(
            EditorAction::Format,
            ButtonlikeChord::new([modifier, KeyCode::ShiftLeft, KeyCode::Enter]),
        );
        input_map.insert(
            EditorAction::Format,
            ButtonlikeChord::new([modifier, KeyCode::ShiftRight, KeyCode::Enter]),
        );
    }

    // Deletion
    input_map.insert(EditorAction::DeleteBackward, KeyCode::Backspace);
    input_map.insert(EditorAction::DeleteForward, KeyCode::Delete);

    // Special insertion
    input_map.insert(EditorAction::InsertNewline, KeyCode::Enter);

    // Cursor movement
    input_map.insert(EditorAction::MoveCursorLeft, KeyCode::ArrowLeft);
    input_map.insert(EditorAction::MoveCursorRight, KeyCode::ArrowRight);
    input_map.insert(EditorAction::MoveCursorUp, KeyCode::ArrowUp);
    input_map.insert(EditorAction::MoveCursorDown, KeyCode::ArrowDown);
    input_map.insert(EditorAction::MoveCursorWordLeft, ButtonlikeChord::new([KeyCode::ControlLeft, KeyCode::ArrowLeft]));
    input_map.insert(EditorAction::MoveCursorWordRight, ButtonlikeChord::new([KeyCode::ControlLeft, KeyCode::ArrowRight]));
    input_map.insert(EditorAction::MoveCursorLineStart, KeyCode::Home);
    input_map.insert(EditorAction::MoveCursorLineEnd, KeyCode::End);
    input_map.insert(EditorAction::MoveCursorDocumentStart, ButtonlikeChord::new([KeyCode::ControlLeft, KeyCode::Home]));
    input_map.insert(EditorAction::MoveCursorDocumentEnd, ButtonlikeChord::new([KeyCode::ControlLeft, KeyCode::End]));

    // Selection
    input_map.insert(EditorAction::SelectAll, ButtonlikeChord::new([KeyCode::ControlLeft, KeyCode::KeyA]));
    input_map.insert(EditorAction::SelectAll, ButtonlikeChord::new([KeyCode::SuperLeft, KeyCode::KeyA]));

    input_map
}

/// Editor action that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Actionlike)]
pub enum EditorAction {
    // Indentation
    /// Indent the selected lines (Tab)
    Indent,
    /// Outdent the selected lines (Shift+Tab)
    Outdent,

    // Host controls
    /// Activate the host's update control (Ctrl/Cmd+S)
    Save,
    /// Activate the host's format control (Ctrl/Cmd+Shift+Enter)
    Format,

    // Deletion
    DeleteBackward,
    DeleteForward,

    // Special insertion
    InsertNewline,

    // Cursor movement
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorUp,
    MoveCursorDown,
    MoveCursorWordLeft,
    MoveCursorWordRight,
    MoveCursorLineStart,
    MoveCursorLineEnd,
    MoveCursorDocumentStart,
    MoveCursorDocumentEnd,

    // Selection
    SelectAll,
}

impl EditorAction {
    /// Every action, longest chords first so a chord wins over its sub-keys
    pub const ALL: [EditorAction; 18] = [
        EditorAction::Format,
        EditorAction::Save,
        EditorAction::Outdent,
        EditorAction::Indent,
        EditorAction::SelectAll,
        EditorAction::MoveCursorWordLeft,
        EditorAction::MoveCursorWordRight,
        EditorAction::MoveCursorDocumentStart,
        EditorAction::MoveCursorDocumentEnd,
        EditorAction::DeleteBackward,
        EditorAction::DeleteForward,
        EditorAction::InsertNewline,
        EditorAction::MoveCursorLeft,
        EditorAction::MoveCursorRight,
        EditorAction::MoveCursorUp,
        EditorAction::MoveCursorDown,
        EditorAction::MoveCursorLineStart,
        EditorAction::MoveCursorLineEnd,
    ];
}
