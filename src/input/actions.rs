//! Direct text input applied to a buffer

use crate::types::{SelectionRange, TextBuffer, TextEdit};

/// A content change typed by the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEdit {
    /// Replace the selection with text (typing, paste, newline)
    Insert(String),
    /// Remove the selection, or the character before the caret
    DeleteBackward,
    /// Remove the selection, or the character after the caret
    DeleteForward,
    /// Replace an explicit range and land on a given selection afterwards
    Replace {
        range: SelectionRange,
        text: String,
        selection: SelectionRange,
    },
}

/// Result of applying an [`InputEdit`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedInput {
    pub edit: TextEdit,
    pub selection: SelectionRange,
}

/// Apply `input` at `selection`.
///
/// Returns `None` when nothing could change, e.g. backspace at offset 0.
pub fn apply_input(
    buffer: &mut TextBuffer,
    selection: SelectionRange,
    input: &InputEdit,
) -> Option<AppliedInput> {
    let selection = selection.clamp_to(buffer.len_chars());

    let (start, end, text) = match input {
        InputEdit::Insert(text) => (selection.start(), selection.end(), text.as_str()),
        InputEdit::DeleteBackward if selection.is_caret() => {
            let caret = selection.start();
            if caret == 0 {
                return None;
            }
            (caret - 1, caret, "")
        }
        InputEdit::DeleteForward if selection.is_caret() => {
            let caret = selection.start();
            if caret >= buffer.len_chars() {
                return None;
            }
            (caret, caret + 1, "")
        }
        InputEdit::DeleteBackward | InputEdit::DeleteForward => (selection.start(), selection.end(), ""),
        InputEdit::Replace { range, text, selection } => {
            let range = range.clamp_to(buffer.len_chars());
            let edit = buffer.replace(range.start(), range.end(), text);
            return Some(AppliedInput {
                edit,
                selection: selection.clamp_to(buffer.len_chars()),
            });
        }
    };

    if start == end && text.is_empty() {
        return None;
    }

    let edit = buffer.replace(start, end, text);
    Some(AppliedInput {
        edit,
        selection: SelectionRange::caret(edit.new_end),
    })
}
