//! Caret movement and word boundary helpers

use crate::types::{SelectionRange, TextBuffer};

/// A caret movement triggered from the keyboard
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaretMotion {
    Left,
    Right,
    Up,
    Down,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
    SelectAll,
}

impl CaretMotion {
    /// Selection after moving from `selection`.
    ///
    /// Horizontal moves collapse a non-empty selection onto its matching edge
    /// instead of stepping, the way text fields usually behave.
    pub fn apply(self, buffer: &TextBuffer, selection: SelectionRange) -> SelectionRange {
        let len = buffer.len_chars();
        let selection = selection.clamp_to(len);

        let caret = match self {
            CaretMotion::SelectAll => return SelectionRange::new(0, len),
            CaretMotion::Left if !selection.is_caret() => selection.start(),
            CaretMotion::Right if !selection.is_caret() => selection.end(),
            CaretMotion::Left => selection.start().saturating_sub(1),
            CaretMotion::Right => (selection.end() + 1).min(len),
            CaretMotion::Up => vertical(buffer, selection.start(), -1),
            CaretMotion::Down => vertical(buffer, selection.end(), 1),
            CaretMotion::WordLeft => find_word_boundary_left(buffer, selection.start()),
            CaretMotion::WordRight => find_word_boundary_right(buffer, selection.end()),
            CaretMotion::LineStart => buffer.line_start(buffer.line_of(selection.start())),
            CaretMotion::LineEnd => buffer.line_end(buffer.line_of(selection.end())),
            CaretMotion::DocumentStart => 0,
            CaretMotion::DocumentEnd => len,
        };

        SelectionRange::caret(caret)
    }
}

/// Move one line up or down keeping the column where the target line allows
fn vertical(buffer: &TextBuffer, caret: usize, direction: isize) -> usize {
    let line = buffer.line_of(caret);
    let column = caret - buffer.line_start(line);

    let target = match direction {
        d if d < 0 && line == 0 => return 0,
        d if d < 0 => line - 1,
        _ if line + 1 >= buffer.line_count() => return buffer.len_chars(),
        _ => line + 1,
    };

    let start = buffer.line_start(target);
    let end = buffer.line_end(target);
    (start + column).min(end)
}

/// Character classification for word boundary detection
#[derive(PartialEq, Eq, Clone, Copy)]
enum CharClass {
    Whitespace,
    Word, // alphanumeric or underscore
    Punctuation,
}

fn classify_char(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_alphanumeric() || c == '_' {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

/// Start of the previous word: skip blanks, then one run of the same class.
/// Never crosses a newline.
pub fn find_word_boundary_left(buffer: &TextBuffer, pos: usize) -> usize {
    let mut current = pos.min(buffer.len_chars());
    let char_before = |at: usize| buffer.char_at(at - 1).unwrap_or('\n');

    while current > 0 {
        let c = char_before(current);
        if c.is_whitespace() && c != '\n' {
            current -= 1;
        } else {
            break;
        }
    }

    if current == 0 {
        return 0;
    }

    let class = classify_char(char_before(current));
    while current > 0 {
        let c = char_before(current);
        if c == '\n' || classify_char(c) != class {
            break;
        }
        current -= 1;
    }

    current
}

/// End of the next word: skip one run of the same class, then trailing blanks
pub fn find_word_boundary_right(buffer: &TextBuffer, pos: usize) -> usize {
    let len = buffer.len_chars();
    if pos >= len {
        return len;
    }

    let mut current = pos;
    let char_at = |at: usize| buffer.char_at(at).unwrap_or('\n');

    let c = char_at(current);
    if c.is_whitespace() {
        while current < len {
            let c = char_at(current);
            if c == '\n' {
                return (current + 1).min(len);
            }
            if !c.is_whitespace() {
                break;
            }
            current += 1;
        }
        return current;
    }

    let class = classify_char(c);
    while current < len {
        let c = char_at(current);
        if c == '\n' || classify_char(c) != class {
            break;
        }
        current += 1;
    }

    while current < len {
        let c = char_at(current);
        if c.is_whitespace() && c != '\n' {
            current += 1;
        } else {
            break;
        }
    }

    current
}
