//! Core types for the playground editor

use bevy::prelude::*;
use ropey::Rope;
use std::fmt;
use std::ops::Range;

use crate::coordinate::DisplayRect;

// ========== Edits ==========

/// Represents a text edit operation, in character offsets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct TextEdit {
    /// Start position of the edit
    pub start: usize,
    /// End position before the edit - for deletions, this is > start
    pub old_end: usize,
    /// End position after the edit - for insertions, this is > start
    pub new_end: usize,
}

impl TextEdit {
    /// Create an edit representing an insertion at the given position
    pub fn insert(position: usize, length: usize) -> Self {
        Self {
            start: position,
            old_end: position,
            new_end: position + length,
        }
    }

    /// Create an edit representing a deletion at the given range
    pub fn delete(start: usize, end: usize) -> Self {
        Self {
            start,
            old_end: end,
            new_end: start,
        }
    }

    /// Create an edit representing a replacement
    pub fn replace(start: usize, old_end: usize, new_length: usize) -> Self {
        Self {
            start,
            old_end,
            new_end: start + new_length,
        }
    }

    /// Get the change in length caused by this edit
    pub fn delta(&self) -> isize {
        self.new_end as isize - self.old_end as isize
    }

    /// Check if this edit is an insertion (no text removed)
    pub fn is_insertion(&self) -> bool {
        self.start == self.old_end && self.new_end > self.start
    }

    /// Check if this edit is a deletion (no text added)
    pub fn is_deletion(&self) -> bool {
        self.old_end > self.start && self.new_end == self.start
    }
}

// ========== Selection ==========

/// An ordered pair of character offsets into a [`TextBuffer`].
///
/// `start <= end` always holds; a caret is the special case `start == end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    start: usize,
    end: usize,
}

impl SelectionRange {
    /// Create a selection from two offsets in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A zero-length selection at `offset`
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Clamp both ends into `[0, len]`
    pub fn clamp_to(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

// ========== Text Buffer ==========

/// The editable content of one surface.
///
/// Backed by a rope with only `'\n'` recognised as a line break, so line
/// indices agree with a plain split on the newline character.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length in characters
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of lines: newline count plus one
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// 0-based line containing `offset` (clamped to the buffer)
    pub fn line_of(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.len_chars()))
    }

    /// Offset of the first character of `line`
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.line_count() {
            return self.len_chars();
        }
        self.rope.line_to_char(line)
    }

    /// Offset of the newline ending `line`, or the buffer end on the last line
    pub fn line_end(&self, line: usize) -> usize {
        if line + 1 >= self.line_count() {
            self.len_chars()
        } else {
            self.rope.line_to_char(line + 1) - 1
        }
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
    }

    /// Copy out the characters in `range` (clamped to the buffer)
    pub fn slice(&self, range: Range<usize>) -> String {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.rope.slice(start..end).to_string()
    }

    /// Replace `[start, end)` with `text` in place
    pub fn replace(&mut self, start: usize, end: usize, text: &str) -> TextEdit {
        let len = self.len_chars();
        let start = start.min(len);
        let end = end.min(len).max(start);

        if end > start {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }

        TextEdit::replace(start, end, text.chars().count())
    }

    /// Swap the whole content
    pub fn set_text(&mut self, text: &str) -> TextEdit {
        let old_len = self.len_chars();
        self.rope = Rope::from_str(text);
        TextEdit::replace(0, old_len, self.len_chars())
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

// ========== Components ==========

/// The text body rendered for a surface
#[derive(Component)]
pub struct SurfaceText {
    pub surface: Entity,
}

/// One numbered line marker inside a gutter container
#[derive(Component)]
pub struct GutterMarker {
    /// 1-based line number shown by this marker
    pub line: usize,
}

/// Tracks which surface's gutter rebuild a container entity currently shows.
///
/// Generations restart with every surface, so both values identify a marker set.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GutterView {
    pub surface: Option<Entity>,
    pub generation: Option<u64>,
}

/// Window-space rectangle a surface or picker occupies (top-left origin, y down).
///
/// Used for click hit-testing and scroll bounds; kept up to date by the host.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct SurfaceBounds(pub DisplayRect);
