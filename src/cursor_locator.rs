//! Caret offset to line/column readout

use std::fmt;

use crate::types::TextBuffer;

/// 1-based line and column of a caret
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CursorReadout {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for CursorReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ln {}, Col {}", self.line, self.column)
    }
}

/// Locate `caret` in `buffer`.
///
/// An absent caret counts as offset 0 and an offset past the end is clamped.
/// The column is counted from the character after the last newline before the
/// caret, so a caret right after a newline is always at column 1.
pub fn locate(buffer: &TextBuffer, caret: Option<usize>) -> CursorReadout {
    let caret = caret.unwrap_or(0).min(buffer.len_chars());
    let line = buffer.line_of(caret);
    let line_start = buffer.line_start(line);

    CursorReadout {
        line: line + 1,
        column: caret - line_start + 1,
    }
}

/// Status text shown in a companion entity
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorStatus {
    /// Name of the companion entity that displays the readout
    target: String,
    readout: Option<CursorReadout>,
    text: String,
}

impl CursorStatus {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn render(&mut self, buffer: &TextBuffer, caret: Option<usize>) -> CursorReadout {
        let readout = locate(buffer, caret);
        self.readout = Some(readout);
        self.text = readout.to_string();
        readout
    }

    pub fn readout(&self) -> Option<CursorReadout> {
        self.readout
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
