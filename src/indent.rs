//! Block indentation
//!
//! Indent and outdent always act on whole lines: the selection is widened to
//! the start of its first line and the end of its last line (a caret widens to
//! its own line). The block is rewritten with one in-place replacement and the
//! selection is moved so it stays on the same content.

use serde::{Deserialize, Serialize};

use crate::types::{SelectionRange, TextBuffer, TextEdit};

/// Width of one indent level, in spaces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndentUnit(usize);

impl IndentUnit {
    pub const fn new(width: usize) -> Self {
        Self(width)
    }

    pub const fn width(&self) -> usize {
        self.0
    }

    pub fn text(&self) -> String {
        " ".repeat(self.0)
    }
}

/// How far outdent may strip plain spaces when a full indent unit is not present
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutdentPolicy {
    /// Strip at most two spaces, whatever the unit width
    #[default]
    Compatible,
    /// Strip up to one unit's worth of spaces
    UpToUnit,
}

impl OutdentPolicy {
    fn partial_limit(self, unit: IndentUnit) -> usize {
        match self {
            OutdentPolicy::Compatible => 2,
            OutdentPolicy::UpToUnit => unit.width(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndentDirection {
    Indent,
    Outdent,
}

/// Outcome of one indent or outdent
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndentResult {
    /// The block replacement applied to the buffer
    pub edit: TextEdit,
    /// Selection after the edit
    pub selection: SelectionRange,
    /// Characters added (indent) or removed (outdent) on each touched line
    pub per_line: Vec<usize>,
}

impl IndentResult {
    pub fn line_count(&self) -> usize {
        self.per_line.len()
    }

    /// True when the buffer content did not change
    pub fn is_noop(&self) -> bool {
        self.per_line.iter().all(|n| *n == 0)
    }
}

/// `[blockStart, blockEnd)`: whole lines touched by `selection`.
///
/// The block never includes the newline that terminates its last line.
pub fn block_bounds(buffer: &TextBuffer, selection: SelectionRange) -> (usize, usize) {
    let selection = selection.clamp_to(buffer.len_chars());
    // Line of the selection start, so a caret at 0 before a leading '\n' stays on the empty first line
    let start = buffer.line_start(buffer.line_of(selection.start()));
    let end = buffer.line_end(buffer.line_of(selection.end()));
    (start, end)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndentEngine {
    unit: IndentUnit,
    policy: OutdentPolicy,
}

impl IndentEngine {
    pub fn new(unit: IndentUnit, policy: OutdentPolicy) -> Self {
        Self { unit, policy }
    }

    pub fn unit(&self) -> IndentUnit {
        self.unit
    }

    pub fn policy(&self) -> OutdentPolicy {
        self.policy
    }

    pub fn apply(
        &self,
        direction: IndentDirection,
        buffer: &mut TextBuffer,
        selection: SelectionRange,
    ) -> IndentResult {
        match direction {
            IndentDirection::Indent => self.indent(buffer, selection),
            IndentDirection::Outdent => self.outdent(buffer, selection),
        }
    }

    /// Prefix every touched line with one indent unit
    pub fn indent(&self, buffer: &mut TextBuffer, selection: SelectionRange) -> IndentResult {
        let selection = selection.clamp_to(buffer.len_chars());
        let (block_start, block_end) = block_bounds(buffer, selection);
        let block = buffer.slice(block_start..block_end);
        let prefix = self.unit.text();

        let lines: Vec<String> = block.split('\n').map(|line| format!("{prefix}{line}")).collect();
        let line_count = lines.len();
        let edit = buffer.replace(block_start, block_end, &lines.join("\n"));

        let width = self.unit.width();
        let selection = SelectionRange::new(
            selection.start() + width,
            selection.end() + width * line_count,
        )
        .clamp_to(buffer.len_chars());

        IndentResult {
            edit,
            selection,
            per_line: vec![width; line_count],
        }
    }

    /// Strip up to one indent level from every touched line
    pub fn outdent(&self, buffer: &mut TextBuffer, selection: SelectionRange) -> IndentResult {
        let selection = selection.clamp_to(buffer.len_chars());
        let (block_start, block_end) = block_bounds(buffer, selection);
        let block = buffer.slice(block_start..block_end);

        let mut removed = Vec::new();
        let lines: Vec<&str> = block
            .split('\n')
            .map(|line| {
                let rest = self.strip_indent(line);
                removed.push(line.len() - rest.len());
                rest
            })
            .collect();
        let edit = buffer.replace(block_start, block_end, &lines.join("\n"));

        let removed_first = removed.first().copied().unwrap_or(0);
        let removed_total: usize = removed.iter().sum();

        let start = selection.start().saturating_sub(removed_first).max(block_start);
        let end = selection.end().saturating_sub(removed_total).max(start);

        IndentResult {
            edit,
            selection: SelectionRange::new(start, end).clamp_to(buffer.len_chars()),
            per_line: removed,
        }
    }

    /// Remaining text of `line` after removing one indent level.
    ///
    /// Priority: a full unit of spaces, then one tab, then a partial run of
    /// spaces bounded by the outdent policy. Only ASCII whitespace is ever
    /// removed, so byte and character counts agree.
    fn strip_indent<'a>(&self, line: &'a str) -> &'a str {
        let unit = self.unit.text();
        if let Some(rest) = line.strip_prefix(unit.as_str()) {
            return rest;
        }
        if let Some(rest) = line.strip_prefix('\t') {
            return rest;
        }

        let spaces = line
            .bytes()
            .take(self.policy.partial_limit(self.unit))
            .take_while(|b| *b == b' ')
            .count();
        &line[spaces..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(width: usize) -> IndentEngine {
        IndentEngine::new(IndentUnit::new(width), OutdentPolicy::Compatible)
    }

    #[test]
    fn test_indent_caret_line() {
        let mut buffer = TextBuffer::from("ab\ncd");
        let result = engine(2).indent(&mut buffer, SelectionRange::caret(1));

        assert_eq!(buffer.to_string(), "  ab\ncd");
        assert_eq!(result.selection, SelectionRange::caret(3));
        assert_eq!(result.line_count(), 1);
    }

    #[test]
    fn test_indent_multiple_lines() {
        let mut buffer = TextBuffer::from("fn main() {\nfoo();\nbar();\n}");
        // From inside "foo" to inside "bar"
        let result = engine(4).indent(&mut buffer, SelectionRange::new(13, 22));

        assert_eq!(buffer.to_string(), "fn main() {\n    foo();\n    bar();\n}");
        assert_eq!(result.selection, SelectionRange::new(17, 30));
        assert_eq!(result.edit, TextEdit::replace(12, 25, 21));
    }

    #[test]
    fn test_indent_keeps_selection_on_content() {
        let mut buffer = TextBuffer::from("alpha\nbeta\ngamma");
        let result = engine(2).indent(&mut buffer, SelectionRange::new(1, 8));

        assert_eq!(buffer.slice(result.selection.range()), "lpha\n  be");
        assert!(result.selection.len() >= 7);
    }

    #[test]
    fn test_selection_end_on_newline_stays_on_its_line() {
        let mut buffer = TextBuffer::from("ab\ncd");
        engine(2).indent(&mut buffer, SelectionRange::new(0, 2));
        assert_eq!(buffer.to_string(), "  ab\ncd");
    }

    #[test]
    fn test_outdent_spanning_lines() {
        let mut buffer = TextBuffer::from("  x\n  y");
        let result = engine(2).outdent(&mut buffer, SelectionRange::new(2, 7));

        assert_eq!(buffer.to_string(), "x\ny");
        assert_eq!(result.selection, SelectionRange::new(0, 3));
        assert_eq!(result.per_line, vec![2, 2]);
    }

    #[test]
    fn test_outdent_start_clamped_to_block() {
        let mut buffer = TextBuffer::from("top\n    body");
        // Caret inside the leading whitespace of the second line
        let result = engine(4).outdent(&mut buffer, SelectionRange::caret(5));

        assert_eq!(buffer.to_string(), "top\nbody");
        assert_eq!(result.selection, SelectionRange::caret(4));
    }

    #[test]
    fn test_outdent_priority() {
        let mut buffer = TextBuffer::from("    four\n\ttab\n   three\n one\nnone");
        let all = SelectionRange::new(0, buffer.len_chars());
        let result = engine(4).outdent(&mut buffer, all);

        assert_eq!(buffer.to_string(), "four\ntab\n three\none\nnone");
        assert_eq!(result.per_line, vec![4, 1, 2, 1, 0]);
    }

    #[test]
    fn test_outdent_up_to_unit_policy() {
        let engine = IndentEngine::new(IndentUnit::new(4), OutdentPolicy::UpToUnit);
        let mut buffer = TextBuffer::from("   three\n      six");
        let all = SelectionRange::new(0, buffer.len_chars());
        let result = engine.outdent(&mut buffer, all);

        assert_eq!(buffer.to_string(), "three\n  six");
        assert_eq!(result.per_line, vec![3, 4]);
    }

    #[test]
    fn test_outdent_never_removes_content() {
        let mut buffer = TextBuffer::from("a  b\n\tc");
        let result = engine(2).outdent(&mut buffer, SelectionRange::caret(1));

        assert_eq!(buffer.to_string(), "a  b\n\tc");
        assert!(result.is_noop());
    }

    #[test]
    fn test_outdent_without_whitespace_is_idempotent() {
        let mut buffer = TextBuffer::from("plain\ntext");
        let selection = SelectionRange::new(2, 8);

        let first = engine(2).outdent(&mut buffer, selection);
        assert_eq!(buffer.to_string(), "plain\ntext");
        assert_eq!(first.selection, selection);

        let second = engine(2).outdent(&mut buffer, first.selection);
        assert_eq!(buffer.to_string(), "plain\ntext");
        assert_eq!(second.selection, selection);
    }

    #[test]
    fn test_indent_then_outdent_restores() {
        let original = "one\ntwo\nthree";
        let mut buffer = TextBuffer::from(original);
        let selection = SelectionRange::new(1, 9);

        let indented = engine(3).indent(&mut buffer, selection);
        let outdented = engine(3).outdent(&mut buffer, indented.selection);

        assert_eq!(buffer.to_string(), original);
        assert_eq!(outdented.selection, selection);
    }

    #[test]
    fn test_zero_width_unit_is_noop() {
        let mut buffer = TextBuffer::from("  a\nb");
        let selection = SelectionRange::new(1, 4);

        let indented = engine(0).indent(&mut buffer, selection);
        assert_eq!(buffer.to_string(), "  a\nb");
        assert_eq!(indented.selection, selection);

        let outdented = engine(0).outdent(&mut buffer, selection);
        assert_eq!(buffer.to_string(), "  a\nb");
        assert_eq!(outdented.selection, selection);
        assert!(outdented.is_noop());
    }

    #[test]
    fn test_caret_at_start_of_buffer_after_leading_newline() {
        let mut buffer = TextBuffer::from("\nsecond");
        engine(2).indent(&mut buffer, SelectionRange::caret(0));
        assert_eq!(buffer.to_string(), "  \nsecond");
    }

    #[test]
    fn test_block_bounds() {
        let buffer = TextBuffer::from("ab\ncd\nef");
        assert_eq!(block_bounds(&buffer, SelectionRange::caret(4)), (3, 5));
        assert_eq!(block_bounds(&buffer, SelectionRange::new(1, 7)), (0, 8));
        assert_eq!(block_bounds(&buffer, SelectionRange::caret(3)), (3, 5));
    }
}
