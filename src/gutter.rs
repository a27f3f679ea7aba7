//! Line number gutter
//!
//! Keeps the numbered markers in step with the buffer's line count and
//! mirrors the surface's vertical scroll. Markers are only rebuilt when the
//! line count actually changes, so typing within a line never disturbs the
//! rendered gutter.

use crate::types::TextBuffer;

/// Render state for one gutter container
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineGutter {
    /// Name of the companion entity the markers are drawn into
    container: String,
    /// Line count of the last rebuild (`None` before the first render)
    line_count: Option<usize>,
    markers: Vec<String>,
    /// Vertical offset applied to the markers, opposite to the surface scroll
    offset_y: f32,
    /// Bumped on every rebuild so views can tell stale marker sets apart
    generation: u64,
}

impl LineGutter {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            ..Default::default()
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Re-derive the line count from `buffer` and rebuild if it changed.
    ///
    /// Returns `true` when the markers were rebuilt.
    pub fn render(&mut self, buffer: &TextBuffer) -> bool {
        self.render_count(buffer.line_count())
    }

    /// Rebuild for a known line count; a repeated count is a no-op
    pub fn render_count(&mut self, line_count: usize) -> bool {
        if self.line_count == Some(line_count) {
            return false;
        }

        self.markers = (1..=line_count).map(|n| n.to_string()).collect();
        self.line_count = Some(line_count);
        self.generation += 1;
        true
    }

    /// Follow the surface's scroll offset
    pub fn sync_scroll(&mut self, scroll_top: f32) {
        self.offset_y = -scroll_top;
    }

    pub fn line_count(&self) -> Option<usize> {
        self.line_count
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
