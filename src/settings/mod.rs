//! Settings for the playground editor
//!
//! `EditorSettings` groups the per-concern settings into one resource. Build it
//! with `EditorSettingsBuilder` or load it from JSON with
//! [`EditorSettings::from_json_str`].

mod core;
mod scrolling;
mod ui;

pub use self::core::*;
pub use scrolling::*;
pub use ui::*;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Widest indent unit accepted from configuration
pub const MAX_INDENT_WIDTH: usize = 16;

/// Settings error
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Indent width {width} exceeds the maximum of {max}")]
    InvalidIndentWidth { width: usize, max: usize },
}

/// Complete editor settings
#[derive(Clone, Debug, Default, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Font configuration
    pub font: FontSettings,

    /// Color theme
    pub theme: ThemeSettings,

    /// Companion elements and layout
    pub ui: UiSettings,

    /// Indent unit and outdent behavior
    pub indentation: IndentationSettings,

    /// Scrolling behavior
    pub scrolling: ScrollingSettings,
}

impl EditorSettings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let width = self.indentation.indent_width;
        if width > MAX_INDENT_WIDTH {
            return Err(SettingsError::InvalidIndentWidth {
                width,
                max: MAX_INDENT_WIDTH,
            });
        }
        Ok(())
    }
}

/// Builder for configuring all editor settings at once
///
/// # Example
/// ```no_run
/// use bevy_playground_editor::settings::EditorSettingsBuilder;
///
/// let settings = EditorSettingsBuilder::default()
///     .font_size(16.0)
///     .indent_width(4)
///     .theme_light()
///     .build();
/// ```
#[derive(Default)]
pub struct EditorSettingsBuilder {
    settings: EditorSettings,
}

impl EditorSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // Font configuration
    pub fn font_size(mut self, size: f32) -> Self {
        self.settings.font.size = size;
        self.settings.font.line_height = size * 1.5;
        self.settings.font.char_width = size * 0.6;
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.settings.font.family = family.into();
        self
    }

    // Theme presets
    pub fn theme_dark(mut self) -> Self {
        self.settings.theme = ThemeSettings::vscode_dark();
        self
    }

    pub fn theme_light(mut self) -> Self {
        self.settings.theme = ThemeSettings::vscode_light();
        self
    }

    pub fn theme(mut self, theme: ThemeSettings) -> Self {
        self.settings.theme = theme;
        self
    }

    // Indentation
    pub fn indent_width(mut self, width: usize) -> Self {
        self.settings.indentation.indent_width = width;
        self
    }

    pub fn outdent_policy(mut self, policy: crate::indent::OutdentPolicy) -> Self {
        self.settings.indentation.outdent_policy = policy;
        self
    }

    // Companions
    pub fn cursor_status(mut self, name: impl Into<String>) -> Self {
        self.settings.ui.cursor_status = Some(name.into());
        self
    }

    pub fn show_line_numbers(mut self, show: bool) -> Self {
        self.settings.ui.show_line_numbers = show;
        self
    }

    // Custom settings
    pub fn font(mut self, font: FontSettings) -> Self {
        self.settings.font = font;
        self
    }

    pub fn ui(mut self, ui: UiSettings) -> Self {
        self.settings.ui = ui;
        self
    }

    pub fn indentation(mut self, indentation: IndentationSettings) -> Self {
        self.settings.indentation = indentation;
        self
    }

    pub fn scrolling(mut self, scrolling: ScrollingSettings) -> Self {
        self.settings.scrolling = scrolling;
        self
    }

    pub fn build(self) -> EditorSettings {
        self.settings
    }
}
