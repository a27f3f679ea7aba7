//! Core editor settings: Font and Theme

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Font settings - shared across all text rendering
#[derive(Clone, Debug, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    /// Font asset path; empty uses Bevy's default font
    pub family: String,

    /// Font size in pixels
    pub size: f32,

    /// Character width (for monospace hit-testing)
    pub char_width: f32,

    /// Line height in pixels, also the height of one gutter marker
    pub line_height: f32,

    /// Cached font handle (set at runtime)
    #[serde(skip)]
    pub handle: Option<Handle<Font>>,
}

impl Default for FontSettings {
    fn default() -> Self {
        let size = 14.0;
        Self {
            family: String::new(),
            size,
            char_width: size * 0.6,
            line_height: size * 1.5,
            handle: None,
        }
    }
}

impl FontSettings {
    /// Handle to render with, falling back to the default font
    pub fn font_handle(&self) -> Handle<Font> {
        self.handle.clone().unwrap_or_default()
    }
}

/// Theme settings - colors for the surface and its companions
#[derive(Clone, Debug, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Text color (default)
    pub foreground: Color,

    /// Line numbers color
    pub line_numbers: Color,

    /// Cursor status text color
    pub status_foreground: Color,
}

impl ThemeSettings {
    pub fn vscode_dark() -> Self {
        Self {
            foreground: Color::srgb(0.827, 0.827, 0.827),
            line_numbers: Color::srgb(0.545, 0.545, 0.545),
            status_foreground: Color::srgb(0.659, 0.659, 0.659),
        }
    }

    pub fn vscode_light() -> Self {
        Self {
            foreground: Color::srgb(0.0, 0.0, 0.0),
            line_numbers: Color::srgb(0.588, 0.588, 0.588),
            status_foreground: Color::srgb(0.35, 0.35, 0.35),
        }
    }
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self::vscode_dark()
    }
}
