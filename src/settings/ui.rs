//! UI settings - companion elements and layout

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::indent::OutdentPolicy;

/// UI settings for the side views of a surface
#[derive(Clone, Debug, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Show line numbers
    pub show_line_numbers: bool,

    /// Suffix appended to a surface's name to find its gutter container
    pub gutter_suffix: String,

    /// Name of the entity that shows the cursor readout
    pub cursor_status: Option<String>,

    /// Code margin left (pixels) - space between gutter and code
    pub code_margin_left: f32,

    /// Top margin (pixels)
    pub margin_top: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            gutter_suffix: "-gutter-inner".to_string(),
            cursor_status: None,
            code_margin_left: 10.0,
            margin_top: 10.0,
        }
    }
}

impl UiSettings {
    /// Conventional gutter container name for a surface
    pub fn gutter_name(&self, surface_name: &str) -> String {
        format!("{surface_name}{}", self.gutter_suffix)
    }
}

/// Indentation settings
#[derive(Clone, Debug, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct IndentationSettings {
    /// Spaces inserted per indent level
    pub indent_width: usize,

    /// How far shift+tab strips a partial indent
    pub outdent_policy: OutdentPolicy,
}

impl Default for IndentationSettings {
    fn default() -> Self {
        Self {
            indent_width: 2,
            outdent_policy: OutdentPolicy::Compatible,
        }
    }
}
