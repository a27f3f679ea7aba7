//! Scrolling behavior settings

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Scrolling settings
#[derive(Clone, Debug, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollingSettings {
    /// Lines scrolled per wheel notch
    pub speed: f32,

    /// Pixels per wheel unit when the device reports pixel deltas
    pub pixel_scale: f32,
}

impl Default for ScrollingSettings {
    fn default() -> Self {
        Self {
            speed: 3.0,
            pixel_scale: 1.0,
        }
    }
}
