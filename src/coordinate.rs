//! Pointer to native-pixel mapping for the image picker

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Displayed rectangle in window space (top-left origin, y down)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whether the rectangle has a positive area
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x < self.left + self.width
            && point.y >= self.top
            && point.y < self.top + self.height
    }
}

/// Pixel dimensions of the source image
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeSize {
    pub width: u32,
    pub height: u32,
}

impl NativeSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_known(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl From<UVec2> for NativeSize {
    fn from(size: UVec2) -> Self {
        Self::new(size.x, size.y)
    }
}

/// A pixel in native image space
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoord {
    pub x: u32,
    pub y: u32,
}

/// Map a window-space pointer position onto the native pixel grid.
///
/// Returns `None` when the native size is unknown or the rectangle has no
/// area. The result is clamped to `[0, native - 1]` on both axes.
pub fn map_pointer(pointer: Vec2, rect: DisplayRect, native: Option<NativeSize>) -> Option<PixelCoord> {
    let native = native.filter(NativeSize::is_known)?;
    if !rect.is_visible() {
        return None;
    }

    let sx = native.width as f64 / rect.width as f64;
    let sy = native.height as f64 / rect.height as f64;

    let px = (pointer.x as f64 - rect.left as f64) * sx;
    let py = (pointer.y as f64 - rect.top as f64) * sy;

    Some(PixelCoord {
        x: clamp_axis(px, native.width),
        y: clamp_axis(py, native.height),
    })
}

fn clamp_axis(value: f64, extent: u32) -> u32 {
    let max = (extent - 1) as f64;
    value.floor().clamp(0.0, max) as u32
}
