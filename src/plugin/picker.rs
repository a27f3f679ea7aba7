//! Image pixel picker
//!
//! A click on a [`PixelPicker`] maps the pointer onto the image's native pixel
//! grid and sends one [`PixelPicked`] to the nearest enclosing
//! [`ActionScope`], or to the root when there is none.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::coordinate::{map_pointer, NativeSize, PixelCoord};
use crate::events::PixelPicked;
use crate::scope::{resolve_target, ActionScope, ActionTarget};
use crate::types::SurfaceBounds;

/// An image that reports clicked pixels.
///
/// The native size comes from the sprite's loaded image when there is one,
/// otherwise from `fallback_size`. It is re-read on every click.
#[derive(Component, Clone, Debug, Default)]
#[require(SurfaceBounds)]
pub struct PixelPicker {
    pub fallback_size: Option<NativeSize>,
}

impl PixelPicker {
    pub fn with_fallback_size(width: u32, height: u32) -> Self {
        Self {
            fallback_size: Some(NativeSize::new(width, height)),
        }
    }
}

/// Adds click-to-pick for [`PixelPicker`] entities
pub struct PixelPickerPlugin;

impl Plugin for PixelPickerPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PixelPicked>();
        app.add_systems(Update, handle_picker_clicks);
    }
}

/// Native size of a picker: loaded image first, then the fallback
pub fn native_size(picker: &PixelPicker, sprite: Option<&Sprite>, images: Option<&Assets<Image>>) -> Option<NativeSize> {
    // Plain color sprites point at the default 1x1 texture
    let loaded = sprite
        .filter(|sprite| sprite.image != Handle::default())
        .zip(images)
        .and_then(|(sprite, images)| images.get(&sprite.image))
        .map(|image| NativeSize::from(image.size()))
        .filter(NativeSize::is_known);

    loaded.or(picker.fallback_size)
}

/// Scope that receives actions raised by `entity`
pub fn action_target(
    entity: Entity,
    parents: &Query<&ChildOf>,
    scopes: &Query<(), With<ActionScope>>,
) -> ActionTarget<Entity> {
    resolve_target(
        entity,
        |node| parents.get(node).ok().map(ChildOf::parent),
        |node| scopes.contains(node),
    )
}

pub(crate) fn handle_picker_clicks(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    images: Option<Res<Assets<Image>>>,
    pickers: Query<(Entity, &PixelPicker, &SurfaceBounds, Option<&Sprite>)>,
    parents: Query<&ChildOf>,
    scopes: Query<(), With<ActionScope>>,
    mut picked: MessageWriter<PixelPicked>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(pointer) = window_query.iter().next().and_then(|window| window.cursor_position()) else {
        return;
    };

    for (entity, picker, bounds, sprite) in pickers.iter() {
        if !bounds.0.contains(pointer) {
            continue;
        }

        let native = native_size(picker, sprite, images.as_deref());
        let Some(PixelCoord { x, y }) = map_pointer(pointer, bounds.0, native) else {
            continue;
        };

        let target = action_target(entity, &parents, &scopes);
        debug!("Picked pixel ({}, {}) on {:?} -> {:?}", x, y, entity, target);
        picked.write(PixelPicked { target, x, y });
    }
}
