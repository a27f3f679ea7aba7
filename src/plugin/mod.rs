//! Bevy plugins for the playground editor
//!
//! `PlaygroundEditorPlugin` drives every [`EditorSurface`] in the world: it
//! attaches surfaces when they are added, routes keyboard, mouse and wheel
//! input to the focused one and keeps the text body, gutter markers and cursor
//! status companions in step.

mod picker;
mod ui_elements;

pub use picker::{action_target, native_size, PixelPicker, PixelPickerPlugin};

use bevy::prelude::*;
use leafwing_input_manager::prelude::{ActionState, InputManagerPlugin, InputMap};

use crate::events::{ContentChanged, ControlActivated, LineCountChanged};
use crate::input::{EditorAction, MouseDragState};
use crate::settings::EditorSettings;
use crate::surface::EditorSurface;
use ui_elements::*;

/// Surface that receives keyboard and wheel input
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusedSurface(Option<Entity>);

impl FocusedSurface {
    pub fn get(&self) -> Option<Entity> {
        self.0
    }

    pub fn set(&mut self, entity: Entity) {
        self.0 = Some(entity);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Systems that turn input into surface events
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceInputSet;

/// Systems that mirror surface state into entities
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceViewSet;

/// Playground editor plugin
pub struct PlaygroundEditorPlugin {
    settings: EditorSettings,
    input_map: InputMap<EditorAction>,
}

impl PlaygroundEditorPlugin {
    /// Create a new editor plugin with the given input map
    ///
    /// # Example
    /// ```ignore
    /// use bevy::prelude::*;
    /// use bevy_playground_editor::prelude::*;
    ///
    /// let input_map = default_input_map()
    ///     .with(EditorAction::Format, ButtonlikeChord::new([KeyCode::AltLeft, KeyCode::KeyF]));
    ///
    /// App::new()
    ///     .add_plugins(DefaultPlugins)
    ///     .add_plugins(PlaygroundEditorPlugin::new(input_map))
    ///     .run();
    /// ```
    pub fn new(input_map: InputMap<EditorAction>) -> Self {
        Self {
            settings: EditorSettings::default(),
            input_map,
        }
    }

    /// Set custom editor settings
    pub fn with_settings(mut self, settings: EditorSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl Default for PlaygroundEditorPlugin {
    fn default() -> Self {
        Self::new(crate::input::default_input_map())
    }
}

/// Resource to hold the configured input map until it's spawned
#[derive(Resource)]
struct PendingInputMap(InputMap<EditorAction>);

impl Plugin for PlaygroundEditorPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings.clone());
        app.init_resource::<FocusedSurface>();
        app.init_resource::<MouseDragState>();

        // Store the configured input map for the spawn system
        app.insert_resource(PendingInputMap(self.input_map.clone()));

        // Register leafwing-input-manager plugin for action-based input
        app.add_plugins(InputManagerPlugin::<EditorAction>::default());
        app.add_systems(Startup, (load_font, spawn_input_manager));

        // Outbound messages for the host application
        app.add_message::<ContentChanged>();
        app.add_message::<ControlActivated>();
        app.add_message::<LineCountChanged>();

        app.configure_sets(Update, SurfaceInputSet.before(SurfaceViewSet));

        app.add_systems(
            Update,
            (
                attach_surfaces,
                crate::input::handle_keyboard_input,
                crate::input::handle_mouse_input,
                crate::input::handle_mouse_wheel,
            )
                .chain()
                .in_set(SurfaceInputSet),
        );
        app.add_systems(
            Update,
            (sync_surface_text, sync_gutters, sync_cursor_status, detach_surfaces)
                .chain()
                .in_set(SurfaceViewSet),
        );
    }
}

/// Marker component for the editor's input manager entity
#[derive(Component)]
pub struct EditorInputManager;

/// Spawn the input manager entity with configured keybindings
fn spawn_input_manager(mut commands: Commands, pending: Res<PendingInputMap>) {
    commands.spawn((
        EditorInputManager,
        pending.0.clone(),
        ActionState::<EditorAction>::default(),
        Name::new("EditorInputManager"),
    ));
}

/// Load the configured font family, if any
fn load_font(mut settings: ResMut<EditorSettings>, asset_server: Option<Res<AssetServer>>) {
    let Some(asset_server) = asset_server else {
        return;
    };
    if settings.font.family.is_empty() {
        return;
    }
    let font_handle: Handle<Font> = asset_server.load(settings.font.family.clone());
    settings.font.handle = Some(font_handle);
}

/// Spawn a surface entity with the conventional companion names.
///
/// The gutter container is named `"{name}-gutter-inner"` (see
/// [`UiSettings::gutter_name`](crate::settings::UiSettings::gutter_name)).
pub fn spawn_surface(
    commands: &mut Commands,
    settings: &EditorSettings,
    name: &str,
    text: &str,
    bounds: crate::coordinate::DisplayRect,
) -> Entity {
    let config = crate::surface::SurfaceConfig::from_settings(settings, name);
    commands
        .spawn((
            EditorSurface::new(config, text),
            crate::types::SurfaceBounds(bounds),
            Transform::default(),
            Visibility::default(),
            Name::new(name.to_string()),
        ))
        .id()
}
