//! # Bevy Playground Editor
//!
//! A code playground editing surface for Bevy: a text buffer with a line
//! number gutter, a `Ln/Col` cursor readout and block indent/outdent on
//! Tab/Shift+Tab, plus an image pixel picker.
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_playground_editor::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(PlaygroundEditorPlugin::default())
//!         .add_systems(Startup, setup)
//!         .add_systems(Update, on_save)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands, settings: Res<EditorSettings>) {
//!     commands.spawn(Camera2d);
//!     commands.spawn((Name::new("editor-gutter-inner"), Transform::default(), Visibility::default()));
//!     spawn_surface(
//!         &mut commands,
//!         &settings,
//!         "editor",
//!         "fn main() {\n}",
//!         DisplayRect::new(60.0, 0.0, 800.0, 600.0),
//!     );
//! }
//!
//! fn on_save(mut activated: MessageReader<ControlActivated>) {
//!     for message in activated.read() {
//!         info!("{} requested", message.name());
//!     }
//! }
//! ```
//!
//! ## Without Bevy
//!
//! [`surface::EditorSurface`] is a plain state machine and can be driven
//! directly:
//!
//! ```rust
//! use bevy_playground_editor::surface::*;
//! use bevy_playground_editor::types::SelectionRange;
//!
//! let mut surface = EditorSurface::new(SurfaceConfig::default(), "ab\ncd");
//! surface.attach();
//! surface.handle(SurfaceEvent::Click(SelectionRange::caret(1)));
//! surface.handle(SurfaceEvent::KeyDown(KeyPress::new(Key::Tab)));
//!
//! assert_eq!(surface.text(), "  ab\ncd");
//! assert_eq!(surface.selection(), SelectionRange::caret(3));
//! ```

pub mod coordinate;
pub mod cursor_locator;
pub mod events;
pub mod gutter;
pub mod indent;
pub mod input;
pub mod plugin;
pub mod scope;
pub mod settings;
pub mod surface;
pub mod types;

pub mod prelude {
    //! Convenient re-exports for common usage
    pub use crate::coordinate::{map_pointer, DisplayRect, NativeSize, PixelCoord};
    pub use crate::cursor_locator::{locate, CursorReadout};
    pub use crate::events::*;
    pub use crate::indent::{IndentEngine, IndentUnit, OutdentPolicy};
    pub use crate::input::{default_input_map, ActionState, ButtonlikeChord, EditorAction, InputMap};
    pub use crate::plugin::{
        spawn_surface, EditorInputManager, FocusedSurface, PixelPicker, PixelPickerPlugin,
        PlaygroundEditorPlugin,
    };
    pub use crate::scope::{ActionScope, ActionTarget};
    pub use crate::settings::*;
    pub use crate::surface::{EditorSurface, ExternalControl, SurfaceConfig, SurfaceEvent};
    pub use crate::types::*;
}
