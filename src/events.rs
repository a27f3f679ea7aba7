//! Outbound messages for the host app

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::scope::ActionTarget;
use crate::surface::{EditorSurface, EventOutcome, ExternalControl, SurfaceAction};
use crate::types::TextEdit;

/// Fired after a surface's content changed, whether by typing or indentation
#[derive(Message, Clone, Debug)]
pub struct ContentChanged {
    /// Surface entity that was edited
    pub surface: Entity,
    /// Character range of the replacement
    pub edit: TextEdit,
    /// Content version after this edit
    pub version: u64,
    /// Line count after this edit
    pub line_count: usize,
}

/// Fired when a surface's gutter markers were rebuilt for a new line count
#[derive(Message, Clone, Debug)]
pub struct LineCountChanged {
    pub surface: Entity,
    pub line_count: usize,
}

/// Fired when a key binding activates one of the host's controls
#[derive(Message, Clone, Debug)]
pub struct ControlActivated {
    pub surface: Entity,
    pub control: ExternalControl,
}

impl ControlActivated {
    /// Name of the activated control
    pub fn name(&self) -> &'static str {
        self.control.name()
    }
}

/// Fired when a picker image is clicked, in native pixel coordinates
#[derive(Message, Clone, Debug)]
pub struct PixelPicked {
    /// Nearest enclosing [`ActionScope`](crate::scope::ActionScope), or root
    pub target: ActionTarget<Entity>,
    pub x: u32,
    pub y: u32,
}

impl PixelPicked {
    /// Action name carried by every pick
    pub const ACTION: &'static str = "pick-color";
}

/// Writers for everything a surface can publish
#[derive(SystemParam)]
pub struct SurfaceMessages<'w> {
    content: MessageWriter<'w, ContentChanged>,
    controls: MessageWriter<'w, ControlActivated>,
    line_counts: MessageWriter<'w, LineCountChanged>,
}

impl SurfaceMessages<'_> {
    /// Forward the outbound actions of one handled event
    pub fn publish(&mut self, surface: Entity, state: &EditorSurface, outcome: &EventOutcome) {
        for action in &outcome.actions {
            match action {
                SurfaceAction::ContentChanged(edit) => {
                    self.content.write(ContentChanged {
                        surface,
                        edit: *edit,
                        version: state.version(),
                        line_count: state.buffer().line_count(),
                    });
                }
                SurfaceAction::Activate(control) => {
                    self.controls.write(ControlActivated {
                        surface,
                        control: *control,
                    });
                }
                SurfaceAction::GutterRebuilt { line_count } => {
                    self.line_counts.write(LineCountChanged {
                        surface,
                        line_count: *line_count,
                    });
                }
            }
        }
    }
}
