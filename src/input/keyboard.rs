use bevy::input::keyboard::{Key as LogicalKey, KeyboardInput};
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use super::actions::InputEdit;
use super::cursor::CaretMotion;
use super::keybindings::EditorAction;
use crate::events::SurfaceMessages;
use crate::plugin::{EditorInputManager, FocusedSurface};
use crate::surface::{EditorSurface, Key, KeyPress, SurfaceEvent};

/// Surface event an editor action stands for.
///
/// Tab and the host-control chords are replayed as key presses so they go
/// through the surface's own binding resolution.
pub fn action_event(action: EditorAction, surface: &EditorSurface) -> SurfaceEvent {
    let motion = match action {
        EditorAction::Indent => return SurfaceEvent::KeyDown(KeyPress::new(Key::Tab)),
        EditorAction::Outdent => return SurfaceEvent::KeyDown(KeyPress::new(Key::Tab).with_shift()),
        EditorAction::Save => return SurfaceEvent::KeyDown(KeyPress::new(Key::Char('s')).with_ctrl()),
        EditorAction::Format => {
            return SurfaceEvent::KeyDown(KeyPress::new(Key::Enter).with_ctrl().with_shift())
        }
        EditorAction::DeleteBackward => return SurfaceEvent::Input(InputEdit::DeleteBackward),
        EditorAction::DeleteForward => return SurfaceEvent::Input(InputEdit::DeleteForward),
        EditorAction::InsertNewline => return SurfaceEvent::Input(InputEdit::Insert("\n".to_string())),
        EditorAction::MoveCursorLeft => CaretMotion::Left,
        EditorAction::MoveCursorRight => CaretMotion::Right,
        EditorAction::MoveCursorUp => CaretMotion::Up,
        EditorAction::MoveCursorDown => CaretMotion::Down,
        EditorAction::MoveCursorWordLeft => CaretMotion::WordLeft,
        EditorAction::MoveCursorWordRight => CaretMotion::WordRight,
        EditorAction::MoveCursorLineStart => CaretMotion::LineStart,
        EditorAction::MoveCursorLineEnd => CaretMotion::LineEnd,
        EditorAction::MoveCursorDocumentStart => CaretMotion::DocumentStart,
        EditorAction::MoveCursorDocumentEnd => CaretMotion::DocumentEnd,
        EditorAction::SelectAll => CaretMotion::SelectAll,
    };

    // Caret moves arrive as key releases carrying the new selection
    SurfaceEvent::KeyUp(motion.apply(surface.buffer(), surface.selection()))
}

/// System to handle keyboard input for the focused surface
pub fn handle_keyboard_input(
    focused: Res<FocusedSurface>,
    keys: Res<ButtonInput<KeyCode>>,
    mut char_events: MessageReader<KeyboardInput>,
    action_query: Query<&ActionState<EditorAction>, With<EditorInputManager>>,
    mut surfaces: Query<&mut EditorSurface>,
    mut messages: SurfaceMessages,
) {
    let Some(entity) = focused.get() else {
        char_events.clear();
        return;
    };
    let Ok(mut surface) = surfaces.get_mut(entity) else {
        char_events.clear();
        return;
    };

    let Ok(action_state) = action_query.single() else {
        warn!("No EditorInputManager entity found with ActionState");
        return;
    };

    if let Some(action) = EditorAction::ALL.into_iter().find(|action| action_state.just_pressed(action)) {
        // Drain character events so the bound key is not also typed
        char_events.clear();

        debug!("{:?} on surface {:?}", action, entity);
        let event = action_event(action, &surface);
        let outcome = surface.handle(event);
        messages.publish(entity, &surface, &outcome);
        return;
    }

    let command_held = keys.any_pressed([
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
        KeyCode::SuperLeft,
        KeyCode::SuperRight,
    ]);

    for event in char_events.read() {
        if !event.state.is_pressed() || command_held {
            continue;
        }

        let text: String = match &event.logical_key {
            LogicalKey::Character(text) => text.chars().filter(|c| !c.is_control()).collect(),
            // Bevy sends Space as a separate variant, not Character(" ")
            LogicalKey::Space => " ".to_string(),
            _ => continue,
        };
        if text.is_empty() {
            continue;
        }

        let outcome = surface.handle(SurfaceEvent::Input(InputEdit::Insert(text)));
        messages.publish(entity, &surface, &outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::ButtonState;

    use crate::events::{ContentChanged, ControlActivated, LineCountChanged};
    use crate::surface::SurfaceConfig;
    use crate::types::SelectionRange;

    fn keyboard_app(text: &str, caret: usize, pressed: Option<EditorAction>) -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<FocusedSurface>();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_message::<KeyboardInput>();
        app.add_message::<ContentChanged>();
        app.add_message::<ControlActivated>();
        app.add_message::<LineCountChanged>();
        app.add_systems(Update, handle_keyboard_input);

        let mut action_state = ActionState::<EditorAction>::default();
        if let Some(action) = pressed {
            action_state.press(&action);
        }
        app.world_mut().spawn((EditorInputManager, action_state));

        let mut surface = EditorSurface::new(SurfaceConfig::default(), text);
        surface.attach();
        surface.handle(SurfaceEvent::Click(SelectionRange::caret(caret)));
        let entity = app.world_mut().spawn(surface).id();
        app.world_mut().resource_mut::<FocusedSurface>().set(entity);

        (app, entity)
    }

    fn type_char(app: &mut App, c: &str) {
        app.world_mut().resource_mut::<Messages<KeyboardInput>>().write(KeyboardInput {
            key_code: KeyCode::KeyX,
            logical_key: LogicalKey::Character(c.into()),
            state: ButtonState::Pressed,
            text: Some(c.into()),
            repeat: false,
            window: Entity::PLACEHOLDER,
        });
    }

    fn text_of(app: &App, entity: Entity) -> Option<String> {
        app.world().get::<EditorSurface>(entity).map(EditorSurface::text)
    }

    #[test]
    fn test_indent_action_edits_focused_surface() {
        let (mut app, entity) = keyboard_app("ab\ncd", 1, Some(EditorAction::Indent));

        app.update();
        assert_eq!(text_of(&app, entity).as_deref(), Some("  ab\ncd"));

        let changed = app.world().resource::<Messages<ContentChanged>>();
        assert_eq!(changed.iter_current_update_messages().count(), 1);
    }

    #[test]
    fn test_save_action_only_activates_control() {
        let (mut app, entity) = keyboard_app("x", 0, Some(EditorAction::Save));

        app.update();
        assert_eq!(text_of(&app, entity).as_deref(), Some("x"));

        let controls = app.world().resource::<Messages<ControlActivated>>();
        let names: Vec<&str> = controls.iter_current_update_messages().map(ControlActivated::name).collect();
        assert_eq!(names, vec!["playground-update"]);
    }

    #[test]
    fn test_typed_characters_are_inserted() {
        let (mut app, entity) = keyboard_app("ab", 2, None);

        type_char(&mut app, "x");
        app.update();
        assert_eq!(text_of(&app, entity).as_deref(), Some("abx"));
    }

    #[test]
    fn test_typing_ignored_while_command_held() {
        let (mut app, entity) = keyboard_app("ab", 2, None);
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ControlLeft);

        type_char(&mut app, "x");
        app.update();
        assert_eq!(text_of(&app, entity).as_deref(), Some("ab"));
    }

    #[test]
    fn test_unfocused_surface_is_untouched() {
        let (mut app, entity) = keyboard_app("ab", 2, Some(EditorAction::Indent));
        app.world_mut().resource_mut::<FocusedSurface>().clear();

        app.update();
        assert_eq!(text_of(&app, entity).as_deref(), Some("ab"));
    }

    #[test]
    fn test_tab_actions_become_key_presses() {
        let surface = EditorSurface::new(SurfaceConfig::default(), "x");
        assert_eq!(
            action_event(EditorAction::Outdent, &surface),
            SurfaceEvent::KeyDown(KeyPress::new(Key::Tab).with_shift())
        );
    }

    #[test]
    fn test_motion_actions_carry_selection() {
        let mut surface = EditorSurface::new(SurfaceConfig::default(), "ab\ncd");
        surface.attach();
        surface.handle(SurfaceEvent::Click(SelectionRange::caret(4)));

        assert_eq!(
            action_event(EditorAction::MoveCursorLineStart, &surface),
            SurfaceEvent::KeyUp(SelectionRange::caret(3))
        );
        assert_eq!(
            action_event(EditorAction::SelectAll, &surface),
            SurfaceEvent::KeyUp(SelectionRange::new(0, 5))
        );
    }

    #[test]
    fn test_every_action_maps_to_an_event() {
        let mut surface = EditorSurface::new(SurfaceConfig::default(), "line");
        surface.attach();
        for action in EditorAction::ALL {
            let outcome = surface.handle(action_event(action, &surface));
            assert!(outcome.handled, "{action:?} was not handled");
        }
    }
}
