use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::coordinate::DisplayRect;
use crate::events::SurfaceMessages;
use crate::plugin::FocusedSurface;
use crate::settings::EditorSettings;
use crate::surface::{EditorSurface, SurfaceEvent};
use crate::types::{SelectionRange, SurfaceBounds};

/// Mouse drag state for selection
#[derive(Resource, Default)]
pub struct MouseDragState {
    /// Whether we're currently dragging
    pub is_dragging: bool,
    /// Position where drag started (character index)
    pub drag_start_pos: Option<usize>,
}

/// Convert window coordinates to a character position in a surface
pub fn screen_to_char_pos(
    screen_pos: Vec2,
    bounds: DisplayRect,
    surface: &EditorSurface,
    settings: &EditorSettings,
) -> usize {
    let buffer = surface.buffer();

    let relative_x = screen_pos.x - bounds.left - settings.ui.code_margin_left;
    // scroll_top grows as the content moves up
    let relative_y = screen_pos.y - bounds.top - settings.ui.margin_top + surface.scroll_top();

    let line_height = settings.font.line_height.max(1.0);
    let char_width = settings.font.char_width.max(1.0);

    let line = (relative_y / line_height).max(0.0) as usize;
    let col = (relative_x / char_width).round().max(0.0) as usize;

    if line >= buffer.line_count() {
        // Click below last line - go to end of document
        return buffer.len_chars();
    }

    let line_start = buffer.line_start(line);
    let line_len = buffer.line_end(line) - line_start;
    line_start + col.min(line_len)
}

/// Largest scroll offset that still shows the last line
pub fn max_scroll_top(surface: &EditorSurface, bounds: DisplayRect, settings: &EditorSettings) -> f32 {
    let content_height = surface.buffer().line_count() as f32 * settings.font.line_height;
    (content_height + settings.ui.margin_top - bounds.height).max(0.0)
}

/// System to handle clicks and drag selection on surfaces
pub fn handle_mouse_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    settings: Res<EditorSettings>,
    mut focused: ResMut<FocusedSurface>,
    mut drag_state: ResMut<MouseDragState>,
    mut surfaces: Query<(Entity, &mut EditorSurface, &SurfaceBounds)>,
    mut messages: SurfaceMessages,
) {
    let Some(cursor_pos_screen) = window_query.iter().next().and_then(|window| window.cursor_position()) else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        let hit = surfaces
            .iter_mut()
            .find(|(_, _, bounds)| bounds.0.contains(cursor_pos_screen));

        let Some((entity, mut surface, bounds)) = hit else {
            // Clicked outside every surface, lose focus
            focused.clear();
            drag_state.is_dragging = false;
            drag_state.drag_start_pos = None;
            return;
        };

        focused.set(entity);
        let char_pos = screen_to_char_pos(cursor_pos_screen, bounds.0, &surface, &settings);
        drag_state.is_dragging = true;
        drag_state.drag_start_pos = Some(char_pos);

        let outcome = surface.handle(SurfaceEvent::Click(SelectionRange::caret(char_pos)));
        messages.publish(entity, &surface, &outcome);
        return;
    }

    if mouse_button.just_released(MouseButton::Left) {
        drag_state.is_dragging = false;
        drag_state.drag_start_pos = None;
        return;
    }

    // Dragging extends the selection of the focused surface
    if drag_state.is_dragging && mouse_button.pressed(MouseButton::Left) {
        let (Some(entity), Some(start_pos)) = (focused.get(), drag_state.drag_start_pos) else {
            return;
        };
        let Ok((_, mut surface, bounds)) = surfaces.get_mut(entity) else {
            return;
        };

        let current_pos = screen_to_char_pos(cursor_pos_screen, bounds.0, &surface, &settings);
        let selection = SelectionRange::new(start_pos, current_pos);
        if selection != surface.selection() {
            surface.handle(SurfaceEvent::Select(selection));
        }
    }
}

/// System to handle mouse wheel scrolling of the focused surface
pub fn handle_mouse_wheel(
    mut mouse_wheel_events: MessageReader<MouseWheel>,
    settings: Res<EditorSettings>,
    focused: Res<FocusedSurface>,
    mut surfaces: Query<(&mut EditorSurface, &SurfaceBounds)>,
) {
    let Some(entity) = focused.get() else {
        mouse_wheel_events.clear();
        return;
    };
    let Ok((mut surface, bounds)) = surfaces.get_mut(entity) else {
        mouse_wheel_events.clear();
        return;
    };

    for event in mouse_wheel_events.read() {
        if event.y.abs() <= 0.0 {
            continue;
        }

        // Positive y = scroll up (content moves down, scroll_top shrinks)
        let delta = match event.unit {
            MouseScrollUnit::Line => event.y * settings.font.line_height * settings.scrolling.speed,
            MouseScrollUnit::Pixel => event.y * settings.scrolling.pixel_scale,
        };

        let max_scroll = max_scroll_top(&surface, bounds.0, &settings);
        let scroll_top = (surface.scroll_top() - delta).clamp(0.0, max_scroll);
        surface.handle(SurfaceEvent::Scroll(scroll_top));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ContentChanged, ControlActivated, LineCountChanged};
    use crate::surface::SurfaceConfig;

    fn attached(text: &str) -> EditorSurface {
        let mut surface = EditorSurface::new(SurfaceConfig::default(), text);
        surface.attach();
        surface
    }

    fn click_app(cursor: Vec2) -> App {
        let mut app = App::new();
        app.insert_resource(settings());
        app.init_resource::<FocusedSurface>();
        app.init_resource::<MouseDragState>();
        app.add_message::<ContentChanged>();
        app.add_message::<ControlActivated>();
        app.add_message::<LineCountChanged>();
        app.add_systems(Update, handle_mouse_input);

        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        app.insert_resource(buttons);

        let mut window = Window::default();
        window.set_cursor_position(Some(cursor));
        app.world_mut().spawn((window, PrimaryWindow));
        app
    }

    fn wheel(app: &mut App, unit: MouseScrollUnit, y: f32) {
        app.world_mut().resource_mut::<Messages<MouseWheel>>().write(MouseWheel {
            unit,
            x: 0.0,
            y,
            window: Entity::PLACEHOLDER,
        });
    }

    fn settings() -> EditorSettings {
        let mut settings = EditorSettings::default();
        settings.font.line_height = 20.0;
        settings.font.char_width = 10.0;
        settings.ui.code_margin_left = 0.0;
        settings.ui.margin_top = 0.0;
        settings
    }

    #[test]
    fn test_screen_to_char_pos() {
        let surface = EditorSurface::new(SurfaceConfig::default(), "hello\nhi\nworld");
        let bounds = DisplayRect::new(100.0, 50.0, 400.0, 300.0);
        let settings = settings();

        // Line 0, column 3
        assert_eq!(screen_to_char_pos(Vec2::new(130.0, 55.0), bounds, &surface, &settings), 3);
        // Line 1, past the end of "hi"
        assert_eq!(screen_to_char_pos(Vec2::new(190.0, 75.0), bounds, &surface, &settings), 8);
        // Below the last line
        assert_eq!(screen_to_char_pos(Vec2::new(100.0, 340.0), bounds, &surface, &settings), 14);
    }

    #[test]
    fn test_max_scroll_top() {
        let surface = EditorSurface::new(SurfaceConfig::default(), "a\nb\nc\nd\ne");
        let settings = settings();

        assert_eq!(max_scroll_top(&surface, DisplayRect::new(0.0, 0.0, 100.0, 60.0), &settings), 40.0);
        assert_eq!(max_scroll_top(&surface, DisplayRect::new(0.0, 0.0, 100.0, 500.0), &settings), 0.0);
    }

    #[test]
    fn test_click_focuses_and_places_caret() {
        let mut app = click_app(Vec2::new(130.0, 55.0));
        let surface = app
            .world_mut()
            .spawn((
                attached("hello\nhi\nworld"),
                SurfaceBounds(DisplayRect::new(100.0, 50.0, 400.0, 300.0)),
            ))
            .id();

        app.update();
        assert_eq!(app.world().resource::<FocusedSurface>().get(), Some(surface));
        assert_eq!(
            app.world().get::<EditorSurface>(surface).map(EditorSurface::selection),
            Some(SelectionRange::caret(3))
        );
        assert_eq!(app.world().resource::<MouseDragState>().drag_start_pos, Some(3));
    }

    #[test]
    fn test_click_outside_clears_focus() {
        let mut app = click_app(Vec2::new(20.0, 20.0));
        let surface = app
            .world_mut()
            .spawn((attached("hello"), SurfaceBounds(DisplayRect::new(100.0, 50.0, 400.0, 300.0))))
            .id();
        app.world_mut().resource_mut::<FocusedSurface>().set(surface);

        app.update();
        assert_eq!(app.world().resource::<FocusedSurface>().get(), None);
    }

    #[test]
    fn test_wheel_scrolls_focused_surface_within_bounds() {
        let mut app = App::new();
        app.insert_resource(settings());
        app.init_resource::<FocusedSurface>();
        app.add_message::<MouseWheel>();
        app.add_systems(Update, handle_mouse_wheel);

        let surface = app
            .world_mut()
            .spawn((attached("a\nb\nc\nd\ne"), SurfaceBounds(DisplayRect::new(0.0, 0.0, 100.0, 60.0))))
            .id();
        app.world_mut().resource_mut::<FocusedSurface>().set(surface);
        let scroll_top = |app: &App| app.world().get::<EditorSurface>(surface).map(EditorSurface::scroll_top);

        wheel(&mut app, MouseScrollUnit::Pixel, -10.0);
        app.update();
        assert_eq!(scroll_top(&app), Some(10.0));

        // Three lines of 20px overshoot the 40px limit
        wheel(&mut app, MouseScrollUnit::Line, -1.0);
        app.update();
        assert_eq!(scroll_top(&app), Some(40.0));

        wheel(&mut app, MouseScrollUnit::Line, 5.0);
        app.update();
        assert_eq!(scroll_top(&app), Some(0.0));
    }
}
