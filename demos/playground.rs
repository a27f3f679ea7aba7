//! Playground demo
//!
//! One editing surface with a line gutter and a cursor readout, next to a
//! color swatch that reports clicked pixels.
//!
//! - Tab / Shift+Tab indent and outdent the selected lines
//! - Ctrl+S and Ctrl+Shift+Enter are logged as playground controls
//! - Clicking the swatch logs the native pixel under the pointer

use bevy::prelude::*;
use bevy_playground_editor::prelude::*;

const WINDOW_WIDTH: f32 = 1200.0;
const WINDOW_HEIGHT: f32 = 800.0;

fn main() {
    let settings = EditorSettings {
        ui: UiSettings {
            cursor_status: Some("cursor".to_string()),
            ..default()
        },
        ..default()
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bevy Playground Editor".to_string(),
                resolution: (WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PlaygroundEditorPlugin::default().with_settings(settings))
        .add_plugins(PixelPickerPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (log_changes, log_controls, log_picks))
        .run();
}

/// Window rect (top-left origin, y down) to a world translation at its top-left corner
fn top_left(rect: DisplayRect) -> Vec3 {
    Vec3::new(
        rect.left - WINDOW_WIDTH / 2.0,
        WINDOW_HEIGHT / 2.0 - rect.top,
        0.0,
    )
}

fn setup(mut commands: Commands, settings: Res<EditorSettings>) {
    commands.spawn(Camera2d);

    let editor_rect = DisplayRect::new(80.0, 40.0, 700.0, 700.0);
    let origin = top_left(editor_rect);

    // Gutter sits just left of the code; the inner container scrolls
    commands
        .spawn((
            Transform::from_xyz(origin.x - 10.0, origin.y - settings.ui.margin_top, 0.0),
            Visibility::default(),
            Name::new("editor-gutter"),
        ))
        .with_children(|gutter| {
            gutter.spawn((
                Transform::default(),
                Visibility::default(),
                Name::new(settings.ui.gutter_name("editor")),
            ));
        });

    commands.spawn((
        Text2d::default(),
        TextFont {
            font_size: settings.font.size,
            ..default()
        },
        bevy::sprite::Anchor::TOP_LEFT,
        Transform::from_xyz(origin.x, -WINDOW_HEIGHT / 2.0 + 40.0, 0.0),
        Name::new("cursor"),
    ));

    let surface = spawn_surface(
        &mut commands,
        &settings,
        "editor",
        "fn main() {\n    let greeting = \"hello\";\n    println!(\"{greeting}\");\n}\n",
        editor_rect,
    );
    commands.entity(surface).insert(Transform::from_translation(origin));

    let swatch_rect = DisplayRect::new(820.0, 40.0, 320.0, 240.0);
    let corner = top_left(swatch_rect);
    let center = corner + Vec3::new(swatch_rect.width / 2.0, -swatch_rect.height / 2.0, 0.0);

    commands
        .spawn((
            ActionScope,
            Transform::default(),
            Visibility::default(),
            Name::new("color-tool"),
        ))
        .with_children(|tool| {
            tool.spawn((
                Sprite::from_color(
                    Color::srgb(0.2, 0.5, 0.8),
                    Vec2::new(swatch_rect.width, swatch_rect.height),
                ),
                Transform::from_translation(center),
                PixelPicker::with_fallback_size(640, 480),
                SurfaceBounds(swatch_rect),
                Name::new("swatch"),
            ));
        });
}

fn log_changes(mut changes: MessageReader<ContentChanged>) {
    for change in changes.read() {
        let edit = &change.edit;
        info!(
            "{:?} v{}: {}..{} -> {}..{}, {} line(s)",
            change.surface, change.version, edit.start, edit.old_end, edit.start, edit.new_end, change.line_count
        );
    }
}

fn log_controls(mut activated: MessageReader<ControlActivated>) {
    for message in activated.read() {
        info!("{} requested by {:?}", message.name(), message.surface);
    }
}

fn log_picks(mut picked: MessageReader<PixelPicked>) {
    for pick in picked.read() {
        info!("{} at ({}, {}) for {:?}", PixelPicked::ACTION, pick.x, pick.y, pick.target);
    }
}
