//! UI elements: surface text, line gutter markers and cursor status

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use bevy::sprite::Anchor;

use super::FocusedSurface;
use crate::settings::EditorSettings;
use crate::surface::EditorSurface;
use crate::types::{GutterMarker, GutterView, SurfaceText};

/// Attach newly added surfaces and spawn their text body
pub(crate) fn attach_surfaces(
    mut commands: Commands,
    settings: Res<EditorSettings>,
    mut focused: ResMut<FocusedSurface>,
    mut added: Query<(Entity, &mut EditorSurface), Added<EditorSurface>>,
) {
    for (entity, mut surface) in added.iter_mut() {
        if !surface.attach() {
            continue;
        }
        debug!("Attached surface {:?}", entity);

        if focused.get().is_none() {
            focused.set(entity);
        }

        let text_font = TextFont {
            font: settings.font.font_handle(),
            font_size: settings.font.size,
            ..default()
        };

        commands.entity(entity).with_children(|parent| {
            parent.spawn((
                Text2d::new(surface.text()),
                text_font,
                TextColor(settings.theme.foreground),
                Anchor::TOP_LEFT,
                Transform::from_translation(text_translation(&surface, &settings)),
                SurfaceText { surface: entity },
                Name::new("SurfaceText"),
            ));
        });
    }
}

/// Drop focus, text bodies and gutter markers of surfaces that were removed or despawned
pub(crate) fn detach_surfaces(
    mut commands: Commands,
    mut removed: RemovedComponents<EditorSurface>,
    mut focused: ResMut<FocusedSurface>,
    texts: Query<(Entity, &SurfaceText)>,
    mut views: Query<(Entity, &mut GutterView)>,
    markers: Query<(Entity, &ChildOf), With<GutterMarker>>,
) {
    for entity in removed.read() {
        debug!("Detached surface {:?}", entity);

        if focused.get() == Some(entity) {
            focused.clear();
        }

        for (text_entity, text) in texts.iter() {
            if text.surface == entity {
                commands.entity(text_entity).despawn();
            }
        }

        for (container, mut view) in views.iter_mut() {
            if view.surface != Some(entity) {
                continue;
            }
            despawn_markers(&mut commands, container, &markers);
            *view = GutterView::default();
        }
    }
}

fn despawn_markers(
    commands: &mut Commands,
    container: Entity,
    markers: &Query<(Entity, &ChildOf), With<GutterMarker>>,
) {
    for (marker, parent) in markers.iter() {
        if parent.parent() == container {
            commands.entity(marker).despawn();
        }
    }
}

fn text_translation(surface: &EditorSurface, settings: &EditorSettings) -> Vec3 {
    // Bevy's y axis points up, so scrolling down moves the text up
    Vec3::new(
        settings.ui.code_margin_left,
        -settings.ui.margin_top + surface.scroll_top(),
        1.0,
    )
}

/// Mirror surface content and scroll into the text body
pub(crate) fn sync_surface_text(
    settings: Res<EditorSettings>,
    surfaces: Query<&EditorSurface, Changed<EditorSurface>>,
    mut texts: Query<(&SurfaceText, &mut Text2d, &mut Transform)>,
) {
    for (link, mut text, mut transform) in texts.iter_mut() {
        let Ok(surface) = surfaces.get(link.surface) else {
            continue;
        };

        let content = surface.text();
        if text.0 != content {
            text.0 = content;
        }
        transform.translation = text_translation(surface, &settings);
    }
}

/// Index named entities so companions can be resolved by name
fn name_index<'a>(named: impl Iterator<Item = (Entity, &'a Name)>) -> HashMap<&'a str, Entity> {
    named.map(|(entity, name)| (name.as_str(), entity)).collect()
}

/// Rebuild gutter markers when the line count changed and follow the scroll.
///
/// The plugin owns the local y translation of the named container, so hosts
/// position it through a parent entity.
pub(crate) fn sync_gutters(
    mut commands: Commands,
    settings: Res<EditorSettings>,
    surfaces: Query<(Entity, &EditorSurface)>,
    named: Query<(Entity, &Name)>,
    mut containers: Query<(Option<&mut GutterView>, &mut Transform), Without<GutterMarker>>,
    markers: Query<(Entity, &ChildOf), With<GutterMarker>>,
    mut warned: Local<HashSet<String>>,
) {
    let names = name_index(named.iter());

    for (entity, surface) in surfaces.iter() {
        let Some(gutter) = surface.gutter() else {
            continue;
        };

        let Some(&container) = names.get(gutter.container()) else {
            if warned.insert(gutter.container().to_string()) {
                warn!("Gutter container '{}' not found", gutter.container());
            }
            continue;
        };
        let Ok((view, mut transform)) = containers.get_mut(container) else {
            continue;
        };

        // Markers scroll with the surface content
        let offset = -gutter.offset_y();
        if transform.translation.y != offset {
            transform.translation.y = offset;
        }

        let wanted = GutterView {
            surface: Some(entity),
            generation: Some(gutter.generation()),
        };
        if view.as_deref() == Some(&wanted) {
            continue;
        }

        despawn_markers(&mut commands, container, &markers);

        let text_font = TextFont {
            font: settings.font.font_handle(),
            font_size: settings.font.size,
            ..default()
        };
        let line_height = settings.font.line_height;

        commands.entity(container).with_children(|parent| {
            for (index, label) in gutter.markers().iter().enumerate() {
                parent.spawn((
                    Text2d::new(label.clone()),
                    text_font.clone(),
                    TextColor(settings.theme.line_numbers),
                    Anchor::TOP_RIGHT,
                    Transform::from_xyz(0.0, -(index as f32) * line_height, 0.0),
                    GutterMarker { line: index + 1 },
                ));
            }
        });

        match view {
            Some(mut view) => *view = wanted,
            None => {
                commands.entity(container).insert(wanted);
            }
        }
    }
}

/// Write each surface's cursor readout into its status companion.
///
/// Resolved every frame so a companion spawned after its surface still fills in.
pub(crate) fn sync_cursor_status(
    mut commands: Commands,
    settings: Res<EditorSettings>,
    surfaces: Query<&EditorSurface>,
    named: Query<(Entity, &Name)>,
    mut texts: Query<&mut Text2d, Without<SurfaceText>>,
    mut warned: Local<HashSet<String>>,
) {
    let names = name_index(named.iter());

    for surface in surfaces.iter() {
        let Some(status) = surface.cursor_status() else {
            continue;
        };

        let Some(&target) = names.get(status.target()) else {
            if warned.insert(status.target().to_string()) {
                warn!("Cursor status element '{}' not found", status.target());
            }
            continue;
        };

        match texts.get_mut(target) {
            Ok(mut text) => {
                if text.0 != status.text() {
                    text.0 = status.text().to_string();
                }
            }
            Err(_) => {
                commands.entity(target).insert((
                    Text2d::new(status.text()),
                    TextColor(settings.theme.status_foreground),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{SurfaceConfig, SurfaceEvent};
    use crate::types::SelectionRange;

    fn app() -> App {
        let mut app = App::new();
        app.insert_resource(EditorSettings::default());
        app.init_resource::<FocusedSurface>();
        app.add_systems(
            Update,
            (
                attach_surfaces,
                sync_surface_text,
                sync_gutters,
                sync_cursor_status,
                detach_surfaces,
            )
                .chain(),
        );
        app
    }

    fn marker_lines(app: &mut App) -> Vec<usize> {
        let mut lines: Vec<usize> = app
            .world_mut()
            .query::<&GutterMarker>()
            .iter(app.world())
            .map(|marker| marker.line)
            .collect();
        lines.sort();
        lines
    }

    #[test]
    fn test_attach_spawns_text_and_focuses() {
        let mut app = app();
        let surface = app
            .world_mut()
            .spawn(EditorSurface::new(SurfaceConfig::default(), "hello"))
            .id();

        app.update();

        assert!(app.world().get::<EditorSurface>(surface).is_some_and(EditorSurface::is_attached));
        assert_eq!(app.world().resource::<FocusedSurface>().get(), Some(surface));

        let texts: Vec<String> = app
            .world_mut()
            .query::<(&SurfaceText, &Text2d)>()
            .iter(app.world())
            .map(|(_, text)| text.0.clone())
            .collect();
        assert_eq!(texts, vec!["hello".to_string()]);
    }

    #[test]
    fn test_gutter_markers_follow_line_count() {
        let mut app = app();
        app.world_mut().spawn((Name::new("editor-gutter-inner"), Transform::default()));
        let config = SurfaceConfig::default().with_gutter("editor-gutter-inner");
        let surface = app.world_mut().spawn(EditorSurface::new(config, "a\nb\nc")).id();

        app.update();
        // Marker spawns are applied at the end of the frame
        app.update();
        assert_eq!(marker_lines(&mut app), vec![1, 2, 3]);

        if let Some(mut editor) = app.world_mut().get_mut::<EditorSurface>(surface) {
            editor.set_text("a");
        }
        app.update();
        app.update();
        assert_eq!(marker_lines(&mut app), vec![1]);
    }

    #[test]
    fn test_remounted_surface_rebuilds_gutter() {
        let mut app = app();
        let container = app
            .world_mut()
            .spawn((Name::new("editor-gutter-inner"), Transform::default()))
            .id();
        let config = SurfaceConfig::default().with_gutter("editor-gutter-inner");

        let first = app.world_mut().spawn(EditorSurface::new(config.clone(), "a\nb\nc")).id();
        app.update();
        app.update();
        assert_eq!(marker_lines(&mut app), vec![1, 2, 3]);

        app.world_mut().entity_mut(first).despawn();
        app.world_mut().spawn(EditorSurface::new(config, "1\n2\n3\n4\n5"));
        app.update();
        app.update();
        app.update();
        assert_eq!(marker_lines(&mut app), vec![1, 2, 3, 4, 5]);
        assert_ne!(
            app.world().get::<GutterView>(container).and_then(|view| view.surface),
            Some(first)
        );
    }

    #[test]
    fn test_despawned_surface_clears_gutter() {
        let mut app = app();
        let container = app
            .world_mut()
            .spawn((Name::new("editor-gutter-inner"), Transform::default()))
            .id();
        let config = SurfaceConfig::default().with_gutter("editor-gutter-inner");
        let surface = app.world_mut().spawn(EditorSurface::new(config, "a\nb")).id();
        app.update();
        app.update();
        assert_eq!(marker_lines(&mut app), vec![1, 2]);

        app.world_mut().entity_mut(surface).despawn();
        app.update();
        app.update();
        assert!(marker_lines(&mut app).is_empty());
        assert_eq!(app.world().get::<GutterView>(container).copied(), Some(GutterView::default()));
    }

    #[test]
    fn test_gutter_follows_scroll() {
        let mut app = app();
        let container = app
            .world_mut()
            .spawn((Name::new("editor-gutter-inner"), Transform::default()))
            .id();
        let config = SurfaceConfig::default().with_gutter("editor-gutter-inner");
        let surface = app.world_mut().spawn(EditorSurface::new(config, "a\nb\nc")).id();
        app.update();

        if let Some(mut editor) = app.world_mut().get_mut::<EditorSurface>(surface) {
            editor.handle(SurfaceEvent::Scroll(24.0));
        }
        app.update();
        assert_eq!(app.world().get::<Transform>(container).map(|t| t.translation.y), Some(24.0));
    }

    #[test]
    fn test_late_cursor_status_companion_fills_in() {
        let mut app = app();
        let config = SurfaceConfig::default().with_cursor_status("cursor");
        app.world_mut().spawn(EditorSurface::new(config, "ab"));
        app.update();
        app.update();

        let status = app.world_mut().spawn((Name::new("cursor"), Text2d::default())).id();
        app.update();
        assert_eq!(app.world().get::<Text2d>(status).map(|t| t.0.clone()), Some("Ln 1, Col 1".to_string()));
    }

    #[test]
    fn test_cursor_status_companion() {
        let mut app = app();
        let status = app.world_mut().spawn((Name::new("cursor"), Text2d::default())).id();
        let config = SurfaceConfig::default().with_cursor_status("cursor");
        let surface = app.world_mut().spawn(EditorSurface::new(config, "ab\ncd")).id();

        app.update();
        assert_eq!(app.world().get::<Text2d>(status).map(|t| t.0.clone()), Some("Ln 1, Col 1".to_string()));

        if let Some(mut editor) = app.world_mut().get_mut::<EditorSurface>(surface) {
            editor.handle(SurfaceEvent::Click(SelectionRange::caret(4)));
        }
        app.update();
        assert_eq!(app.world().get::<Text2d>(status).map(|t| t.0.clone()), Some("Ln 2, Col 2".to_string()));
    }

    #[test]
    fn test_missing_companions_do_not_panic() {
        let mut app = app();
        let config = SurfaceConfig::default()
            .with_gutter("nowhere")
            .with_cursor_status("also-nowhere");
        app.world_mut().spawn(EditorSurface::new(config, "x"));

        app.update();
        app.update();
        assert!(marker_lines(&mut app).is_empty());
    }
}
