use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use constants::camera_rig::{CURSOR_LIGHT_Z, FOV_DEGREES, INITIAL_POSITION};
use constants::palette::ACCENT_PURPLE;
use constants::scene::{
    ACCENT_LIGHT_INTENSITY, ACCENT_LIGHT_RANGE, AMBIENT_BRIGHTNESS_SCALE, AMBIENT_INTENSITY,
    KEY_LIGHT_INTENSITY, KEY_LIGHT_POSITION, LIGHT_INTENSITY_SCALE,
};

use crate::engine::input::pointer::PointerState;

/// Point light that follows the pointer across the visible frustum.
#[derive(Component)]
pub struct CursorLight;

/// World-space size of the view frustum the cursor light spans. Measured
/// at the camera's starting distance and only refreshed on window resize,
/// so camera travel does not stretch the light's reach.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CursorViewport(pub Vec2);

impl CursorViewport {
    pub fn for_window(width: f32, height: f32) -> Self {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let distance = Vec3::from_array(INITIAL_POSITION).length();
        Self(frustum_size_at(FOV_DEGREES.to_radians(), aspect, distance))
    }
}

impl Default for CursorViewport {
    fn default() -> Self {
        Self::for_window(16.0, 9.0)
    }
}

/// Lumens for a relative point light intensity.
pub fn light_lumens(relative: f32) -> f32 {
    relative * LIGHT_INTENSITY_SCALE
}

/// An accent point light with the shared range and intensity.
pub fn accent_light(color: Color) -> PointLight {
    PointLight {
        color,
        intensity: light_lumens(ACCENT_LIGHT_INTENSITY),
        range: ACCENT_LIGHT_RANGE,
        shadows_enabled: false,
        ..default()
    }
}

/// World-space width and height of the view frustum at `distance`.
pub fn frustum_size_at(fov_y: f32, aspect: f32, distance: f32) -> Vec2 {
    let height = 2.0 * (fov_y / 2.0).tan() * distance;
    Vec2::new(height * aspect, height)
}

/// Cursor light placement. Depends only on its arguments: unlike the
/// camera there is no easing, so no state carries over between frames.
pub fn cursor_light_position(pointer: Vec2, viewport: Vec2) -> Vec3 {
    Vec3::new(
        pointer.x * viewport.x / 2.0,
        pointer.y * viewport.y / 2.0,
        CURSOR_LIGHT_Z,
    )
}

pub fn spawn_lighting(mut commands: Commands, windows: Query<&Window, With<PrimaryWindow>>) {
    let viewport = windows
        .single()
        .map(|window| CursorViewport::for_window(window.width(), window.height()))
        .unwrap_or_default();
    commands.insert_resource(viewport);

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_INTENSITY * AMBIENT_BRIGHTNESS_SCALE,
        ..default()
    });

    commands.spawn((
        Name::new("KeyLight"),
        PointLight {
            color: Color::WHITE,
            intensity: light_lumens(KEY_LIGHT_INTENSITY),
            range: 40.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(KEY_LIGHT_POSITION)),
    ));

    commands.spawn((
        CursorLight,
        Name::new("CursorLight"),
        accent_light(ACCENT_PURPLE),
        Transform::from_xyz(0.0, 0.0, CURSOR_LIGHT_Z),
    ));
}

pub fn track_cursor_light(
    pointer: Res<PointerState>,
    mut resized: EventReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<CursorViewport>,
    mut lights: Query<&mut Transform, With<CursorLight>>,
) {
    if resized.read().last().is_some() {
        if let Ok(window) = windows.single() {
            let next = CursorViewport::for_window(window.width(), window.height());
            if *viewport != next {
                *viewport = next;
            }
        }
    }

    let position = cursor_light_position(pointer.ndc, viewport.0);
    for mut light_transform in &mut lights {
        light_transform.translation = position;
    }
}
