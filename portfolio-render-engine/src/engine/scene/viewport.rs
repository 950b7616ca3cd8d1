use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use constants::camera_rig::{BASE_Z, FOV_DEGREES, INITIAL_POSITION, LOOK_AHEAD};
use constants::palette::BACKGROUND;
use constants::scene::{FOG_END, FOG_START};

use crate::engine::camera::scroll_rig::ScrollCamera;

/// Spawn the single scene camera. MSAA is off; the fog matches the page
/// background so geometry dissolves into it with distance.
pub fn spawn_viewport_camera(mut commands: Commands) {
    let initial = Vec3::from_array(INITIAL_POSITION);
    commands.spawn((
        ScrollCamera,
        Name::new("ScrollCamera"),
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            ..default()
        }),
        Msaa::Off,
        DistanceFog {
            color: BACKGROUND,
            falloff: FogFalloff::Linear {
                start: FOG_START,
                end: FOG_END,
            },
            ..default()
        },
        Transform::from_translation(initial)
            .looking_at(Vec3::new(0.0, 0.0, BASE_Z - LOOK_AHEAD), Vec3::Y),
    ));
}

/// Fraction of an object's colour left after linear fog at `distance`:
/// 1 before `start`, 0 after `end`.
pub fn linear_fog_visibility(distance: f32, start: f32, end: f32) -> f32 {
    if end <= start {
        return if distance < start { 1.0 } else { 0.0 };
    }
    1.0 - ((distance - start) / (end - start)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fog_visibility_ramps_linearly() {
        assert_eq!(linear_fog_visibility(5.0, 10.0, 25.0), 1.0);
        assert_eq!(linear_fog_visibility(10.0, 10.0, 25.0), 1.0);
        assert!((linear_fog_visibility(17.5, 10.0, 25.0) - 0.5).abs() < 1e-6);
        assert_eq!(linear_fog_visibility(30.0, 10.0, 25.0), 0.0);
    }

    #[test]
    fn degenerate_fog_range_is_a_step() {
        assert_eq!(linear_fog_visibility(9.0, 10.0, 10.0), 1.0);
        assert_eq!(linear_fog_visibility(11.0, 10.0, 10.0), 0.0);
    }
}
