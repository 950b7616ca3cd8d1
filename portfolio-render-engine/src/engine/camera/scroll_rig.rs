use bevy::prelude::*;
use constants::camera_rig::{
    BASE_Z, EASE_RESPONSIVENESS, INITIAL_POSITION, LOOK_AHEAD, PARALLAX_STRENGTH,
    SECTION_DISTANCE,
};
use constants::scroll::PAGES;

use crate::engine::input::pointer::PointerState;
use crate::engine::input::scroll::ScrollControls;

/// Marker for the camera driven by the rig.
#[derive(Component)]
pub struct ScrollCamera;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigSettings {
    pub base_z: f32,
    pub section_distance: f32,
    pub pages: usize,
    pub responsiveness: f32,
    pub parallax_strength: f32,
    pub look_ahead: f32,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            base_z: BASE_Z,
            section_distance: SECTION_DISTANCE,
            pages: PAGES,
            responsiveness: EASE_RESPONSIVENESS,
            parallax_strength: PARALLAX_STRENGTH,
            look_ahead: LOOK_AHEAD,
        }
    }
}

impl RigSettings {
    /// Camera depth for a scroll offset.
    ///
    /// The offset is not clamped: values outside `[0, 1]` extrapolate
    /// linearly. Keeping it in range is the scroll controller's job.
    pub fn target_z(&self, offset: f32) -> f32 {
        let travel = self.section_distance * self.pages.saturating_sub(1) as f32;
        self.base_z - offset * travel
    }

    /// Parallax target for a pointer in normalised device coordinates.
    /// Moves against the pointer and never exceeds `parallax_strength`.
    pub fn parallax_target(&self, pointer: Vec2) -> Vec2 {
        -pointer.clamp(Vec2::NEG_ONE, Vec2::ONE) * self.parallax_strength
    }
}

/// Live camera transform owned by the rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigState {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl RigState {
    pub fn initial(settings: &RigSettings) -> Self {
        Self {
            position: Vec3::from_array(INITIAL_POSITION),
            look_at: Vec3::new(0.0, 0.0, settings.target_z(0.0) - settings.look_ahead),
        }
    }
}

/// Per-frame inputs sampled from the scroll controller and pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RigInput {
    pub offset: f32,
    pub pointer: Vec2,
}

/// Exponential smoothing of `current` toward `target`.
///
/// The step factor `responsiveness * dt` is capped at 1 so that a long
/// frame lands on the target instead of overshooting it.
pub fn ease_toward(current: f32, target: f32, responsiveness: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let factor = (responsiveness * dt).min(1.0);
    current + (target - current) * factor
}

/// Compute the next rig state. Pure: the only side effect of the rig is the
/// system below writing the result to the camera transform.
pub fn step(settings: &RigSettings, state: &RigState, dt: f32, input: RigInput) -> RigState {
    let target_z = settings.target_z(input.offset);
    let parallax = settings.parallax_target(input.pointer);
    let k = settings.responsiveness;

    let position = Vec3::new(
        ease_toward(state.position.x, parallax.x, k, dt),
        ease_toward(state.position.y, parallax.y, k, dt),
        ease_toward(state.position.z, target_z, k, dt),
    );

    // Look ahead of the target rather than the eased position so the view
    // direction leads smoothly.
    let look_at = Vec3::new(0.0, 0.0, target_z - settings.look_ahead);

    RigState { position, look_at }
}

#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    pub settings: RigSettings,
    pub state: RigState,
}

impl CameraRig {
    pub fn new(settings: RigSettings) -> Self {
        Self {
            state: RigState::initial(&settings),
            settings,
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(RigSettings::default())
    }
}

pub fn camera_rig_system(
    time: Res<Time>,
    scroll: Res<ScrollControls>,
    pointer: Res<PointerState>,
    mut rig: ResMut<CameraRig>,
    mut camera_query: Query<&mut Transform, With<ScrollCamera>>,
) {
    let input = RigInput {
        offset: scroll.offset(),
        pointer: pointer.ndc,
    };
    let next = step(&rig.settings, &rig.state, time.delta_secs(), input);
    rig.state = next;

    if let Ok(mut camera_transform) = camera_query.single_mut() {
        camera_transform.translation = next.position;
        camera_transform.look_at(next.look_at, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn settings() -> RigSettings {
        RigSettings::default()
    }

    #[test]
    fn target_z_scenarios() {
        let s = settings();
        assert!((s.target_z(0.0) - s.base_z).abs() < EPS);
        assert!((s.target_z(1.0) - (s.base_z - 80.0)).abs() < EPS);
    }

    #[test]
    fn target_z_is_strictly_decreasing_and_affine() {
        let s = settings();
        let slope = s.target_z(1.0) - s.target_z(0.0);
        let mut previous = s.target_z(0.0);
        for i in 1..=100 {
            let offset = i as f32 / 100.0;
            let z = s.target_z(offset);
            assert!(z < previous);
            assert!((z - (s.target_z(0.0) + slope * offset)).abs() < EPS);
            previous = z;
        }
    }

    #[test]
    fn out_of_range_offset_extrapolates() {
        let s = settings();
        assert!((s.target_z(-0.5) - (s.base_z + 40.0)).abs() < EPS);
        assert!((s.target_z(1.5) - (s.base_z - 120.0)).abs() < EPS);
    }

    #[test]
    fn zero_dt_leaves_position_unchanged() {
        let s = settings();
        let state = RigState {
            position: Vec3::new(0.3, -0.7, 12.0),
            look_at: Vec3::ZERO,
        };
        let input = RigInput {
            offset: 0.6,
            pointer: Vec2::new(0.9, -0.4),
        };
        let next = step(&s, &state, 0.0, input);
        assert_eq!(next.position, state.position);
    }

    #[test]
    fn repeated_zero_dt_steps_are_idempotent() {
        let s = settings();
        let input = RigInput {
            offset: 0.25,
            pointer: Vec2::new(-0.2, 0.5),
        };
        let first = step(&s, &RigState::initial(&s), 0.0, input);
        let second = step(&s, &first, 0.0, input);
        let third = step(&s, &second, 0.0, input);
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn converges_to_target_over_many_frames() {
        let s = settings();
        let input = RigInput {
            offset: 0.75,
            pointer: Vec2::new(0.5, 0.5),
        };
        let mut state = RigState::initial(&s);
        for _ in 0..2000 {
            state = step(&s, &state, 1.0 / 60.0, input);
        }
        assert!((state.position.z - s.target_z(0.75)).abs() < EPS);
        assert!((state.position.x - -1.0).abs() < EPS);
        assert!((state.position.y - -1.0).abs() < EPS);
    }

    #[test]
    fn huge_dt_lands_on_target() {
        let s = settings();
        let input = RigInput {
            offset: 1.0,
            pointer: Vec2::ZERO,
        };
        let next = step(&s, &RigState::initial(&s), 1.0e6, input);
        assert_eq!(next.position.z, s.target_z(1.0));
    }

    #[test]
    fn easing_never_jumps_past_target() {
        let s = settings();
        let input = RigInput {
            offset: 1.0,
            pointer: Vec2::ZERO,
        };
        let mut state = RigState::initial(&s);
        let target = s.target_z(1.0);
        let mut previous = state.position.z;
        for _ in 0..200 {
            state = step(&s, &state, 1.0 / 30.0, input);
            assert!(state.position.z <= previous);
            assert!(state.position.z >= target);
            previous = state.position.z;
        }
    }

    #[test]
    fn monotonic_offset_gives_monotonic_displacement() {
        let s = settings();
        let mut state = RigState::initial(&s);
        state.position.z = s.target_z(0.0);
        let mut previous = state.position.z;
        for i in 0..=120 {
            let input = RigInput {
                offset: i as f32 / 120.0,
                pointer: Vec2::ZERO,
            };
            state = step(&s, &state, 1.0 / 60.0, input);
            assert!(state.position.z <= previous);
            previous = state.position.z;
        }
    }

    #[test]
    fn parallax_is_bounded_by_strength() {
        let s = settings();
        let p = s.parallax_target(Vec2::new(5.0, -5.0));
        assert!(p.x.abs() <= s.parallax_strength + EPS);
        assert!(p.y.abs() <= s.parallax_strength + EPS);
        assert_eq!(s.parallax_target(Vec2::new(1.0, 1.0)), Vec2::new(-2.0, -2.0));
    }

    #[test]
    fn look_at_leads_the_target_not_the_live_position() {
        let s = settings();
        let input = RigInput {
            offset: 0.5,
            pointer: Vec2::ZERO,
        };
        let next = step(&s, &RigState::initial(&s), 1.0 / 60.0, input);
        assert_eq!(next.look_at, Vec3::new(0.0, 0.0, s.target_z(0.5) - s.look_ahead));
        assert!(next.position.z > s.target_z(0.5));
    }
}
