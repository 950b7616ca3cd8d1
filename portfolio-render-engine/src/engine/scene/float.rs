use bevy::prelude::*;
use rand::Rng;

/// Bob-and-sway animation. Lives on an inner entity whose transform is fully
/// owned by [`animate_floats`]; place the group with an outer parent.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Float {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    /// Time offset so groups with equal settings do not move in lockstep.
    pub phase: f32,
}

impl Float {
    pub fn new(speed: f32, rotation_intensity: f32, float_intensity: f32) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
            phase: 0.0,
        }
    }

    pub fn with_random_phase(mut self, rng: &mut impl Rng) -> Self {
        self.phase = rng.gen_range(0.0..10_000.0);
        self
    }

    pub fn pose(&self, elapsed: f32) -> FloatPose {
        let angle = (elapsed + self.phase) / 4.0 * self.speed;
        let (sin, cos) = angle.sin_cos();
        FloatPose {
            rotation: Quat::from_euler(
                EulerRot::XYZ,
                cos / 8.0 * self.rotation_intensity,
                sin / 8.0 * self.rotation_intensity,
                sin / 20.0 * self.rotation_intensity,
            ),
            // Vertical range is ±0.1 before intensity.
            lift: sin / 10.0 * self.float_intensity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatPose {
    pub rotation: Quat,
    pub lift: f32,
}

/// Spawn an outer group at `position` with an animated inner [`Float`]
/// entity, and build the floating content under the inner entity.
pub fn spawn_float(
    parent: &mut ChildSpawnerCommands,
    name: &'static str,
    position: Vec3,
    float: Float,
    content: impl FnOnce(&mut ChildSpawnerCommands),
) {
    parent
        .spawn((
            Name::new(name),
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .with_children(|outer| {
            outer
                .spawn((float, Transform::default(), Visibility::default()))
                .with_children(content);
        });
}

pub fn animate_floats(time: Res<Time>, mut floats: Query<(&Float, &mut Transform)>) {
    let elapsed = time.elapsed_secs();
    for (float, mut transform) in &mut floats {
        let pose = float.pose(elapsed);
        transform.rotation = pose.rotation;
        transform.translation.y = pose.lift;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn lift_stays_within_range() {
        let float = Float::new(2.0, 1.0, 4.0);
        for i in 0..500 {
            let pose = float.pose(i as f32 * 0.37);
            assert!(pose.lift.abs() <= 0.4 + 1e-6);
        }
    }

    #[test]
    fn zero_intensity_is_still() {
        let float = Float::new(3.0, 0.0, 0.0);
        let pose = float.pose(12.5);
        assert_eq!(pose.lift, 0.0);
        assert!(pose.rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn pose_at_time_zero() {
        let float = Float::new(1.0, 1.0, 1.0);
        let pose = float.pose(0.0);
        assert_eq!(pose.lift, 0.0);
        let expected = Quat::from_euler(EulerRot::XYZ, 1.0 / 8.0, 0.0, 0.0);
        assert!(pose.rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn phase_shifts_time() {
        let mut rng = StdRng::seed_from_u64(7);
        let shifted = Float::new(2.0, 0.5, 0.5).with_random_phase(&mut rng);
        let base = Float {
            phase: 0.0,
            ..shifted
        };
        assert_eq!(shifted.pose(1.0), base.pose(1.0 + shifted.phase));
    }
}
