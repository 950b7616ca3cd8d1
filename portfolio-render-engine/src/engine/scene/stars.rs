use std::f32::consts::TAU;

use bevy::prelude::*;
use constants::scene::{
    STAR_DEPTH, STAR_FACTOR, STAR_LIGHTNESS, STAR_RADIUS, STAR_SATURATION, STAR_SPEED,
    STAR_WORLD_SCALE,
};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::polyhedron::icosahedron;
use crate::engine::assets::site_manifest::SiteManifest;

/// Stars share a handful of materials; hues are bucketed to this many.
const HUE_BUCKETS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarSettings {
    pub radius: f32,
    pub depth: f32,
    pub count: usize,
    pub factor: f32,
    pub saturation: f32,
    pub speed: f32,
}

impl Default for StarSettings {
    fn default() -> Self {
        Self {
            radius: STAR_RADIUS,
            depth: STAR_DEPTH,
            count: 0,
            factor: STAR_FACTOR,
            saturation: STAR_SATURATION,
            speed: STAR_SPEED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarSpec {
    pub position: Vec3,
    pub size: f32,
    /// Hue in degrees.
    pub hue: f32,
}

/// Lay stars out on shrinking spherical shells from `radius + depth`
/// inward, with directions uniform over the sphere.
pub fn generate_stars(settings: &StarSettings, rng: &mut impl Rng) -> Vec<StarSpec> {
    let mut shell = settings.radius + settings.depth;
    let increment = if settings.count == 0 {
        0.0
    } else {
        settings.depth / settings.count as f32
    };

    (0..settings.count)
        .map(|i| {
            shell -= increment * rng.gen_range(0.0..1.0_f32);
            let polar = (1.0 - rng.gen_range(0.0..2.0_f32)).clamp(-1.0, 1.0).acos();
            let azimuth = rng.gen_range(0.0..TAU);
            let position = Vec3::new(
                shell * polar.sin() * azimuth.sin(),
                shell * polar.cos(),
                shell * polar.sin() * azimuth.cos(),
            );
            StarSpec {
                position,
                size: (0.5 + 0.5 * rng.gen_range(0.0..1.0_f32)) * settings.factor,
                hue: i as f32 / settings.count as f32 * 360.0,
            }
        })
        .collect()
}

/// Shared scale multiplier for every star at `elapsed` seconds.
pub fn twinkle_factor(elapsed: f32, speed: f32) -> f32 {
    (3.0 + (elapsed * speed + 100.0).sin()) / 3.0
}

#[derive(Component)]
pub struct StarField {
    pub speed: f32,
}

#[derive(Component)]
pub struct Star {
    pub base_scale: f32,
}

pub fn spawn_starfield(
    manifest: Res<SiteManifest>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let settings = StarSettings {
        count: manifest.scene.star_count,
        ..default()
    };
    let mut rng = StdRng::seed_from_u64(manifest.scene.layout_seed);
    let stars = generate_stars(&settings, &mut rng);

    let mesh = meshes.add(icosahedron(1.0));
    let palette: Vec<Handle<StandardMaterial>> = (0..HUE_BUCKETS)
        .map(|bucket| {
            let hue = bucket as f32 / HUE_BUCKETS as f32 * 360.0;
            materials.add(StandardMaterial {
                base_color: Color::hsl(hue, settings.saturation, STAR_LIGHTNESS),
                unlit: true,
                fog_enabled: false,
                ..default()
            })
        })
        .collect();

    commands
        .spawn((
            StarField {
                speed: settings.speed,
            },
            Name::new("StarField"),
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|field| {
            for star in &stars {
                let bucket = ((star.hue / 360.0 * HUE_BUCKETS as f32) as usize).min(HUE_BUCKETS - 1);
                let base_scale = star.size * STAR_WORLD_SCALE;
                field.spawn((
                    Star { base_scale },
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(palette[bucket].clone()),
                    Transform::from_translation(star.position).with_scale(Vec3::splat(base_scale)),
                ));
            }
        });

    info!("Starfield spawned with {} stars", stars.len());
}

pub fn twinkle_stars(
    time: Res<Time>,
    fields: Query<&StarField>,
    mut stars: Query<(&Star, &mut Transform)>,
) {
    let Ok(field) = fields.single() else {
        return;
    };
    let factor = twinkle_factor(time.elapsed_secs(), field.speed);
    for (star, mut transform) in &mut stars {
        transform.scale = Vec3::splat(star.base_scale * factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(count: usize) -> StarSettings {
        StarSettings {
            count,
            ..default()
        }
    }

    #[test]
    fn stars_lie_within_the_shells() {
        let s = settings(2000);
        let stars = generate_stars(&s, &mut StdRng::seed_from_u64(1));
        assert_eq!(stars.len(), 2000);
        for star in &stars {
            let r = star.position.length();
            assert!(r >= s.radius - 1e-3, "{r}");
            assert!(r <= s.radius + s.depth + 1e-3, "{r}");
            assert!(star.size >= 0.5 * s.factor && star.size <= s.factor);
        }
    }

    #[test]
    fn layout_is_deterministic_per_seed() {
        let s = settings(50);
        let a = generate_stars(&s, &mut StdRng::seed_from_u64(42));
        let b = generate_stars(&s, &mut StdRng::seed_from_u64(42));
        let c = generate_stars(&s, &mut StdRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn no_stars_when_count_is_zero() {
        assert!(generate_stars(&settings(0), &mut StdRng::seed_from_u64(1)).is_empty());
    }

    #[test]
    fn twinkle_stays_between_two_and_four_thirds() {
        for i in 0..1000 {
            let f = twinkle_factor(i as f32 * 0.1, 1.0);
            assert!((2.0 / 3.0 - 1e-6..=4.0 / 3.0 + 1e-6).contains(&f));
        }
    }
}
