use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

use bevy::prelude::*;
use constants::palette::{
    ACCENT_CYAN, ACCENT_PURPLE, SCREEN_FRAME, SCREEN_PANEL, WIREFRAME_GREY,
};
use constants::scene::HERO_PARTICLE_COUNT;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::float::{Float, spawn_float};
use super::labels::spawn_world_label;
use super::lighting::accent_light;
use super::polyhedron::{icosahedron, octahedron, wireframe_edges};
use crate::engine::assets::site_manifest::SiteManifest;

/// Page sections with decorative geometry, in scroll order.
pub const SECTION_NAMES: [&str; 5] = ["Hero", "About", "Experience", "Projects", "Contact"];

#[derive(Component)]
pub struct SectionGroup {
    pub index: usize,
}

/// Meshes and materials shared by the section builders.
struct SectionAssets {
    core_mesh: Handle<Mesh>,
    core_material: Handle<StandardMaterial>,
    outer_ring: Handle<Mesh>,
    inner_ring: Handle<Mesh>,
    particle_mesh: Handle<Mesh>,
    cube_outline: Handle<Mesh>,
    sphere_outline: Handle<Mesh>,
    outline_material: Handle<StandardMaterial>,
    timeline_mesh: Handle<Mesh>,
    timeline_material: Handle<StandardMaterial>,
    marker_mesh: Handle<Mesh>,
    marker_material: Handle<StandardMaterial>,
    screen_frame_mesh: Handle<Mesh>,
    screen_frame_material: Handle<StandardMaterial>,
    screen_panel_mesh: Handle<Mesh>,
    screen_panel_material: Handle<StandardMaterial>,
    beacon_outline: Handle<Mesh>,
    cyan_flat: Handle<StandardMaterial>,
    purple_flat: Handle<StandardMaterial>,
}

fn flat(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    }
}

fn outline(meshes: &mut Assets<Mesh>, solid: Mesh) -> Handle<Mesh> {
    // Primitive meshes always carry positions
    meshes.add(wireframe_edges(&solid).unwrap_or(solid))
}

impl SectionAssets {
    fn new(meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) -> Self {
        Self {
            core_mesh: meshes.add(icosahedron(1.5)),
            core_material: materials.add(StandardMaterial {
                base_color: ACCENT_PURPLE,
                perceptual_roughness: 0.2,
                metallic: 0.8,
                ..default()
            }),
            outer_ring: meshes.add(Torus {
                minor_radius: 0.05,
                major_radius: 2.8,
            }),
            inner_ring: meshes.add(Torus {
                minor_radius: 0.05,
                major_radius: 2.5,
            }),
            particle_mesh: meshes.add(Sphere::new(0.05).mesh().uv(8, 8)),
            cube_outline: outline(meshes, Cuboid::new(1.0, 1.0, 1.0).into()),
            sphere_outline: outline(meshes, Sphere::new(0.8).mesh().uv(16, 16)),
            outline_material: materials.add(flat(WIREFRAME_GREY)),
            timeline_mesh: meshes.add(Cylinder::new(0.1, 20.0)),
            timeline_material: materials.add(StandardMaterial {
                base_color: ACCENT_CYAN,
                emissive: LinearRgba::from(ACCENT_CYAN) * 0.5,
                ..default()
            }),
            marker_mesh: meshes.add(Cuboid::new(0.5, 0.5, 0.5)),
            marker_material: materials.add(StandardMaterial::from_color(ACCENT_PURPLE)),
            screen_frame_mesh: meshes.add(Cuboid::new(3.0, 2.0, 0.2)),
            screen_frame_material: materials.add(StandardMaterial::from_color(SCREEN_FRAME)),
            screen_panel_mesh: meshes.add(Cuboid::new(2.8, 1.8, 0.05)),
            screen_panel_material: materials.add(flat(SCREEN_PANEL)),
            beacon_outline: outline(meshes, octahedron(1.0)),
            cyan_flat: materials.add(flat(ACCENT_CYAN)),
            purple_flat: materials.add(flat(ACCENT_PURPLE)),
        }
    }
}

/// Text pinned above a piece of section geometry.
struct LabelAnchor {
    entity: Entity,
    text: &'static str,
    color: Color,
}

/// Tori in Bevy lie flat in XZ; rotating about X by `angle` matches a ring
/// that starts facing the camera.
fn ring_rotation(angle: f32) -> Quat {
    Quat::from_rotation_x(angle + FRAC_PI_2)
}

fn hero_island(parent: &mut ChildSpawnerCommands, assets: &SectionAssets, rng: &mut StdRng) {
    spawn_float(
        parent,
        "HeroCore",
        Vec3::ZERO,
        Float::new(2.0, 0.5, 0.5).with_random_phase(rng),
        |group| {
            group.spawn((
                Mesh3d(assets.core_mesh.clone()),
                MeshMaterial3d(assets.core_material.clone()),
            ));
        },
    );

    spawn_float(
        parent,
        "HeroRings",
        Vec3::ZERO,
        Float::new(4.0, 1.0, 2.0).with_random_phase(rng),
        |group| {
            group.spawn((
                Mesh3d(assets.outer_ring.clone()),
                MeshMaterial3d(assets.cyan_flat.clone()),
                Transform::from_rotation(ring_rotation(FRAC_PI_2)),
            ));
            group.spawn((
                Mesh3d(assets.inner_ring.clone()),
                MeshMaterial3d(assets.purple_flat.clone()),
                Transform::from_rotation(ring_rotation(FRAC_PI_3)),
            ));
        },
    );

    for _ in 0..HERO_PARTICLE_COUNT {
        let position = Vec3::new(
            rng.gen_range(-0.5..0.5) * 10.0,
            rng.gen_range(-0.5..0.5) * 10.0,
            rng.gen_range(-0.5..0.5) * 5.0,
        );
        let material = if rng.gen_bool(0.5) {
            assets.cyan_flat.clone()
        } else {
            assets.purple_flat.clone()
        };
        spawn_float(
            parent,
            "HeroParticle",
            position,
            Float::new(2.0, 1.0, 4.0).with_random_phase(rng),
            |group| {
                group.spawn((Mesh3d(assets.particle_mesh.clone()), MeshMaterial3d(material)));
            },
        );
    }
}

fn about_assets(
    parent: &mut ChildSpawnerCommands,
    assets: &SectionAssets,
    rng: &mut StdRng,
    anchors: &mut Vec<LabelAnchor>,
) {
    spawn_float(
        parent,
        "AboutCloud",
        Vec3::ZERO,
        Float::new(1.5, 0.5, 1.0).with_random_phase(rng),
        |group| {
            let pieces = [
                (Vec3::new(3.0, 0.0, 0.0), &assets.cube_outline, "CREATIVITY", ACCENT_PURPLE),
                (Vec3::new(-3.0, 1.0, 1.0), &assets.sphere_outline, "LOGIC", ACCENT_CYAN),
            ];
            for (position, mesh, text, color) in pieces {
                group
                    .spawn((Transform::from_translation(position), Visibility::default()))
                    .with_children(|piece| {
                        piece.spawn((
                            Mesh3d(mesh.clone()),
                            MeshMaterial3d(assets.outline_material.clone()),
                        ));
                        let entity = piece
                            .spawn((Transform::from_xyz(0.0, 1.5, 0.0), Visibility::default()))
                            .id();
                        anchors.push(LabelAnchor {
                            entity,
                            text,
                            color,
                        });
                    });
            }
        },
    );
}

fn experience_assets(parent: &mut ChildSpawnerCommands, assets: &SectionAssets, rng: &mut StdRng) {
    parent.spawn((
        Name::new("Timeline"),
        Mesh3d(assets.timeline_mesh.clone()),
        MeshMaterial3d(assets.timeline_material.clone()),
        Transform::from_xyz(-4.0, 0.0, 0.0).with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
    ));

    for i in 0..3 {
        spawn_float(
            parent,
            "TimelineMarker",
            Vec3::new(-4.0, (i as f32 - 1.0) * 3.0, 0.0),
            Float::new(1.0, 1.0, 0.5).with_random_phase(rng),
            |group| {
                group.spawn((
                    Mesh3d(assets.marker_mesh.clone()),
                    MeshMaterial3d(assets.marker_material.clone()),
                    Transform::from_rotation(Quat::from_rotation_y(FRAC_PI_4)),
                ));
            },
        );
    }
}

fn projects_assets(parent: &mut ChildSpawnerCommands, assets: &SectionAssets, rng: &mut StdRng) {
    for (position, speed) in [(Vec3::new(-3.0, 2.0, 0.0), 2.0), (Vec3::new(3.0, -1.0, 1.0), 2.5)] {
        spawn_float(
            parent,
            "ProjectScreen",
            position,
            Float::new(speed, 0.2, 0.5).with_random_phase(rng),
            |group| {
                group.spawn((
                    Mesh3d(assets.screen_frame_mesh.clone()),
                    MeshMaterial3d(assets.screen_frame_material.clone()),
                ));
                group.spawn((
                    Mesh3d(assets.screen_panel_mesh.clone()),
                    MeshMaterial3d(assets.screen_panel_material.clone()),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
            },
        );
    }
}

fn contact_assets(parent: &mut ChildSpawnerCommands, assets: &SectionAssets, rng: &mut StdRng) {
    spawn_float(
        parent,
        "ContactBeacon",
        Vec3::ZERO,
        Float::new(3.0, 1.0, 1.0).with_random_phase(rng),
        |group| {
            group.spawn((
                Mesh3d(assets.beacon_outline.clone()),
                MeshMaterial3d(assets.cyan_flat.clone()),
            ));
        },
    );
    parent.spawn((Name::new("ContactLight"), accent_light(ACCENT_CYAN)));
}

/// Spawn the decorative group of every page section at its depth along the
/// travel axis. Random placement is seeded from the manifest so the layout
/// is stable between visits.
pub fn spawn_sections(
    manifest: Res<SiteManifest>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let scene = &manifest.scene;
    let assets = SectionAssets::new(&mut meshes, &mut materials);
    // Separate stream from the starfield, which uses the seed directly
    let mut rng = StdRng::seed_from_u64(scene.layout_seed.wrapping_add(1));
    let mut anchors = Vec::new();

    for (index, name) in SECTION_NAMES.iter().enumerate() {
        commands
            .spawn((
                SectionGroup { index },
                Name::new(*name),
                Transform::from_xyz(0.0, 0.0, scene.section_z(index)),
                Visibility::default(),
            ))
            .with_children(|section| match index {
                0 => hero_island(section, &assets, &mut rng),
                1 => about_assets(section, &assets, &mut rng, &mut anchors),
                2 => experience_assets(section, &assets, &mut rng),
                3 => projects_assets(section, &assets, &mut rng),
                _ => contact_assets(section, &assets, &mut rng),
            });
    }

    for anchor in &anchors {
        spawn_world_label(&mut commands, anchor.entity, anchor.text, anchor.color);
    }

    info!(
        "Spawned {} section groups {} units apart with {} labels",
        SECTION_NAMES.len(),
        scene.section_distance,
        anchors.len()
    );
}
