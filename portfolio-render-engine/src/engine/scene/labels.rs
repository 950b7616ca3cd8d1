use bevy::prelude::*;
use bevy::transform::helper::TransformHelper;
use bevy::ui::TextShadow;
use constants::scene::{FOG_END, FOG_START, LABEL_FONT_SIZE};

use super::viewport::linear_fog_visibility;
use crate::engine::camera::scroll_rig::ScrollCamera;

/// Layout width of a label box; text is centred on the anchor within it.
const LABEL_BOX_WIDTH: f32 = 400.0;

/// Labels smaller than this are hidden rather than rendered as specks.
const MIN_LABEL_PX: f32 = 1.0;

/// UI text that tracks a 3D anchor entity, sized as if it had
/// `world_size` units of height at the anchor's depth.
#[derive(Component)]
pub struct WorldLabel {
    pub anchor: Entity,
    pub world_size: f32,
}

/// Pixel height of something `world_size` tall at view `depth` under a
/// perspective camera.
pub fn world_to_pixel_size(world_size: f32, viewport_height: f32, fov_y: f32, depth: f32) -> f32 {
    if depth <= 0.0 {
        return 0.0;
    }
    world_size * viewport_height / (2.0 * (fov_y / 2.0).tan() * depth)
}

pub fn spawn_world_label(commands: &mut Commands, anchor: Entity, text: &str, color: Color) {
    commands.spawn((
        WorldLabel {
            anchor,
            world_size: LABEL_FONT_SIZE,
        },
        Name::new(format!("Label {text}")),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(LABEL_BOX_WIDTH),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Text::new(text),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(color),
        TextLayout::new_with_justify(JustifyText::Center),
        TextShadow {
            offset: Vec2::splat(1.0),
            color: Color::BLACK,
        },
        // Behind the overlay panels
        GlobalZIndex(-1),
        Visibility::Hidden,
    ));
}

/// World transform of `entity` from this frame's local transforms, without
/// waiting for transform propagation.
pub fn current_global_transform(
    helper: &TransformHelper,
    entity: Entity,
) -> Option<GlobalTransform> {
    helper.compute_global_transform(entity).ok()
}

/// Runs in `PostUpdate` ahead of UI layout, so labels land on the same
/// frame as the meshes they annotate.
pub fn project_world_labels(
    cameras: Query<(Entity, &Camera, &Projection), With<ScrollCamera>>,
    transforms: TransformHelper,
    mut labels: Query<(
        &WorldLabel,
        &mut Node,
        &mut TextFont,
        &mut TextColor,
        &mut Visibility,
    )>,
) {
    let Ok((camera_entity, camera, projection)) = cameras.single() else {
        return;
    };
    let Some(camera_transform) = current_global_transform(&transforms, camera_entity) else {
        return;
    };
    let Projection::Perspective(perspective) = projection else {
        return;
    };
    let Some(viewport) = camera.logical_viewport_size() else {
        return;
    };
    let world_to_view = camera_transform.affine().inverse();

    for (label, mut node, mut font, mut color, mut visibility) in &mut labels {
        let Some(anchor) = current_global_transform(&transforms, label.anchor) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        let world = anchor.translation();
        let depth = -world_to_view.transform_point3(world).z;
        let size = world_to_pixel_size(label.world_size, viewport.y, perspective.fov, depth);

        let screen = match camera.world_to_viewport(&camera_transform, world) {
            Ok(screen) if depth > perspective.near && size >= MIN_LABEL_PX => screen,
            _ => {
                *visibility = Visibility::Hidden;
                continue;
            }
        };

        node.left = Val::Px(screen.x - LABEL_BOX_WIDTH / 2.0);
        node.top = Val::Px(screen.y - size / 2.0);
        if (font.font_size - size).abs() > 0.1 {
            font.font_size = size;
        }
        color.0 = color.0.with_alpha(linear_fog_visibility(depth, FOG_START, FOG_END));
        *visibility = Visibility::Inherited;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_size_halves_with_double_depth() {
        let fov = 30.0_f32.to_radians();
        let near = world_to_pixel_size(0.5, 1000.0, fov, 10.0);
        let far = world_to_pixel_size(0.5, 1000.0, fov, 20.0);
        assert!((near - 2.0 * far).abs() < 1e-3);
    }

    #[test]
    fn full_frustum_height_fills_viewport() {
        let fov = 60.0_f32.to_radians();
        let depth = 7.0;
        let frustum_height = 2.0 * (fov / 2.0).tan() * depth;
        let px = world_to_pixel_size(frustum_height, 720.0, fov, depth);
        assert!((px - 720.0).abs() < 1e-3);
    }

    #[test]
    fn behind_camera_has_no_size() {
        assert_eq!(world_to_pixel_size(0.5, 800.0, 1.0, 0.0), 0.0);
        assert_eq!(world_to_pixel_size(0.5, 800.0, 1.0, -3.0), 0.0);
    }

    #[derive(Resource, Default)]
    struct Resolved(Option<Vec3>);

    #[test]
    fn anchor_position_reflects_this_frames_parent_move() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Resolved>();

        let group = app
            .world_mut()
            .spawn(Transform::from_xyz(0.0, 0.0, -20.0))
            .id();
        let anchor = app
            .world_mut()
            .spawn((Transform::from_xyz(3.0, 1.5, 0.0), ChildOf(group)))
            .id();

        app.add_systems(
            Update,
            move |helper: TransformHelper, mut resolved: ResMut<Resolved>| {
                resolved.0 = current_global_transform(&helper, anchor).map(|t| t.translation());
            },
        );

        app.world_mut().get_mut::<Transform>(group).unwrap().translation.z = -40.0;
        app.update();

        // No propagation has run, yet the anchor follows its parent
        assert_eq!(
            app.world().resource::<Resolved>().0,
            Some(Vec3::new(3.0, 1.5, -40.0))
        );
    }
}
