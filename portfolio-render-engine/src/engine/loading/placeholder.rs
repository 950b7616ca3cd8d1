use bevy::prelude::*;
use constants::palette::{ACCENT_CYAN, TEXT_MUTED};

use crate::engine::core::app_state::LoadFailure;

#[derive(Component)]
pub struct LoadingPlaceholder;

#[derive(Component)]
pub struct PlaceholderText;

pub fn spawn_placeholder(mut commands: Commands) {
    commands
        .spawn((
            LoadingPlaceholder,
            Name::new("LoadingPlaceholder"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                PlaceholderText,
                Text::new("Loading..."),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TEXT_MUTED),
            ));
        });
}

pub fn despawn_placeholder(
    mut commands: Commands,
    placeholders: Query<Entity, With<LoadingPlaceholder>>,
) {
    for entity in &placeholders {
        commands.entity(entity).despawn();
    }
}

/// Keeps the placeholder on screen with the failure reason. No retry.
pub fn show_load_failure(
    failure: Option<Res<LoadFailure>>,
    mut texts: Query<(&mut Text, &mut TextColor), With<PlaceholderText>>,
) {
    let message = failure
        .map(|failure| failure.message.clone())
        .unwrap_or_else(|| "unknown error".to_string());
    for (mut text, mut colour) in &mut texts {
        text.0 = format!("The scene could not be loaded: {message}");
        colour.0 = ACCENT_CYAN;
    }
}
