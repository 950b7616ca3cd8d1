use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use constants::render_settings::FPS_NOTIFY_INTERVAL_SECS;

use crate::engine::core::app_state::FpsText;
use crate::rpc::web_rpc::WebRpcInterface;

/// Smoothed frame rate, once one has been measured.
pub fn measured_fps(diagnostics: &DiagnosticsStore) -> Option<f32> {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .map(|value| value as f32)
}

/// Smoothed frame rate, or 0 before the first measurement.
pub fn smoothed_fps(diagnostics: &DiagnosticsStore) -> f32 {
    measured_fps(diagnostics).unwrap_or(0.0)
}

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    if current_time - *last_send_time >= FPS_NOTIFY_INTERVAL_SECS {
        if let Some(value) = measured_fps(&diagnostics) {
            rpc_interface.send_notification(
                "fps_update",
                serde_json::json!({
                    "fps": value
                }),
            );
            *last_send_time = current_time;
        }
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(value) = measured_fps(&diagnostics) {
            text.0 = format!("FPS: {value:.1}");
        }
    }
}

/// Bottom-right frame rate readout for native builds.
pub fn spawn_fps_text(mut commands: Commands) {
    commands.spawn((
        Text::new("FPS: "),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(1., 0., 0.)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
        GlobalZIndex(10),
        FpsText,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_defaults_to_zero_without_measurements() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, FrameTimeDiagnosticsPlugin::default()));
        let diagnostics = app.world().resource::<DiagnosticsStore>();
        assert_eq!(smoothed_fps(diagnostics), 0.0);
        assert_eq!(measured_fps(diagnostics), None);
    }
}
