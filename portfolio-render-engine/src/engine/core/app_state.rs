use bevy::prelude::*;

use crate::rpc::web_rpc::WebRpcInterface;

/// Loading gate for the scene. The manifest load is one-shot: there is no
/// transition out of `Failed`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Ready,
    Failed,
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Loading => "loading",
            AppState::Ready => "ready",
            AppState::Failed => "failed",
        }
    }
}

/// Reason the loading gate ended in `Failed`, shown in place of the scene.
#[derive(Resource, Debug, Clone, Default)]
pub struct LoadFailure {
    pub message: String,
}

/// Announce every gate state to the host page, including the initial one.
pub fn notify_loading_state(
    state: Res<State<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    info!("→ Scene state: {}", state.get().as_str());
    rpc_interface.send_notification(
        "loading_state",
        serde_json::json!({
            "state": state.get().as_str()
        }),
    );
}

/// Native-only on-screen frame rate readout.
#[derive(Component)]
pub struct FpsText;
