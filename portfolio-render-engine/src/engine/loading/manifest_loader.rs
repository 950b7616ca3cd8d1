use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::site_manifest::SiteManifest;
use crate::engine::camera::scroll_rig::CameraRig;
use crate::engine::core::app_state::{AppState, LoadFailure};
use crate::engine::input::scroll::ScrollControls;

pub const MANIFEST_PATH: &str = "portfolio.json";

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SiteManifest>>,
}

/// Result of inspecting the manifest handle for one frame.
#[derive(Debug)]
pub enum LoadOutcome {
    Pending,
    Ready(SiteManifest),
    Failed(String),
}

/// Decide what the gate should do given the asset server's view of the
/// manifest. `load_error` carries the loader's message for failed loads.
pub fn resolve_manifest(
    loaded: bool,
    load_error: Option<String>,
    manifest: Option<&SiteManifest>,
) -> LoadOutcome {
    if let Some(message) = load_error {
        return LoadOutcome::Failed(message);
    }
    if !loaded {
        return LoadOutcome::Pending;
    }
    let Some(manifest) = manifest else {
        return LoadOutcome::Pending;
    };
    match manifest.validate() {
        Ok(()) => LoadOutcome::Ready(manifest.clone()),
        Err(err) => LoadOutcome::Failed(format!("invalid {MANIFEST_PATH}: {err}")),
    }
}

pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading site manifest from {MANIFEST_PATH}");
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

pub fn poll_manifest_system(
    manifest_loader: Res<ManifestLoader>,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<SiteManifest>>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    let (loaded, load_error) = match asset_server.get_load_state(handle) {
        Some(LoadState::Loaded) => (true, None),
        Some(LoadState::Failed(err)) => (false, Some(err.to_string())),
        _ => (false, None),
    };

    match resolve_manifest(loaded, load_error, manifests.get(handle)) {
        LoadOutcome::Pending => {}
        LoadOutcome::Ready(manifest) => {
            info!("✓ Site manifest loaded");
            commands.insert_resource(manifest);
            next_state.set(AppState::Ready);
        }
        LoadOutcome::Failed(message) => {
            error!("Site manifest failed to load: {message}");
            commands.insert_resource(LoadFailure { message });
            next_state.set(AppState::Failed);
        }
    }
}

/// Apply the manifest's scroll and camera tuning before the scene starts.
pub fn configure_from_manifest(manifest: Res<SiteManifest>, mut commands: Commands) {
    let scene = &manifest.scene;
    commands.insert_resource(ScrollControls::new(scene.pages, scene.damping));
    commands.insert_resource(CameraRig::new(scene.rig_settings()));
}
