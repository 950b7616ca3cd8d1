// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::render::camera::CameraUpdateSystem;
use bevy::ui::UiSystem;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::palette::BACKGROUND;

// Crate engine modules
use crate::engine::assets::site_manifest::SiteManifest;
use crate::engine::camera::scroll_rig::{CameraRig, camera_rig_system};
use crate::engine::core::app_state::{AppState, notify_loading_state};
use crate::engine::core::window_config::create_window_config;
use crate::engine::input::pointer::{PointerState, track_pointer};
use crate::engine::input::scroll::{
    KeyboardCapture, ScrollControls, ScrollToSection, SectionChanged, advance_scroll_system,
    scroll_input_system,
};
use crate::engine::loading::manifest_loader::{
    ManifestLoader, configure_from_manifest, poll_manifest_system, start_loading,
};
use crate::engine::loading::placeholder::{
    despawn_placeholder, show_load_failure, spawn_placeholder,
};
use crate::engine::scene::float::animate_floats;
use crate::engine::scene::labels::project_world_labels;
use crate::engine::scene::lighting::{CursorViewport, spawn_lighting, track_cursor_light};
use crate::engine::scene::sections::spawn_sections;
use crate::engine::scene::stars::{spawn_starfield, twinkle_stars};
use crate::engine::scene::viewport::spawn_viewport_camera;
use crate::engine::systems::fps_tracking::fps_notification_system;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, spawn_fps_text};

#[cfg(target_arch = "wasm32")]
use crate::engine::core::window_config::cap_pixel_ratio;

// Overlay and host bridge
use crate::overlay::OverlayPlugin;
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers SiteManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SiteManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(OverlayPlugin)
        .insert_resource(ClearColor(BACKGROUND));

    // Initialise resources early; the manifest replaces the scroll and
    // camera tuning once it loads.
    app.init_resource::<ManifestLoader>()
        .init_resource::<PointerState>()
        .init_resource::<ScrollControls>()
        .init_resource::<KeyboardCapture>()
        .init_resource::<CameraRig>()
        .init_resource::<CursorViewport>()
        .add_event::<ScrollToSection>()
        .add_event::<SectionChanged>();

    // Loading gate
    app.add_systems(
        Startup,
        (spawn_viewport_camera, spawn_placeholder, start_loading).chain(),
    )
    .add_systems(
        Update,
        poll_manifest_system.run_if(in_state(AppState::Loading)),
    )
    .add_systems(OnEnter(AppState::Loading), notify_loading_state)
    .add_systems(
        OnEnter(AppState::Ready),
        (
            notify_loading_state,
            configure_from_manifest,
            despawn_placeholder,
            spawn_lighting,
            spawn_starfield,
            spawn_sections,
        ),
    )
    .add_systems(
        OnEnter(AppState::Failed),
        (notify_loading_state, show_load_failure),
    );

    // Per-frame scene systems. Input feeds the scroll controller, which the
    // camera rig reads, so these run in order.
    let frame_systems = (
        (
            track_pointer,
            scroll_input_system,
            advance_scroll_system,
            camera_rig_system,
        )
            .chain(),
        track_cursor_light.after(track_pointer),
        animate_floats,
        twinkle_stars,
    );

    app.add_systems(Update, frame_systems.run_if(in_state(AppState::Ready)))
        .add_systems(
            PostUpdate,
            project_world_labels
                .after(CameraUpdateSystem)
                .before(UiSystem::Layout)
                .run_if(in_state(AppState::Ready)),
        )
        .add_systems(Update, fps_notification_system);

    #[cfg(target_arch = "wasm32")]
    {
        app.add_systems(Update, cap_pixel_ratio);
    }

    // Add the FPS readout only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_fps_text)
            .add_systems(Update, fps_text_update_system);
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: "info,wgpu=error,naga=warn".to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
