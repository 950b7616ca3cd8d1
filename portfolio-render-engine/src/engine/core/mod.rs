//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, the loading gate
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the loading gate, scene spawning, per-frame
/// animation systems and platform-specific configuration.
pub mod app_setup;

/// Loading gate state machine: `Loading` until the site manifest resolves,
/// then `Ready` or `Failed`.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and the pixel ratio cap.
pub mod window_config;
