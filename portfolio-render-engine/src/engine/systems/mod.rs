//! Runtime diagnostics shared by native and WASM builds.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the host page via RPC and updates the native
/// on-screen readout.
pub mod fps_tracking;
