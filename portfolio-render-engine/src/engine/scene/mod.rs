//! Scene content: viewport host, decorative section geometry and lights.
//!
//! Everything here is spawned once when the loading gate opens and then
//! only animated; nothing feeds back into the camera rig.

/// Floating bob-and-sway motion for decorative groups.
pub mod float;

/// World-anchored text labels projected into the UI layer.
pub mod labels;

/// Global lights and the pointer-tracked cursor light.
pub mod lighting;

/// Flat-shaded platonic solids not provided by Bevy's primitives, and
/// line-list outlines for wireframe rendering.
pub mod polyhedron;

/// The five page-section geometry groups.
pub mod sections;

/// Twinkling spherical-shell starfield backdrop.
pub mod stars;

/// Camera, background, fog and render settings of the viewport.
pub mod viewport;
