//! Shared tuning constants for the portfolio scene.
//!
//! Values here are the defaults; the site manifest can override the ones
//! that are exposed as configuration.

pub mod camera_rig;
pub mod palette;
pub mod render_settings;
pub mod scene;
pub mod scroll;
