//! Scroll-driven camera rig.
//!
//! Maps the damped scroll offset to a depth along the travel axis, eases the
//! live camera toward it and adds a small pointer parallax.

/// Rig settings, the pure per-frame step and the system that applies it.
pub mod scroll_rig;
