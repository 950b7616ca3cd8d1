//! Pointer and scroll input.
//!
//! Stands in for the browser's scroll container: wheel, keyboard and
//! programmatic requests move a clamped pixel position, which is exposed
//! as a damped 0..1 offset.

/// Normalised pointer position in device coordinates.
pub mod pointer;

/// Scroll controller with smooth-damped progress and section tracking.
pub mod scroll;
