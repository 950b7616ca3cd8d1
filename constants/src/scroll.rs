/// Number of full-viewport pages the scroll container spans.
pub const PAGES: usize = 5;

/// Smooth time (seconds) for the damped scroll offset.
pub const DAMPING: f32 = 0.2;

/// Offset difference below which damping snaps to the target.
pub const DAMPING_EPSILON: f32 = 1e-5;

/// Pixels scrolled per wheel "line".
pub const LINE_HEIGHT_PX: f32 = 100.0;

/// Pixels scrolled per arrow key press.
pub const ARROW_STEP_PX: f32 = 40.0;
