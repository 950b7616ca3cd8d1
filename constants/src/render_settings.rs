/// Lower bound of the device pixel ratio used for rendering.
pub const MIN_PIXEL_RATIO: f32 = 1.0;

/// Upper bound of the device pixel ratio; higher-density displays render
/// at this ratio and are upscaled.
pub const MAX_PIXEL_RATIO: f32 = 1.5;

/// Canvas selector on web builds.
pub const CANVAS_SELECTOR: &str = "#bevy";

/// Overlay entrance animation
pub const REVEAL_DURATION_SECS: f32 = 0.8;
pub const REVEAL_OFFSET_PX: f32 = 50.0;

/// Section visible fraction that must be exceeded before it reveals.
pub const REVEAL_THRESHOLD: f32 = 0.0;

/// FPS notification interval for the host bridge
pub const FPS_NOTIFY_INTERVAL_SECS: f32 = 0.5;
