/// Camera depth when the scroll offset is zero (section one).
pub const BASE_Z: f32 = 5.0;

/// Distance between consecutive page sections along the travel axis.
pub const SECTION_DISTANCE: f32 = 20.0;

/// Exponential easing responsiveness, per second.
pub const EASE_RESPONSIVENESS: f32 = 2.0;

/// Maximum camera parallax offset from pointer movement (world units).
pub const PARALLAX_STRENGTH: f32 = 2.0;

/// How far ahead of the target depth the camera looks.
pub const LOOK_AHEAD: f32 = 10.0;

/// Camera position before the first frame.
pub const INITIAL_POSITION: [f32; 3] = [0.0, 0.0, 10.0];

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 30.0;

/// Depth of the cursor-tracking light.
pub const CURSOR_LIGHT_Z: f32 = 2.0;
