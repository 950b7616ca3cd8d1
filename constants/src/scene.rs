/// Linear fog start distance
pub const FOG_START: f32 = 10.0;

/// Linear fog end distance
pub const FOG_END: f32 = 25.0;

/// Starfield inner radius
pub const STAR_RADIUS: f32 = 100.0;

/// Starfield shell thickness beyond the inner radius
pub const STAR_DEPTH: f32 = 50.0;

pub const STAR_COUNT: usize = 5000;

/// Star size multiplier
pub const STAR_FACTOR: f32 = 4.0;

/// Star colour saturation (0 = neutral white)
pub const STAR_SATURATION: f32 = 0.0;

pub const STAR_LIGHTNESS: f32 = 0.9;

/// Twinkle speed
pub const STAR_SPEED: f32 = 1.0;

/// World radius of a star of size 1.
pub const STAR_WORLD_SCALE: f32 = 0.05;

/// Seed for decorative random layouts (stars, particles, float phases).
pub const LAYOUT_SEED: u64 = 0x5EC7_1095;

/// Ambient light relative intensity
pub const AMBIENT_INTENSITY: f32 = 0.5;

/// Converts the relative light intensities used in scene definitions into
/// lumens under Bevy's default camera exposure.
pub const LIGHT_INTENSITY_SCALE: f32 = 4.0 * std::f32::consts::PI * 1000.0;

/// Converts relative ambient intensity into Bevy ambient brightness.
pub const AMBIENT_BRIGHTNESS_SCALE: f32 = 800.0;

pub const KEY_LIGHT_POSITION: [f32; 3] = [10.0, 10.0, 10.0];
pub const KEY_LIGHT_INTENSITY: f32 = 10.0;

pub const ACCENT_LIGHT_INTENSITY: f32 = 20.0;
pub const ACCENT_LIGHT_RANGE: f32 = 10.0;

/// Number of decorative particles around the hero island
pub const HERO_PARTICLE_COUNT: usize = 20;

/// World-space font size of floating 3D labels
pub const LABEL_FONT_SIZE: f32 = 0.5;
