use bevy::prelude::*;

/// Page background and fog colour (#050505)
pub const BACKGROUND: Color = Color::srgb(5.0 / 255.0, 5.0 / 255.0, 5.0 / 255.0);

/// Accent cyan (#00f3ff)
pub const ACCENT_CYAN: Color = Color::srgb(0.0, 243.0 / 255.0, 1.0);

/// Accent purple (#bd00ff)
pub const ACCENT_PURPLE: Color = Color::srgb(189.0 / 255.0, 0.0, 1.0);

pub const WIREFRAME_GREY: Color = Color::srgb(0.2, 0.2, 0.2);
pub const SCREEN_FRAME: Color = Color::srgb(17.0 / 255.0, 17.0 / 255.0, 17.0 / 255.0);
pub const SCREEN_PANEL: Color = Color::srgb(34.0 / 255.0, 34.0 / 255.0, 34.0 / 255.0);

/// Overlay text
pub const TEXT_PRIMARY: Color = Color::srgb(1.0, 1.0, 1.0);
pub const TEXT_MUTED: Color = Color::srgb(0.82, 0.84, 0.86);

/// Frosted panel behind overlay cards
pub const GLASS: Color = Color::srgba(1.0, 1.0, 1.0, 0.05);
pub const GLASS_DARK: Color = Color::srgba(0.0, 0.0, 0.0, 0.4);
pub const GLASS_BORDER: Color = Color::srgba(1.0, 1.0, 1.0, 0.1);
