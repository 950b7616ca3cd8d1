use bevy::prelude::*;
use bevy::window::PresentMode;
use constants::render_settings::{MAX_PIXEL_RATIO, MIN_PIXEL_RATIO};

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            title: "Portfolio".into(),
            canvas: Some(constants::render_settings::CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Portfolio".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

/// Device pixel ratio actually used for rendering.
pub fn clamp_pixel_ratio(device_ratio: f32) -> f32 {
    if !device_ratio.is_finite() {
        return MIN_PIXEL_RATIO;
    }
    device_ratio.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
}

/// Keeps the canvas backing store within the pixel ratio range. On the web
/// the canvas keeps its CSS size, so only the render resolution changes.
#[cfg(target_arch = "wasm32")]
pub fn cap_pixel_ratio(mut windows: Query<&mut Window>) {
    for mut window in &mut windows {
        let capped = clamp_pixel_ratio(window.resolution.base_scale_factor());
        if window.resolution.scale_factor_override() != Some(capped) {
            window.resolution.set_scale_factor_override(Some(capped));
            debug!("Pixel ratio capped to {capped}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_stays_within_range() {
        assert_eq!(clamp_pixel_ratio(0.5), 1.0);
        assert_eq!(clamp_pixel_ratio(1.25), 1.25);
        assert_eq!(clamp_pixel_ratio(3.0), 1.5);
        assert_eq!(clamp_pixel_ratio(f32::NAN), 1.0);
    }
}
