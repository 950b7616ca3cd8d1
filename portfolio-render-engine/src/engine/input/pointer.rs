use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Pointer in normalised device coordinates: x right, y up, both in -1..1.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub ndc: Vec2,
}

/// Convert a cursor position in window pixels (origin top-left) to NDC.
pub fn normalize_pointer(cursor: Vec2, window_size: Vec2) -> Vec2 {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        cursor.x / window_size.x * 2.0 - 1.0,
        -(cursor.y / window_size.y) * 2.0 + 1.0,
    )
}

/// The last known position is kept when the cursor leaves the window.
pub fn track_pointer(
    mut cursor_moved: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if let Some(cursor) = cursor_moved.read().last() {
        pointer.ndc = normalize_pointer(cursor.position, window.size());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_centre_map_to_ndc() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(normalize_pointer(Vec2::new(400.0, 300.0), size), Vec2::ZERO);
        assert_eq!(normalize_pointer(Vec2::ZERO, size), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_pointer(size, size), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn degenerate_window_yields_centre() {
        assert_eq!(normalize_pointer(Vec2::new(10.0, 10.0), Vec2::ZERO), Vec2::ZERO);
    }
}
