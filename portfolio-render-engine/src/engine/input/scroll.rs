use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::scroll::{ARROW_STEP_PX, DAMPING, DAMPING_EPSILON, LINE_HEIGHT_PX, PAGES};

/// Request to bring a page section to the top of the viewport.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollToSection(pub usize);

/// Emitted when the damped offset settles nearest to a different section.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionChanged {
    pub section: usize,
}

/// Set while a text field owns the keyboard, so typing does not scroll.
#[derive(Resource, Debug, Default)]
pub struct KeyboardCapture(pub bool);

/// Scroll state in pixels plus the damped 0..1 offset the scene reads.
#[derive(Resource, Debug, Clone)]
pub struct ScrollControls {
    pub pages: usize,
    pub damping: f32,
    viewport_height: f32,
    scroll_px: f32,
    offset: f32,
    velocity: f32,
    section: usize,
}

impl ScrollControls {
    pub fn new(pages: usize, damping: f32) -> Self {
        Self {
            pages,
            damping,
            viewport_height: 0.0,
            scroll_px: 0.0,
            offset: 0.0,
            velocity: 0.0,
            section: 0,
        }
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Total scrollable distance: every page but the last one.
    pub fn scroll_length(&self) -> f32 {
        self.pages.saturating_sub(1) as f32 * self.viewport_height
    }

    /// Resize the viewport while keeping the same relative position.
    pub fn set_viewport_height(&mut self, height: f32) {
        let height = height.max(0.0);
        if height == self.viewport_height {
            return;
        }
        let relative = self.target_offset();
        self.viewport_height = height;
        self.scroll_px = relative * self.scroll_length();
    }

    pub fn scroll_by(&mut self, delta_px: f32) {
        self.scroll_to_px(self.scroll_px + delta_px);
    }

    pub fn scroll_to_px(&mut self, px: f32) {
        self.scroll_px = if px.is_finite() {
            px.clamp(0.0, self.scroll_length())
        } else {
            0.0
        };
    }

    pub fn scroll_to_section(&mut self, section: usize) {
        self.scroll_to_px(section as f32 * self.viewport_height);
    }

    /// Undamped progress, always within `[0, 1]`.
    pub fn target_offset(&self) -> f32 {
        let length = self.scroll_length();
        if length <= 0.0 {
            return 0.0;
        }
        (self.scroll_px / length).clamp(0.0, 1.0)
    }

    /// Damped progress consumed by the camera rig and the overlay.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn section(&self) -> usize {
        section_for_offset(self.offset, self.pages)
    }

    /// Advance the damped offset by `dt` seconds. Returns the new section
    /// when it differs from the previous frame.
    pub fn advance(&mut self, dt: f32) -> Option<usize> {
        let (offset, velocity) = smooth_damp(
            self.offset,
            self.target_offset(),
            self.velocity,
            self.damping,
            dt,
            DAMPING_EPSILON,
        );
        self.offset = offset;
        self.velocity = velocity;

        let section = self.section();
        if section != self.section {
            self.section = section;
            Some(section)
        } else {
            None
        }
    }
}

impl Default for ScrollControls {
    fn default() -> Self {
        Self::new(PAGES, DAMPING)
    }
}

/// Nearest section for a progress value.
pub fn section_for_offset(offset: f32, pages: usize) -> usize {
    let last = pages.saturating_sub(1);
    let index = (offset.clamp(0.0, 1.0) * last as f32).round() as usize;
    index.min(last)
}

/// Critically damped spring toward `target` (Game Programming Gems 4,
/// "smooth damp"). Returns the new value and velocity. Never overshoots
/// the target; snaps once within `epsilon`.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: f32,
    smooth_time: f32,
    dt: f32,
    epsilon: f32,
) -> (f32, f32) {
    if (current - target).abs() <= epsilon {
        return (target, 0.0);
    }
    if dt <= 0.0 {
        return (current, velocity);
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (velocity + omega * change) * dt;
    let mut velocity = (velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    if (target - current > 0.0) == (output > target) {
        output = target;
        velocity = 0.0;
    }
    (output, velocity)
}

fn wheel_delta_px(event: &MouseWheel) -> f32 {
    let lines = match event.unit {
        MouseScrollUnit::Line => event.y * LINE_HEIGHT_PX,
        MouseScrollUnit::Pixel => event.y,
    };
    // Wheel up (positive y) moves toward the top of the page.
    -lines
}

enum KeyScroll {
    By(f32),
    Top,
    Bottom,
}

fn keyboard_scroll(keyboard: &ButtonInput<KeyCode>, viewport_height: f32) -> Option<KeyScroll> {
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        Some(KeyScroll::By(ARROW_STEP_PX))
    } else if keyboard.just_pressed(KeyCode::ArrowUp) {
        Some(KeyScroll::By(-ARROW_STEP_PX))
    } else if keyboard.just_pressed(KeyCode::PageDown) {
        Some(KeyScroll::By(viewport_height))
    } else if keyboard.just_pressed(KeyCode::PageUp) {
        Some(KeyScroll::By(-viewport_height))
    } else if keyboard.just_pressed(KeyCode::Space) {
        Some(KeyScroll::By(if shift { -viewport_height } else { viewport_height }))
    } else if keyboard.just_pressed(KeyCode::Home) {
        Some(KeyScroll::Top)
    } else if keyboard.just_pressed(KeyCode::End) {
        Some(KeyScroll::Bottom)
    } else {
        None
    }
}

pub fn scroll_input_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut wheel_events: EventReader<MouseWheel>,
    mut section_requests: EventReader<ScrollToSection>,
    keyboard: Res<ButtonInput<KeyCode>>,
    capture: Res<KeyboardCapture>,
    mut scroll: ResMut<ScrollControls>,
) {
    if let Ok(window) = windows.single() {
        scroll.set_viewport_height(window.height());
    }

    let wheel: f32 = wheel_events.read().map(wheel_delta_px).sum();
    if wheel.abs() > f32::EPSILON {
        scroll.scroll_by(wheel);
    }

    if !capture.0 {
        let viewport_height = scroll.viewport_height();
        match keyboard_scroll(&keyboard, viewport_height) {
            Some(KeyScroll::By(delta)) => scroll.scroll_by(delta),
            Some(KeyScroll::Top) => scroll.scroll_to_px(0.0),
            Some(KeyScroll::Bottom) => {
                let end = scroll.scroll_length();
                scroll.scroll_to_px(end);
            }
            None => {}
        }
    }

    for request in section_requests.read() {
        debug!("Scrolling to section {}", request.0);
        scroll.scroll_to_section(request.0);
    }
}

pub fn advance_scroll_system(
    time: Res<Time>,
    mut scroll: ResMut<ScrollControls>,
    mut section_events: EventWriter<SectionChanged>,
) {
    if let Some(section) = scroll.advance(time.delta_secs()) {
        section_events.write(SectionChanged { section });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls(height: f32) -> ScrollControls {
        let mut scroll = ScrollControls::new(5, 0.2);
        scroll.set_viewport_height(height);
        scroll
    }

    #[test]
    fn scroll_length_spans_all_but_last_page() {
        assert_eq!(controls(100.0).scroll_length(), 400.0);
        assert_eq!(ScrollControls::new(1, 0.2).scroll_length(), 0.0);
    }

    #[test]
    fn target_offset_is_clamped() {
        let mut scroll = controls(100.0);
        scroll.scroll_by(-50.0);
        assert_eq!(scroll.target_offset(), 0.0);
        scroll.scroll_by(10_000.0);
        assert_eq!(scroll.target_offset(), 1.0);
        scroll.scroll_to_px(f32::NAN);
        assert_eq!(scroll.target_offset(), 0.0);
    }

    #[test]
    fn zero_height_viewport_has_zero_offset() {
        let mut scroll = controls(0.0);
        scroll.scroll_by(500.0);
        assert_eq!(scroll.target_offset(), 0.0);
    }

    #[test]
    fn scroll_to_section_targets_page_top() {
        let mut scroll = controls(100.0);
        scroll.scroll_to_section(2);
        assert!((scroll.target_offset() - 0.5).abs() < 1e-6);
        scroll.scroll_to_section(99);
        assert_eq!(scroll.target_offset(), 1.0);
    }

    #[test]
    fn resize_keeps_relative_position() {
        let mut scroll = controls(100.0);
        scroll.scroll_to_px(100.0);
        scroll.set_viewport_height(300.0);
        assert!((scroll.target_offset() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn smooth_damp_converges_without_overshoot() {
        let (mut value, mut velocity) = (0.0_f32, 0.0_f32);
        for _ in 0..600 {
            let (v, vel) = smooth_damp(value, 1.0, velocity, 0.2, 1.0 / 60.0, 1e-5);
            assert!(v <= 1.0);
            assert!(v >= value);
            value = v;
            velocity = vel;
        }
        assert_eq!(value, 1.0);
    }

    #[test]
    fn smooth_damp_zero_dt_is_noop() {
        assert_eq!(smooth_damp(0.3, 1.0, 0.5, 0.2, 0.0, 1e-5), (0.3, 0.5));
    }

    #[test]
    fn smooth_damp_snaps_within_epsilon() {
        assert_eq!(smooth_damp(0.999_999, 1.0, 0.1, 0.2, 0.016, 1e-5), (1.0, 0.0));
    }

    #[test]
    fn abrupt_jump_is_smoothed() {
        let mut scroll = controls(100.0);
        scroll.scroll_to_px(400.0);
        scroll.advance(1.0 / 60.0);
        assert!(scroll.offset() > 0.0);
        assert!(scroll.offset() < 0.5);
    }

    #[test]
    fn advance_reports_section_changes_once() {
        let mut scroll = controls(100.0);
        scroll.scroll_to_section(4);
        let mut changes = Vec::new();
        for _ in 0..600 {
            if let Some(section) = scroll.advance(1.0 / 60.0) {
                changes.push(section);
            }
        }
        assert_eq!(changes, vec![1, 2, 3, 4]);
        assert_eq!(scroll.section(), 4);
    }

    #[test]
    fn section_rounding() {
        assert_eq!(section_for_offset(0.0, 5), 0);
        assert_eq!(section_for_offset(0.12, 5), 0);
        assert_eq!(section_for_offset(0.13, 5), 1);
        assert_eq!(section_for_offset(1.0, 5), 4);
        assert_eq!(section_for_offset(2.0, 5), 4);
        assert_eq!(section_for_offset(0.5, 0), 0);
    }
}
