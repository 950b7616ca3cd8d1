use bevy::prelude::*;
use constants::render_settings::{REVEAL_DURATION_SECS, REVEAL_OFFSET_PX};

use crate::engine::assets::site_manifest::SiteManifest;
use crate::engine::input::scroll::ScrollControls;

use super::layout::{FadeWith, OverlaySection};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealPhase {
    Hidden,
    Revealing { elapsed: f32 },
    Shown,
}

/// One-shot entrance animation of an overlay section: fades in and slides
/// up the first time the section enters the viewport, then stays shown.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    pub phase: RevealPhase,
    pub duration: f32,
    pub offset_px: f32,
}

impl Default for Reveal {
    fn default() -> Self {
        Self {
            phase: RevealPhase::Hidden,
            duration: REVEAL_DURATION_SECS,
            offset_px: REVEAL_OFFSET_PX,
        }
    }
}

impl Reveal {
    /// Advance by `dt`, starting the animation once more than `threshold`
    /// of the section is visible.
    pub fn update(&mut self, visible_fraction: f32, threshold: f32, dt: f32) {
        self.phase = match self.phase {
            RevealPhase::Hidden if visible_fraction > threshold => {
                RevealPhase::Revealing { elapsed: 0.0 }.advanced(dt.max(0.0), self.duration)
            }
            RevealPhase::Hidden => RevealPhase::Hidden,
            RevealPhase::Revealing { elapsed } => {
                RevealPhase::Revealing { elapsed }.advanced(dt.max(0.0), self.duration)
            }
            RevealPhase::Shown => RevealPhase::Shown,
        };
    }

    /// Eased animation progress in 0..=1.
    pub fn progress(&self) -> f32 {
        match self.phase {
            RevealPhase::Hidden => 0.0,
            RevealPhase::Revealing { elapsed } if self.duration > 0.0 => {
                ease_out((elapsed / self.duration).clamp(0.0, 1.0))
            }
            RevealPhase::Revealing { .. } | RevealPhase::Shown => 1.0,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.progress()
    }

    /// Downward displacement in logical pixels.
    pub fn offset(&self) -> f32 {
        self.offset_px * (1.0 - self.progress())
    }
}

impl RevealPhase {
    fn advanced(self, dt: f32, duration: f32) -> Self {
        match self {
            RevealPhase::Revealing { elapsed } if elapsed + dt < duration => {
                RevealPhase::Revealing {
                    elapsed: elapsed + dt,
                }
            }
            RevealPhase::Revealing { .. } => RevealPhase::Shown,
            other => other,
        }
    }
}

/// Fraction of page section `index` inside the viewport when the damped
/// offset is `offset`. Sections are one viewport tall.
pub fn visible_fraction(index: usize, offset: f32, pages: usize) -> f32 {
    let top = offset.clamp(0.0, 1.0) * pages.saturating_sub(1) as f32;
    let start = index as f32;
    ((start + 1.0).min(top + 1.0) - start.max(top)).clamp(0.0, 1.0)
}

/// CSS `cubic-bezier(x1, y1, x2, y2)` timing function evaluated at `x`.
pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    let sample = |a: f32, b: f32, t: f32| {
        let mt = 1.0 - t;
        3.0 * mt * mt * t * a + 3.0 * mt * t * t * b + t * t * t
    };

    // Bisection on x(t); x is monotonic for control points in [0, 1].
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    let mut t = x;
    for _ in 0..32 {
        let guess = sample(x1, x2, t);
        if (guess - x).abs() < 1e-6 {
            break;
        }
        if guess < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    sample(y1, y2, t)
}

/// CSS `ease-out`.
pub fn ease_out(x: f32) -> f32 {
    cubic_bezier(0.0, 0.0, 0.58, 1.0, x)
}

pub fn update_reveals(
    time: Res<Time>,
    scroll: Res<ScrollControls>,
    manifest: Res<SiteManifest>,
    mut sections: Query<(&OverlaySection, &mut Reveal)>,
) {
    let dt = time.delta_secs();
    let threshold = manifest.scene.reveal_threshold;
    for (section, mut reveal) in &mut sections {
        let mut next = *reveal;
        next.update(
            visible_fraction(section.index, scroll.offset(), scroll.pages),
            threshold,
            dt,
        );
        // Only touch the component when the animation actually moves
        if next != *reveal {
            if matches!(reveal.phase, RevealPhase::Hidden) {
                debug!("Revealing overlay section {}", section.index);
            }
            *reveal = next;
        }
    }
}

pub fn apply_reveal_offsets(mut sections: Query<(&Reveal, &mut Node), Changed<Reveal>>) {
    for (reveal, mut node) in &mut sections {
        node.top = Val::Px(reveal.offset());
    }
}

fn faded(color: Color, opacity: f32) -> Color {
    color.with_alpha(color.alpha() * opacity)
}

/// Scale every overlay element's colours by its section's reveal opacity.
pub fn apply_section_fade(
    sections: Query<(&OverlaySection, Ref<Reveal>)>,
    mut elements: Query<(
        Ref<FadeWith>,
        Option<&mut TextColor>,
        Option<&mut BackgroundColor>,
        Option<&mut BorderColor>,
    )>,
) {
    let mut opacity = Vec::new();
    let mut any_changed = false;
    for (section, reveal) in &sections {
        if opacity.len() <= section.index {
            opacity.resize(section.index + 1, 0.0);
        }
        opacity[section.index] = reveal.opacity();
        any_changed |= reveal.is_changed();
    }

    for (fade, text, background, border) in &mut elements {
        if !any_changed && !fade.is_changed() {
            continue;
        }
        let alpha = opacity.get(fade.section).copied().unwrap_or(1.0);
        if let (Some(base), Some(mut text)) = (fade.text, text) {
            text.0 = faded(base, alpha);
        }
        if let (Some(base), Some(mut background)) = (fade.background, background) {
            background.0 = faded(base, alpha);
        }
        if let (Some(base), Some(mut border)) = (fade.border, border) {
            border.0 = faded(base, alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_until_any_part_is_visible() {
        let mut reveal = Reveal::default();
        reveal.update(0.0, 0.0, 0.1);
        assert_eq!(reveal.phase, RevealPhase::Hidden);
        assert_eq!(reveal.opacity(), 0.0);
        assert_eq!(reveal.offset(), REVEAL_OFFSET_PX);

        reveal.update(0.01, 0.0, 0.1);
        assert!(matches!(reveal.phase, RevealPhase::Revealing { .. }));
        assert!(reveal.opacity() > 0.0);
    }

    #[test]
    fn reveal_is_one_shot() {
        let mut reveal = Reveal::default();
        reveal.update(1.0, 0.0, 0.0);
        for _ in 0..20 {
            reveal.update(1.0, 0.0, 0.1);
        }
        assert_eq!(reveal.phase, RevealPhase::Shown);
        // Scrolling the section back out does not hide it again
        reveal.update(0.0, 0.0, 0.1);
        assert_eq!(reveal.phase, RevealPhase::Shown);
        assert_eq!(reveal.opacity(), 1.0);
        assert_eq!(reveal.offset(), 0.0);
    }

    #[test]
    fn animation_finishes_after_duration() {
        let mut reveal = Reveal::default();
        reveal.update(1.0, 0.0, 0.0);
        reveal.update(1.0, 0.0, REVEAL_DURATION_SECS * 0.5);
        assert!(matches!(reveal.phase, RevealPhase::Revealing { .. }));
        reveal.update(1.0, 0.0, REVEAL_DURATION_SECS * 0.5);
        assert_eq!(reveal.phase, RevealPhase::Shown);
    }

    #[test]
    fn threshold_must_be_exceeded() {
        let mut reveal = Reveal::default();
        reveal.update(0.5, 0.5, 0.1);
        assert_eq!(reveal.phase, RevealPhase::Hidden);
        reveal.update(0.51, 0.5, 0.1);
        assert!(matches!(reveal.phase, RevealPhase::Revealing { .. }));
    }

    #[test]
    fn visible_fraction_tracks_the_scrolled_page() {
        assert_eq!(visible_fraction(0, 0.0, 5), 1.0);
        assert_eq!(visible_fraction(1, 0.0, 5), 0.0);
        assert!((visible_fraction(1, 0.125, 5) - 0.5).abs() < 1e-6);
        assert!((visible_fraction(0, 0.125, 5) - 0.5).abs() < 1e-6);
        assert_eq!(visible_fraction(4, 1.0, 5), 1.0);
        assert_eq!(visible_fraction(0, 1.0, 5), 0.0);
    }

    #[test]
    fn ease_out_endpoints_and_shape() {
        assert!(ease_out(0.0).abs() < 1e-5);
        assert!((ease_out(1.0) - 1.0).abs() < 1e-5);
        // Decelerating curve runs ahead of linear
        assert!(ease_out(0.5) > 0.5);
        let mut previous = 0.0;
        for i in 1..=20 {
            let y = ease_out(i as f32 / 20.0);
            assert!(y >= previous);
            previous = y;
        }
    }

    #[test]
    fn fade_scales_base_alpha() {
        let base = Color::srgba(1.0, 0.0, 0.0, 0.5);
        assert_eq!(faded(base, 0.0).alpha(), 0.0);
        assert!((faded(base, 0.5).alpha() - 0.25).abs() < 1e-6);
        assert_eq!(faded(base, 1.0), base);
    }

    #[test]
    fn linear_bezier_is_identity() {
        for i in 0..=10 {
            let x = i as f32 / 10.0;
            assert!((cubic_bezier(0.25, 0.25, 0.75, 0.75, x) - x).abs() < 1e-4);
        }
    }

    fn settle(app: &mut App, section: usize) {
        let mut scroll = app.world_mut().resource_mut::<ScrollControls>();
        scroll.scroll_to_section(section);
        for _ in 0..600 {
            scroll.advance(1.0 / 60.0);
        }
    }

    fn phases(app: &mut App) -> Vec<RevealPhase> {
        let mut query = app.world_mut().query::<(&OverlaySection, &Reveal)>();
        let mut sections: Vec<_> = query
            .iter(app.world())
            .map(|(section, reveal)| (section.index, reveal.phase))
            .collect();
        sections.sort_by_key(|(index, _)| *index);
        sections.into_iter().map(|(_, phase)| phase).collect()
    }

    #[test]
    fn scrolling_reveals_sections_once() {
        use bevy::time::TimeUpdateStrategy;
        use std::time::Duration;

        let mut scroll = ScrollControls::new(5, 0.2);
        scroll.set_viewport_height(100.0);

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .insert_resource(SiteManifest::default())
            .insert_resource(scroll)
            .add_systems(Update, update_reveals);
        for index in 0..5 {
            app.world_mut()
                .spawn((OverlaySection { index }, Reveal::default()));
        }

        for _ in 0..12 {
            app.update();
        }
        let start = phases(&mut app);
        assert_eq!(start[0], RevealPhase::Shown);
        assert!(start[1..].iter().all(|phase| *phase == RevealPhase::Hidden));

        // Jump straight to the projects page
        settle(&mut app, 3);
        app.update();
        let jumped = phases(&mut app);
        assert!(matches!(jumped[3], RevealPhase::Revealing { .. }));
        assert_eq!(jumped[2], RevealPhase::Hidden);
        assert_eq!(jumped[4], RevealPhase::Hidden);

        for _ in 0..12 {
            app.update();
        }

        // Back to the top: nothing replays or hides again
        settle(&mut app, 0);
        app.update();
        let back = phases(&mut app);
        assert_eq!(back[0], RevealPhase::Shown);
        assert_eq!(back[3], RevealPhase::Shown);
        assert_eq!(back[1], RevealPhase::Hidden);
    }
}
