use bevy::prelude::*;

use super::layout::FadeWith;
use crate::engine::input::scroll::ScrollToSection;

/// Overlay button that scrolls the page to a section when pressed.
#[derive(Component, Debug, Clone, Copy)]
pub struct NavButton {
    pub section: usize,
    pub idle: Color,
    pub hover: Color,
}

impl NavButton {
    pub fn background(&self, interaction: Interaction) -> Color {
        match interaction {
            Interaction::None => self.idle,
            Interaction::Hovered | Interaction::Pressed => self.hover,
        }
    }
}

pub fn nav_button_system(
    mut buttons: Query<(&Interaction, &NavButton, &mut FadeWith), Changed<Interaction>>,
    mut section_requests: EventWriter<ScrollToSection>,
) {
    for (interaction, button, mut fade) in &mut buttons {
        fade.background = Some(button.background(*interaction));
        if *interaction == Interaction::Pressed {
            info!("Navigating to section {}", button.section);
            section_requests.write(ScrollToSection(button.section));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_and_press_use_hover_colour() {
        let button = NavButton {
            section: 3,
            idle: Color::BLACK,
            hover: Color::WHITE,
        };
        assert_eq!(button.background(Interaction::None), Color::BLACK);
        assert_eq!(button.background(Interaction::Hovered), Color::WHITE);
        assert_eq!(button.background(Interaction::Pressed), Color::WHITE);
    }

    #[test]
    fn pressing_requests_the_section() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<ScrollToSection>()
            .add_systems(Update, nav_button_system);
        let entity = app
            .world_mut()
            .spawn((
                Interaction::Pressed,
                NavButton {
                    section: 4,
                    idle: Color::BLACK,
                    hover: Color::WHITE,
                },
                FadeWith {
                    section: 0,
                    text: None,
                    background: Some(Color::BLACK),
                    border: None,
                },
            ))
            .id();
        app.update();

        let events = app.world().resource::<Events<ScrollToSection>>();
        let sent: Vec<_> = events.iter_current_update_events().copied().collect();
        assert_eq!(sent, vec![ScrollToSection(4)]);
        let fade = app.world().get::<FadeWith>(entity).unwrap();
        assert_eq!(fade.background, Some(Color::WHITE));
    }
}
