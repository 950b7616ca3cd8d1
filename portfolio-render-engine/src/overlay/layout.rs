use bevy::prelude::*;
use constants::palette::{
    ACCENT_CYAN, ACCENT_PURPLE, GLASS, GLASS_BORDER, GLASS_DARK, TEXT_MUTED, TEXT_PRIMARY,
};

use super::buttons::NavButton;
use super::contact_form::{FieldText, FormField, SubmitButton};
use super::reveal::Reveal;
use crate::engine::assets::site_manifest::{
    AboutContent, ContactContent, ExperienceContent, HeroContent, ProjectsContent, SiteManifest,
};
use crate::engine::input::scroll::ScrollControls;

#[derive(Component)]
pub struct OverlayRoot;

/// Column of page sections, translated with the damped scroll offset.
#[derive(Component)]
pub struct ScrollTrack;

#[derive(Component)]
pub struct OverlaySection {
    pub index: usize,
}

/// Base colours of an overlay element. Bevy UI has no group opacity, so
/// each element's alpha is scaled by its section's reveal opacity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FadeWith {
    pub section: usize,
    pub text: Option<Color>,
    pub background: Option<Color>,
    pub border: Option<Color>,
}

impl FadeWith {
    fn text(section: usize, color: Color) -> Self {
        Self {
            section,
            text: Some(color),
            background: None,
            border: None,
        }
    }

    fn panel(section: usize, background: Color, border: Option<Color>) -> Self {
        Self {
            section,
            text: None,
            background: Some(background),
            border,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    fn items(self) -> AlignItems {
        match self {
            Align::Left => AlignItems::FlexStart,
            Align::Right => AlignItems::FlexEnd,
            Align::Center => AlignItems::Center,
        }
    }

    fn justify_text(self) -> JustifyText {
        match self {
            Align::Left => JustifyText::Left,
            Align::Right => JustifyText::Right,
            Align::Center => JustifyText::Center,
        }
    }
}

const SECTION_ALIGNMENT: [Align; 5] = [
    Align::Left,
    Align::Right,
    Align::Left,
    Align::Center,
    Align::Center,
];

/// Vertical track position in logical pixels for a damped offset.
pub fn track_top(offset: f32, pages: usize, viewport_height: f32) -> f32 {
    -offset * pages.saturating_sub(1) as f32 * viewport_height
}

fn transparent(color: Color) -> Color {
    color.with_alpha(0.0)
}

/// Spawn faded-out text; the reveal systems bring the alpha up.
fn text(
    parent: &mut ChildSpawnerCommands,
    section: usize,
    content: impl Into<String>,
    size: f32,
    color: Color,
    align: Align,
) {
    parent.spawn((
        Text::new(content),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(transparent(color)),
        TextLayout::new_with_justify(align.justify_text()),
        FadeWith::text(section, color),
    ));
}

fn panel(section: usize, node: Node, background: Color, border: Option<Color>) -> impl Bundle {
    (
        node,
        BackgroundColor(transparent(background)),
        BorderColor(border.map(transparent).unwrap_or(Color::NONE)),
        FadeWith::panel(section, background, border),
    )
}

pub fn spawn_overlay(manifest: Res<SiteManifest>, mut commands: Commands) {
    let content = &manifest.overlay;

    commands
        .spawn((
            OverlayRoot,
            Name::new("Overlay"),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn((
                ScrollTrack,
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    top: Val::Px(0.0),
                    ..default()
                },
            ))
            .with_children(|track| {
                for (index, align) in SECTION_ALIGNMENT.into_iter().enumerate() {
                    track
                        .spawn((
                            OverlaySection { index },
                            Reveal::default(),
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Vh(100.0),
                                flex_direction: FlexDirection::Column,
                                justify_content: JustifyContent::Center,
                                align_items: align.items(),
                                padding: UiRect::all(Val::Px(80.0)),
                                ..default()
                            },
                        ))
                        .with_children(|section| match index {
                            0 => hero(section, index, align, &content.hero),
                            1 => about(section, index, align, &content.about),
                            2 => experience(section, index, align, &content.experience),
                            3 => projects(section, index, align, &content.projects),
                            _ => contact(section, index, align, &content.contact),
                        });
                }
            });
        });

    info!("Overlay spawned with {} sections", SECTION_ALIGNMENT.len());
}

fn hero(parent: &mut ChildSpawnerCommands, section: usize, align: Align, hero: &HeroContent) {
    let lines = hero.title_lines.len().max(1);
    for (i, line) in hero.title_lines.iter().enumerate() {
        // Cyan to purple down the title
        let t = if lines > 1 { i as f32 / (lines - 1) as f32 } else { 0.0 };
        let color = ACCENT_CYAN.mix(&ACCENT_PURPLE, t);
        text(parent, section, line.clone(), 96.0, color, align);
    }

    parent
        .spawn(panel(
            section,
            Node {
                margin: UiRect::top(Val::Px(24.0)),
                padding: UiRect::axes(Val::Px(24.0), Val::Px(12.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            GLASS,
            Some(GLASS_BORDER),
        ))
        .insert(BorderRadius::MAX)
        .with_children(|pill| {
            text(pill, section, hero.tagline.clone(), 24.0, TEXT_MUTED, align);
        });

    parent
        .spawn(Node {
            margin: UiRect::top(Val::Px(48.0)),
            column_gap: Val::Px(16.0),
            ..default()
        })
        .with_children(|row| {
            for action in &hero.actions {
                let (idle, hover, border, label) = if action.primary {
                    (
                        ACCENT_CYAN.with_alpha(0.1),
                        ACCENT_CYAN.with_alpha(0.2),
                        ACCENT_CYAN.with_alpha(0.5),
                        ACCENT_CYAN,
                    )
                } else {
                    (
                        TEXT_PRIMARY.with_alpha(0.05),
                        TEXT_PRIMARY.with_alpha(0.1),
                        GLASS_BORDER,
                        TEXT_PRIMARY,
                    )
                };
                row.spawn((
                    Button,
                    NavButton {
                        section: action.section,
                        idle,
                        hover,
                    },
                    panel(
                        section,
                        Node {
                            padding: UiRect::axes(Val::Px(32.0), Val::Px(12.0)),
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        idle,
                        Some(border),
                    ),
                    BorderRadius::MAX,
                ))
                .with_children(|button| {
                    text(button, section, action.label.clone(), 16.0, label, Align::Center);
                });
            }
        });
}

fn about(parent: &mut ChildSpawnerCommands, section: usize, align: Align, about: &AboutContent) {
    parent
        .spawn((
            panel(
                section,
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: align.items(),
                    max_width: Val::Px(672.0),
                    padding: UiRect::all(Val::Px(40.0)),
                    border: UiRect::left(Val::Px(4.0)),
                    ..default()
                },
                GLASS_DARK,
                Some(ACCENT_PURPLE),
            ),
            BorderRadius::all(Val::Px(24.0)),
        ))
        .with_children(|card| {
            text(card, section, about.heading.clone(), 48.0, ACCENT_PURPLE, align);
            card.spawn(Node {
                margin: UiRect::top(Val::Px(24.0)),
                ..default()
            })
            .with_children(|body| {
                text(body, section, about.body.clone(), 18.0, TEXT_MUTED, align);
            });
            card.spawn(Node {
                margin: UiRect::top(Val::Px(24.0)),
                flex_wrap: FlexWrap::Wrap,
                justify_content: JustifyContent::FlexEnd,
                column_gap: Val::Px(12.0),
                row_gap: Val::Px(12.0),
                ..default()
            })
            .with_children(|chips| {
                for skill in &about.skills {
                    chips
                        .spawn((
                            panel(
                                section,
                                Node {
                                    padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                                    border: UiRect::all(Val::Px(1.0)),
                                    ..default()
                                },
                                ACCENT_PURPLE.with_alpha(0.2),
                                Some(ACCENT_PURPLE.with_alpha(0.5)),
                            ),
                            BorderRadius::all(Val::Px(6.0)),
                        ))
                        .with_children(|chip| {
                            text(chip, section, skill.clone(), 14.0, TEXT_PRIMARY, Align::Center);
                        });
                }
            });
        });
}

fn experience(
    parent: &mut ChildSpawnerCommands,
    section: usize,
    align: Align,
    experience: &ExperienceContent,
) {
    parent
        .spawn(panel(
            section,
            Node {
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(48.0),
                padding: UiRect::left(Val::Px(16.0)),
                border: UiRect::left(Val::Px(2.0)),
                ..default()
            },
            Color::NONE,
            Some(GLASS_BORDER),
        ))
        .with_children(|timeline| {
            for job in &experience.jobs {
                timeline
                    .spawn(Node {
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::left(Val::Px(32.0)),
                        ..default()
                    })
                    .with_children(|entry| {
                        // Timeline dot sits on the border line
                        entry.spawn((
                            panel(
                                section,
                                Node {
                                    position_type: PositionType::Absolute,
                                    left: Val::Px(-25.0),
                                    top: Val::Px(8.0),
                                    width: Val::Px(16.0),
                                    height: Val::Px(16.0),
                                    ..default()
                                },
                                ACCENT_CYAN,
                                None,
                            ),
                            BorderRadius::MAX,
                        ));
                        text(entry, section, job.role.clone(), 30.0, TEXT_PRIMARY, align);
                        text(entry, section, job.company.clone(), 20.0, ACCENT_CYAN, align);
                        text(
                            entry,
                            section,
                            job.years.clone(),
                            14.0,
                            TEXT_PRIMARY.with_alpha(0.5),
                            align,
                        );
                    });
            }
        });
}

fn projects(
    parent: &mut ChildSpawnerCommands,
    section: usize,
    align: Align,
    projects: &ProjectsContent,
) {
    parent
        .spawn(Node {
            margin: UiRect::bottom(Val::Px(48.0)),
            ..default()
        })
        .with_children(|heading| {
            text(heading, section, projects.heading.clone(), 48.0, TEXT_PRIMARY, align);
        });

    parent
        .spawn(Node {
            width: Val::Percent(100.0),
            max_width: Val::Px(1024.0),
            display: Display::Grid,
            grid_template_columns: RepeatedGridTrack::flex(2, 1.0),
            column_gap: Val::Px(32.0),
            row_gap: Val::Px(32.0),
            ..default()
        })
        .with_children(|grid| {
            for card in &projects.cards {
                grid.spawn((
                    panel(
                        section,
                        Node {
                            flex_direction: FlexDirection::Column,
                            padding: UiRect::all(Val::Px(24.0)),
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        GLASS,
                        Some(GLASS_BORDER),
                    ),
                    BorderRadius::all(Val::Px(12.0)),
                ))
                .with_children(|body| {
                    text(body, section, card.title.clone(), 24.0, TEXT_PRIMARY, Align::Left);
                    text(
                        body,
                        section,
                        card.blurb.clone(),
                        14.0,
                        TEXT_PRIMARY.with_alpha(0.7),
                        Align::Left,
                    );
                });
            }
        });
}

fn contact(parent: &mut ChildSpawnerCommands, section: usize, align: Align, contact: &ContactContent) {
    parent
        .spawn((
            panel(
                section,
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Stretch,
                    width: Val::Percent(100.0),
                    max_width: Val::Px(576.0),
                    padding: UiRect::all(Val::Px(48.0)),
                    border: UiRect::top(Val::Px(4.0)),
                    row_gap: Val::Px(16.0),
                    ..default()
                },
                GLASS,
                Some(ACCENT_CYAN),
            ),
            BorderRadius::all(Val::Px(24.0)),
        ))
        .with_children(|card| {
            text(card, section, contact.heading.clone(), 36.0, TEXT_PRIMARY, align);
            text(
                card,
                section,
                contact.lead.clone(),
                16.0,
                TEXT_PRIMARY.with_alpha(0.8),
                align,
            );

            let fields = [
                (FormField::Name, &contact.name_label, 48.0),
                (FormField::Message, &contact.message_label, 128.0),
            ];
            for (field, label, height) in fields {
                text(
                    card,
                    section,
                    label.clone(),
                    14.0,
                    TEXT_PRIMARY.with_alpha(0.7),
                    Align::Left,
                );
                card.spawn((
                    Button,
                    field,
                    panel(
                        section,
                        Node {
                            height: Val::Px(height),
                            padding: UiRect::all(Val::Px(12.0)),
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        TEXT_PRIMARY.with_alpha(0.05),
                        Some(GLASS_BORDER),
                    ),
                    BorderRadius::all(Val::Px(8.0)),
                ))
                .with_children(|input| {
                    input.spawn((
                        FieldText(field),
                        Text::new(field.placeholder(contact)),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::NONE),
                        FadeWith::text(section, TEXT_MUTED.with_alpha(0.5)),
                    ));
                });
            }

            card.spawn((
                Button,
                SubmitButton,
                panel(
                    section,
                    Node {
                        justify_content: JustifyContent::Center,
                        padding: UiRect::axes(Val::Px(16.0), Val::Px(16.0)),
                        margin: UiRect::top(Val::Px(8.0)),
                        ..default()
                    },
                    ACCENT_CYAN.mix(&ACCENT_PURPLE, 0.5),
                    None,
                ),
                BorderRadius::all(Val::Px(8.0)),
            ))
            .with_children(|button| {
                text(
                    button,
                    section,
                    contact.submit_label.to_uppercase(),
                    16.0,
                    Color::BLACK,
                    Align::Center,
                );
            });
        });
}

/// Move the section column with the damped scroll offset.
pub fn sync_scroll_track(
    scroll: Res<ScrollControls>,
    mut tracks: Query<&mut Node, With<ScrollTrack>>,
) {
    let top = track_top(scroll.offset(), scroll.pages, scroll.viewport_height());
    for mut node in &mut tracks {
        if node.top != Val::Px(top) {
            node.top = Val::Px(top);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_moves_one_viewport_per_page() {
        assert_eq!(track_top(0.0, 5, 800.0), 0.0);
        assert_eq!(track_top(0.25, 5, 800.0), -800.0);
        assert_eq!(track_top(1.0, 5, 800.0), -3200.0);
    }

    #[test]
    fn single_page_never_moves() {
        assert_eq!(track_top(1.0, 1, 800.0), 0.0);
    }

    #[test]
    fn overlay_spawns_one_revealable_node_per_section() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(SiteManifest::default())
            .add_systems(Update, spawn_overlay);
        app.update();

        let world = app.world_mut();
        let mut sections: Vec<usize> = world
            .query_filtered::<&OverlaySection, With<Reveal>>()
            .iter(world)
            .map(|s| s.index)
            .collect();
        sections.sort();
        assert_eq!(sections, vec![0, 1, 2, 3, 4]);

        // Everything starts fully transparent
        for color in world.query::<&TextColor>().iter(world) {
            assert_eq!(color.0.alpha(), 0.0);
        }
        let nav = world.query::<&NavButton>().iter(world).count();
        assert_eq!(nav, 2);
    }
}
