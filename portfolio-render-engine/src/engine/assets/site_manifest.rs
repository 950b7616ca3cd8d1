use bevy::prelude::*;
use constants::camera_rig::{
    BASE_Z, EASE_RESPONSIVENESS, LOOK_AHEAD, PARALLAX_STRENGTH, SECTION_DISTANCE,
};
use constants::render_settings::REVEAL_THRESHOLD;
use constants::scene::{LAYOUT_SEED, STAR_COUNT};
use constants::scroll::{DAMPING, PAGES};
use serde::Deserialize;
use thiserror::Error;

use crate::engine::camera::scroll_rig::RigSettings;

/// Every field has a default, so a partial file only overrides what it names.
#[derive(Asset, TypePath, Resource, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SiteManifest {
    pub scene: SceneSettings,
    pub overlay: OverlayContent,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SceneSettings {
    pub pages: usize,
    pub damping: f32,
    pub section_distance: f32,
    pub base_z: f32,
    pub responsiveness: f32,
    pub parallax_strength: f32,
    pub look_ahead: f32,
    pub star_count: usize,
    pub layout_seed: u64,
    pub reveal_threshold: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            pages: PAGES,
            damping: DAMPING,
            section_distance: SECTION_DISTANCE,
            base_z: BASE_Z,
            responsiveness: EASE_RESPONSIVENESS,
            parallax_strength: PARALLAX_STRENGTH,
            look_ahead: LOOK_AHEAD,
            star_count: STAR_COUNT,
            layout_seed: LAYOUT_SEED,
            reveal_threshold: REVEAL_THRESHOLD,
        }
    }
}

impl SceneSettings {
    pub fn rig_settings(&self) -> RigSettings {
        RigSettings {
            base_z: self.base_z,
            section_distance: self.section_distance,
            pages: self.pages,
            responsiveness: self.responsiveness,
            parallax_strength: self.parallax_strength,
            look_ahead: self.look_ahead,
        }
    }

    /// Depth of the content group for a page section.
    pub fn section_z(&self, index: usize) -> f32 {
        -(index as f32) * self.section_distance
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ManifestError {
    #[error("manifest must describe at least one page")]
    NoPages,
    #[error("scroll damping must be a finite, non-negative number of seconds (got {0})")]
    InvalidDamping(f32),
    #[error("section distance must be positive (got {0})")]
    InvalidSectionDistance(f32),
    #[error("camera responsiveness must be positive (got {0})")]
    InvalidResponsiveness(f32),
    #[error("reveal threshold must be within [0, 1) (got {0})")]
    InvalidRevealThreshold(f32),
}

impl SiteManifest {
    pub fn validate(&self) -> Result<(), ManifestError> {
        let scene = &self.scene;
        if scene.pages == 0 {
            return Err(ManifestError::NoPages);
        }
        if !scene.damping.is_finite() || scene.damping < 0.0 {
            return Err(ManifestError::InvalidDamping(scene.damping));
        }
        if !(scene.section_distance.is_finite() && scene.section_distance > 0.0) {
            return Err(ManifestError::InvalidSectionDistance(scene.section_distance));
        }
        if !(scene.responsiveness.is_finite() && scene.responsiveness > 0.0) {
            return Err(ManifestError::InvalidResponsiveness(scene.responsiveness));
        }
        if !(0.0..1.0).contains(&scene.reveal_threshold) {
            return Err(ManifestError::InvalidRevealThreshold(scene.reveal_threshold));
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct OverlayContent {
    pub hero: HeroContent,
    pub about: AboutContent,
    pub experience: ExperienceContent,
    pub projects: ProjectsContent,
    pub contact: ContactContent,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct HeroContent {
    pub title_lines: Vec<String>,
    pub tagline: String,
    pub actions: Vec<NavAction>,
}

/// Overlay button that scrolls to a page section.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct NavAction {
    pub label: String,
    pub section: usize,
    #[serde(default)]
    pub primary: bool,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            title_lines: vec!["ARCHIT".into(), "NOVA".into()],
            tagline: "Creative Full-Stack Developer".into(),
            actions: vec![
                NavAction {
                    label: "View Projects".into(),
                    section: 3,
                    primary: true,
                },
                NavAction {
                    label: "Contact Me".into(),
                    section: 4,
                    primary: false,
                },
            ],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AboutContent {
    pub heading: String,
    pub body: String,
    pub skills: Vec<String>,
}

impl Default for AboutContent {
    fn default() -> Self {
        Self {
            heading: "About Me".into(),
            body: "I'm a developer who views code as a medium for art. Specializing in modern \
                   web technologies, I build \"Cyber-Laboratory\" interfaces that merge \
                   high-performance functionality with immersive 3D aesthetics."
                .into(),
            skills: ["React", "Next.js", "Three.js", "Node.js", "PostgreSQL"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ExperienceContent {
    pub jobs: Vec<Job>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Job {
    pub role: String,
    pub company: String,
    pub years: String,
}

impl Default for ExperienceContent {
    fn default() -> Self {
        let job = |role: &str, company: &str, years: &str| Job {
            role: role.into(),
            company: company.into(),
            years: years.into(),
        };
        Self {
            jobs: vec![
                job("Senior Developer", "Tech Corp", "2023-Present"),
                job("Full Stack Engineer", "StartUp Inc", "2021-2023"),
                job("Freelance", "Global", "2019-2021"),
            ],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ProjectsContent {
    pub heading: String,
    pub cards: Vec<ProjectCard>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectCard {
    pub title: String,
    pub blurb: String,
}

impl Default for ProjectsContent {
    fn default() -> Self {
        Self {
            heading: "Selected Works".into(),
            cards: vec![
                ProjectCard {
                    title: "Project Alpha".into(),
                    blurb: "A next-gen e-commerce platform with 3D product previews.".into(),
                },
                ProjectCard {
                    title: "Cyber Dashboard".into(),
                    blurb: "Real-time analytics visualization using WebGL.".into(),
                },
            ],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ContactContent {
    pub heading: String,
    pub lead: String,
    pub name_label: String,
    pub name_placeholder: String,
    pub message_label: String,
    pub message_placeholder: String,
    pub submit_label: String,
}

impl Default for ContactContent {
    fn default() -> Self {
        Self {
            heading: "Get In Touch".into(),
            lead: "Ready to build the impossible? Send a signal.".into(),
            name_label: "Identity".into(),
            name_placeholder: "Name".into(),
            message_label: "Transmission".into(),
            message_placeholder: "Message".into(),
            submit_label: "Send Transmission".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let manifest: SiteManifest = serde_json::from_str("{}").unwrap();
        assert_eq!(manifest.scene, SceneSettings::default());
        assert_eq!(manifest.overlay.hero.title_lines, vec!["ARCHIT", "NOVA"]);
        assert_eq!(manifest.overlay.experience.jobs.len(), 3);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn partial_scene_overrides_only_named_fields() {
        let manifest: SiteManifest =
            serde_json::from_str(r#"{ "scene": { "pages": 3, "damping": 0.5 } }"#).unwrap();
        assert_eq!(manifest.scene.pages, 3);
        assert_eq!(manifest.scene.damping, 0.5);
        assert_eq!(manifest.scene.section_distance, SECTION_DISTANCE);
        assert_eq!(manifest.overlay.contact.submit_label, "Send Transmission");
    }

    #[test]
    fn rig_settings_follow_scene() {
        let scene = SceneSettings {
            pages: 3,
            section_distance: 10.0,
            base_z: 0.0,
            ..default()
        };
        let rig = scene.rig_settings();
        assert_eq!(rig.target_z(1.0), -20.0);
        assert_eq!(scene.section_z(2), -20.0);
    }

    #[test]
    fn validation_rejects_inconsistent_scenes() {
        let with = |scene: SceneSettings| SiteManifest {
            scene,
            ..default()
        };
        assert_eq!(
            with(SceneSettings { pages: 0, ..default() }).validate(),
            Err(ManifestError::NoPages)
        );
        assert!(matches!(
            with(SceneSettings { damping: -1.0, ..default() }).validate(),
            Err(ManifestError::InvalidDamping(_))
        ));
        assert!(matches!(
            with(SceneSettings { section_distance: 0.0, ..default() }).validate(),
            Err(ManifestError::InvalidSectionDistance(_))
        ));
        assert!(matches!(
            with(SceneSettings { responsiveness: f32::NAN, ..default() }).validate(),
            Err(ManifestError::InvalidResponsiveness(_))
        ));
        assert!(matches!(
            with(SceneSettings { reveal_threshold: 1.0, ..default() }).validate(),
            Err(ManifestError::InvalidRevealThreshold(_))
        ));
    }

    #[test]
    fn nav_actions_parse_with_optional_primary() {
        let manifest: SiteManifest = serde_json::from_str(
            r#"{ "overlay": { "hero": { "actions": [ { "label": "Go", "section": 2 } ] } } }"#,
        )
        .unwrap();
        assert_eq!(
            manifest.overlay.hero.actions,
            vec![NavAction {
                label: "Go".into(),
                section: 2,
                primary: false
            }]
        );
        assert_eq!(manifest.overlay.hero.tagline, "Creative Full-Stack Developer");
    }
}
