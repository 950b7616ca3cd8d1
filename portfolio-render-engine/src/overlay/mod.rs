//! HTML-style overlay drawn with Bevy UI on top of the 3D scene.
//!
//! A full-screen column of page sections moves with the damped scroll
//! offset. Each section fades and slides in once when it first enters the
//! viewport. The hero buttons scroll to other sections and the contact form
//! accepts keyboard input.

/// Section navigation buttons.
pub mod buttons;

/// Contact form focus, editing and submission.
pub mod contact_form;

/// Overlay node tree built from the manifest copy, and the scroll track.
pub mod layout;

/// One-shot entrance animation and per-section fading.
pub mod reveal;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use crate::engine::input::scroll::advance_scroll_system;
use contact_form::{
    ContactFormState, ContactSubmitted, edit_focused_field, focus_form_fields,
    refresh_form_fields, submit_contact_form,
};

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContactFormState>()
            .add_event::<ContactSubmitted>()
            .add_systems(OnEnter(AppState::Ready), layout::spawn_overlay)
            .add_systems(
                Update,
                (
                    layout::sync_scroll_track,
                    reveal::update_reveals,
                    reveal::apply_reveal_offsets,
                    buttons::nav_button_system,
                    focus_form_fields,
                    edit_focused_field,
                    submit_contact_form,
                    refresh_form_fields,
                    reveal::apply_section_fade,
                )
                    .chain()
                    .after(advance_scroll_system)
                    .run_if(in_state(AppState::Ready)),
            );
    }
}
