use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;
use constants::palette::{ACCENT_CYAN, ACCENT_PURPLE, GLASS_BORDER, TEXT_MUTED, TEXT_PRIMARY};

use super::layout::FadeWith;
use crate::engine::assets::site_manifest::{ContactContent, SiteManifest};
use crate::engine::input::scroll::KeyboardCapture;

const MAX_NAME_CHARS: usize = 80;
const MAX_MESSAGE_CHARS: usize = 2000;

/// Text input of the contact form. Also marks the clickable input box.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Message,
}

impl FormField {
    pub fn placeholder(self, contact: &ContactContent) -> String {
        match self {
            FormField::Name => contact.name_placeholder.clone(),
            FormField::Message => contact.message_placeholder.clone(),
        }
    }

    fn multiline(self) -> bool {
        matches!(self, FormField::Message)
    }

    fn max_chars(self) -> usize {
        match self {
            FormField::Name => MAX_NAME_CHARS,
            FormField::Message => MAX_MESSAGE_CHARS,
        }
    }

    fn focus_color(self) -> Color {
        match self {
            FormField::Name => ACCENT_CYAN,
            FormField::Message => ACCENT_PURPLE,
        }
    }
}

/// Text node showing a field's value or its placeholder.
#[derive(Component)]
pub struct FieldText(pub FormField);

#[derive(Component)]
pub struct SubmitButton;

/// Emitted when the form is sent. There is no delivery backend; the host
/// page receives it as a notification.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ContactSubmitted {
    pub name: String,
    pub message: String,
}

#[derive(Resource, Debug, Default)]
pub struct ContactFormState {
    pub focused: Option<FormField>,
    pub name: String,
    pub message: String,
}

impl ContactFormState {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Message => &mut self.message,
        }
    }

    /// Take the current contents and reset the form, unless both fields
    /// are blank.
    pub fn take_submission(&mut self) -> Option<ContactSubmitted> {
        if self.name.trim().is_empty() && self.message.trim().is_empty() {
            return None;
        }
        self.focused = None;
        Some(ContactSubmitted {
            name: std::mem::take(&mut self.name).trim().to_string(),
            message: std::mem::take(&mut self.message).trim().to_string(),
        })
    }
}

/// Apply one key press to a text buffer. Returns whether the text changed.
pub fn edit_buffer(buffer: &mut String, key: &Key, multiline: bool, max_chars: usize) -> bool {
    let insert = match key {
        Key::Backspace => return buffer.pop().is_some(),
        Key::Enter if multiline => "\n",
        Key::Space => " ",
        Key::Character(text) if !text.chars().any(char::is_control) => text.as_str(),
        _ => return false,
    };
    if buffer.chars().count() + insert.chars().count() > max_chars {
        return false;
    }
    buffer.push_str(insert);
    true
}

pub fn focus_form_fields(
    fields: Query<(&Interaction, &FormField), Changed<Interaction>>,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<ContactFormState>,
    mut capture: ResMut<KeyboardCapture>,
) {
    let pressed = fields
        .iter()
        .find(|(interaction, _)| **interaction == Interaction::Pressed)
        .map(|(_, field)| *field);

    let focused = match pressed {
        Some(field) => Some(field),
        None if mouse.just_pressed(MouseButton::Left) || keyboard.just_pressed(KeyCode::Escape) => {
            None
        }
        None => state.focused,
    };

    if focused != state.focused {
        debug!("Contact form focus: {:?}", focused);
        state.focused = focused;
    }
    if capture.0 != focused.is_some() {
        capture.0 = focused.is_some();
    }
}

pub fn edit_focused_field(
    mut keys: EventReader<KeyboardInput>,
    mut state: ResMut<ContactFormState>,
) {
    let Some(field) = state.focused else {
        keys.clear();
        return;
    };
    for event in keys.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        // Enter in the single-line field moves on to the message
        if event.logical_key == Key::Enter && !field.multiline() {
            state.focused = Some(FormField::Message);
            return;
        }
        let mut value = state.value(field).to_string();
        if edit_buffer(&mut value, &event.logical_key, field.multiline(), field.max_chars()) {
            *state.value_mut(field) = value;
        }
    }
}

pub fn submit_contact_form(
    buttons: Query<&Interaction, (Changed<Interaction>, With<SubmitButton>)>,
    mut state: ResMut<ContactFormState>,
    mut capture: ResMut<KeyboardCapture>,
    mut submissions: EventWriter<ContactSubmitted>,
) {
    if !buttons.iter().any(|i| *i == Interaction::Pressed) {
        return;
    }
    match state.take_submission() {
        Some(submission) => {
            info!("Contact form submitted by {:?}", submission.name);
            capture.0 = false;
            submissions.write(submission);
        }
        None => debug!("Ignoring empty contact form"),
    }
}

/// Redraw field values, placeholders and focus borders after edits.
pub fn refresh_form_fields(
    state: Res<ContactFormState>,
    manifest: Res<SiteManifest>,
    mut texts: Query<(&FieldText, &mut Text, &mut FadeWith)>,
    mut inputs: Query<(&FormField, &mut FadeWith), Without<FieldText>>,
) {
    if !state.is_changed() {
        return;
    }
    for (field, mut text, mut fade) in &mut texts {
        let field = field.0;
        let value = state.value(field);
        let focused = state.focused == Some(field);
        let (content, color) = if value.is_empty() && !focused {
            (field.placeholder(&manifest.overlay.contact), TEXT_MUTED.with_alpha(0.5))
        } else if focused {
            (format!("{value}|"), TEXT_PRIMARY)
        } else {
            (value.to_string(), TEXT_PRIMARY)
        };
        text.0 = content;
        fade.text = Some(color);
    }
    for (field, mut fade) in &mut inputs {
        let border = if state.focused == Some(*field) {
            field.focus_color()
        } else {
            GLASS_BORDER
        };
        if fade.border != Some(border) {
            fade.border = Some(border);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(buffer: &mut String, key: Key, multiline: bool) -> bool {
        edit_buffer(buffer, &key, multiline, 10)
    }

    #[test]
    fn typing_appends_characters() {
        let mut buffer = String::new();
        assert!(press(&mut buffer, Key::Character("h".into()), false));
        assert!(press(&mut buffer, Key::Character("i".into()), false));
        assert!(press(&mut buffer, Key::Space, false));
        assert_eq!(buffer, "hi ");
    }

    #[test]
    fn backspace_removes_last_character() {
        let mut buffer = "né".to_string();
        assert!(press(&mut buffer, Key::Backspace, false));
        assert_eq!(buffer, "n");
        buffer.clear();
        assert!(!press(&mut buffer, Key::Backspace, false));
    }

    #[test]
    fn enter_only_breaks_lines_in_multiline_fields() {
        let mut buffer = String::new();
        assert!(!press(&mut buffer, Key::Enter, false));
        assert!(press(&mut buffer, Key::Enter, true));
        assert_eq!(buffer, "\n");
    }

    #[test]
    fn length_is_capped() {
        let mut buffer = "0123456789".to_string();
        assert!(!press(&mut buffer, Key::Character("x".into()), false));
        assert_eq!(buffer.len(), 10);
    }

    #[test]
    fn navigation_keys_are_ignored() {
        let mut buffer = String::new();
        assert!(!press(&mut buffer, Key::ArrowDown, true));
        assert!(!press(&mut buffer, Key::Character("\u{7f}".into()), true));
        assert!(buffer.is_empty());
    }

    #[test]
    fn submission_takes_and_clears_contents() {
        let mut state = ContactFormState {
            focused: Some(FormField::Message),
            name: " Ada ".into(),
            message: "Hello".into(),
        };
        let submitted = state.take_submission().unwrap();
        assert_eq!(submitted.name, "Ada");
        assert_eq!(submitted.message, "Hello");
        assert!(state.name.is_empty() && state.message.is_empty());
        assert_eq!(state.focused, None);
    }

    #[test]
    fn blank_form_is_not_submitted() {
        let mut state = ContactFormState {
            name: "   ".into(),
            ..default()
        };
        assert!(state.take_submission().is_none());
    }
}
