//! Application state for the terminal note helper.
//!
//! [`App`] wraps the [`Wizard`] with everything the terminal needs on top:
//! which screen is showing, which field has focus, the text being typed, and
//! the one-shot status line.

use tracing::{info, warn};

use super::wizard::{Retreat, Wizard};
use crate::domain::templates;
use crate::domain::{FieldDef, FieldKind, TemplateId};
use crate::infrastructure::ClipboardSink;

/// Which screen is active and how keys are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Choosing a note template
    Picker,
    /// Moving between fields and steps of the wizard
    Wizard,
    /// Typing into a free-text field
    Editing,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use dapnote::application::{App, AppMode};
///
/// let mut app = App::default();
/// assert_eq!(app.mode, AppMode::Picker);
///
/// app.choose_template();
/// assert_eq!(app.mode, AppMode::Wizard);
/// assert_eq!(app.wizard.step(), Some(1));
/// ```
#[derive(Debug)]
pub struct App {
    pub wizard: Wizard,
    pub mode: AppMode,
    /// Highlighted row on the template picker
    pub picker_index: usize,
    /// Focused field among the current step's fields
    pub field_index: usize,
    /// Highlighted choice inside a focused multi-select field
    pub choice_index: usize,
    /// Text being typed while in editing mode
    pub input: String,
    /// Cursor position within `input`, counted in characters
    pub cursor_position: usize,
    /// Temporary status message, cleared on the next key press
    pub status_message: Option<String>,
    pub show_preview: bool,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            wizard: Wizard::default(),
            mode: AppMode::Picker,
            picker_index: 0,
            field_index: 0,
            choice_index: 0,
            input: String::new(),
            cursor_position: 0,
            status_message: None,
            show_preview: true,
            should_quit: false,
        }
    }
}

impl App {
    pub fn new(show_preview: bool, start_template: Option<TemplateId>) -> Self {
        let mut app = Self {
            show_preview,
            ..Self::default()
        };
        if let Some(id) = start_template {
            app.picker_index = TemplateId::ALL.iter().position(|t| *t == id).unwrap_or(0);
            app.choose_template();
        }
        app
    }

    pub fn picker_up(&mut self) {
        self.picker_index = self.picker_index.saturating_sub(1);
    }

    pub fn picker_down(&mut self) {
        if self.picker_index + 1 < TemplateId::ALL.len() {
            self.picker_index += 1;
        }
    }

    /// Opens the wizard for the highlighted template.
    pub fn choose_template(&mut self) {
        let id = TemplateId::ALL[self.picker_index.min(TemplateId::ALL.len() - 1)];
        self.wizard.select_template(id);
        self.mode = AppMode::Wizard;
        self.reset_focus();
    }

    fn reset_focus(&mut self) {
        self.field_index = 0;
        self.choice_index = 0;
    }

    /// Fields shown on the current step, in schema order.
    pub fn current_fields(&self) -> Vec<&'static FieldDef> {
        match (self.wizard.template(), self.wizard.step()) {
            (Some(template), Some(step)) => template.fields_for_step(step).collect(),
            _ => Vec::new(),
        }
    }

    pub fn focused_field(&self) -> Option<&'static FieldDef> {
        self.current_fields().get(self.field_index).copied()
    }

    pub fn focus_next(&mut self) {
        if self.field_index + 1 < self.current_fields().len() {
            self.field_index += 1;
            self.choice_index = 0;
        }
    }

    pub fn focus_previous(&mut self) {
        if self.field_index > 0 {
            self.field_index -= 1;
            self.choice_index = 0;
        }
    }

    pub fn next_step(&mut self) {
        if self.wizard.advance() {
            self.reset_focus();
        }
    }

    /// Goes back a step; from step 1 this returns to the template picker.
    pub fn previous_step(&mut self) {
        match self.wizard.retreat() {
            Retreat::Moved => self.reset_focus(),
            Retreat::Exited => self.mode = AppMode::Picker,
        }
    }

    /// Starts editing the focused field if it takes free text.
    pub fn start_editing(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if field.kind != FieldKind::Text {
            return;
        }
        self.input = self.wizard.record().text(field.name).to_string();
        self.cursor_position = self.input.chars().count();
        self.mode = AppMode::Editing;
    }

    pub fn finish_editing(&mut self) {
        if let Some(field) = self.focused_field() {
            let value = std::mem::take(&mut self.input);
            if let Err(err) = self.wizard.set_text(field.name, value) {
                self.status_message = Some(err.to_string());
            }
        }
        self.mode = AppMode::Wizard;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Wizard;
        self.input.clear();
        self.cursor_position = 0;
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_position)
            .map(|(index, _)| index)
            .unwrap_or(self.input.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let index = self.byte_index();
        self.input.insert(index, c);
        self.cursor_position += 1;
    }

    pub fn delete_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let index = self.byte_index();
            self.input.remove(index);
        }
    }

    pub fn delete_at_cursor(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            let index = self.byte_index();
            self.input.remove(index);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input.chars().count();
    }

    /// Steps the focused single-select through its options.
    ///
    /// The cycle includes an unset position before the first option.
    pub fn cycle_option(&mut self, forward: bool) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let FieldKind::Select { options, .. } = field.kind else {
            return;
        };
        let current = self.wizard.record().text(field.name);
        // 0 is "unset", 1..=len map to options.
        let position = options
            .iter()
            .position(|option| *option == current)
            .map(|index| index + 1)
            .unwrap_or(0);
        let slots = options.len() + 1;
        let next = if forward {
            (position + 1) % slots
        } else {
            (position + slots - 1) % slots
        };
        let value = if next == 0 { "" } else { options[next - 1] };
        if let Err(err) = self.wizard.set_text(field.name, value) {
            self.status_message = Some(err.to_string());
        }
    }

    pub fn move_choice(&mut self, forward: bool) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let FieldKind::Multi { choices, .. } = field.kind else {
            return;
        };
        if forward {
            if self.choice_index + 1 < choices.len() {
                self.choice_index += 1;
            }
        } else {
            self.choice_index = self.choice_index.saturating_sub(1);
        }
    }

    /// Flips the highlighted choice of the focused multi-select.
    pub fn toggle_choice(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let FieldKind::Multi { choices, .. } = field.kind else {
            return;
        };
        let Some(choice) = choices.get(self.choice_index) else {
            return;
        };
        let checked = !self.wizard.record().is_checked(field.name, choice.id);
        if let Err(err) = self.wizard.set_option(field.name, choice.id, checked) {
            self.status_message = Some(err.to_string());
        }
    }

    pub fn clear_focused_field(&mut self) {
        if let Some(field) = self.focused_field() {
            if let Err(err) = self.wizard.clear_field(field.name) {
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Copies the rendered note when on the final step and every check passes.
    ///
    /// Otherwise nothing happens. A clipboard failure is reported once in the
    /// status line and leaves the answers untouched, so the user can retry.
    pub fn copy_note(&mut self, clipboard: &mut dyn ClipboardSink) {
        if !self.wizard.is_final_step() || !self.wizard.can_copy() {
            return;
        }
        let Some(note) = self.wizard.preview() else {
            return;
        };
        match clipboard.write_text(&note) {
            Ok(()) => {
                info!(lines = note.lines().count(), "note copied");
                self.status_message = Some("Note copied to clipboard".to_string());
            }
            Err(err) => {
                warn!(error = %err, "copy failed");
                self.status_message = Some(format!("Copy failed: {err}"));
            }
        }
    }

    pub fn start_new_note(&mut self) {
        self.wizard.reset();
        self.reset_focus();
        self.status_message = Some("Started a new note".to_string());
    }

    pub fn exit_wizard(&mut self) {
        self.wizard.exit();
        self.mode = AppMode::Picker;
        self.reset_focus();
    }

    pub fn toggle_preview(&mut self) {
        self.show_preview = !self.show_preview;
    }

    /// Current value of a field as shown in the form, `""` when empty.
    pub fn field_summary(&self, field: &FieldDef) -> String {
        let record = self.wizard.record();
        match field.kind {
            FieldKind::Text | FieldKind::Select { .. } => record.text(field.name).to_string(),
            FieldKind::Multi { choices, .. } => choices
                .iter()
                .filter(|choice| record.is_checked(field.name, choice.id))
                .map(|choice| choice.label)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    pub fn template_titles() -> Vec<&'static str> {
        templates::all_templates()
            .iter()
            .map(|template| template.title)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::WizardState;
    use crate::infrastructure::MemoryClipboard;

    fn app_on(id: TemplateId) -> App {
        App::new(true, Some(id))
    }

    fn focus(app: &mut App, name: &str) {
        app.field_index = app
            .current_fields()
            .iter()
            .position(|field| field.name == name)
            .unwrap_or_else(|| panic!("{name} not on this step"));
        app.choice_index = 0;
    }

    fn type_into(app: &mut App, name: &str, text: &str) {
        focus(app, name);
        app.start_editing();
        for c in text.chars() {
            app.insert_char(c);
        }
        app.finish_editing();
    }

    fn select_value(app: &mut App, name: &str, value: &str) {
        focus(app, name);
        for _ in 0..20 {
            if app.wizard.record().text(name) == value {
                return;
            }
            app.cycle_option(true);
        }
        panic!("{value} is not an option of {name}");
    }

    fn complete_transportation(app: &mut App) {
        select_value(app, "serviceType", "Transport to shelter");
        type_into(app, "pickupLocation", "123 Main St");
        type_into(app, "dropoffLocation", "456 Oak Ave");
        app.next_step();
        select_value(app, "clientPresentation", "Calm and cooperative");
        app.next_step();
        select_value(app, "clientAppeared", "Stable and appropriate");
        select_value(app, "transportNeed", "Routine/scheduled");
        select_value(app, "safetyLevel", "No concerns identified");
        app.next_step();
        select_value(app, "followupTimeframe", "None needed");
        app.next_step();
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.mode, AppMode::Picker);
        assert_eq!(app.picker_index, 0);
        assert!(app.show_preview);
        assert!(app.status_message.is_none());
        assert_eq!(app.wizard.state(), WizardState::NoTemplateSelected);
    }

    #[test]
    fn test_new_with_start_template_opens_wizard() {
        let app = App::new(false, Some(TemplateId::Crisis));
        assert_eq!(app.mode, AppMode::Wizard);
        assert_eq!(app.picker_index, 2);
        assert!(!app.show_preview);
        assert_eq!(app.wizard.template().unwrap().id, TemplateId::Crisis);
    }

    #[test]
    fn test_picker_bounds() {
        let mut app = App::default();
        app.picker_up();
        assert_eq!(app.picker_index, 0);
        for _ in 0..5 {
            app.picker_down();
        }
        assert_eq!(app.picker_index, 2);
    }

    #[test]
    fn test_editing_commits_and_cancels() {
        let mut app = app_on(TemplateId::Transportation);
        type_into(&mut app, "pickupLocation", "123 Main St");
        assert_eq!(app.wizard.record().text("pickupLocation"), "123 Main St");
        assert_eq!(app.mode, AppMode::Wizard);

        focus(&mut app, "pickupLocation");
        app.start_editing();
        assert_eq!(app.input, "123 Main St");
        app.insert_char('!');
        app.cancel_editing();
        assert_eq!(app.wizard.record().text("pickupLocation"), "123 Main St");
    }

    #[test]
    fn test_editing_ignores_non_text_fields() {
        let mut app = app_on(TemplateId::Transportation);
        focus(&mut app, "serviceType");
        app.start_editing();
        assert_eq!(app.mode, AppMode::Wizard);
    }

    #[test]
    fn test_cursor_editing_handles_multibyte_text() {
        let mut app = app_on(TemplateId::Transportation);
        focus(&mut app, "pickupLocation");
        app.start_editing();
        for c in "Café".chars() {
            app.insert_char(c);
        }
        app.cursor_left();
        app.delete_before_cursor();
        assert_eq!(app.input, "Caé");
        app.cursor_home();
        app.delete_at_cursor();
        assert_eq!(app.input, "aé");
        app.cursor_end();
        app.insert_char('s');
        assert_eq!(app.input, "aés");
    }

    #[test]
    fn test_cycle_option_wraps_through_unset() {
        let mut app = app_on(TemplateId::Transportation);
        app.next_step();
        app.next_step();
        focus(&mut app, "transportNeed");

        app.cycle_option(true);
        assert_eq!(app.wizard.record().text("transportNeed"), "Routine/scheduled");
        app.cycle_option(false);
        assert_eq!(app.wizard.record().text("transportNeed"), "");
        app.cycle_option(false);
        assert_eq!(app.wizard.record().text("transportNeed"), "Emergency");
    }

    #[test]
    fn test_toggle_choice() {
        let mut app = app_on(TemplateId::Transportation);
        app.next_step();
        focus(&mut app, "accessibilityNeeds");
        app.move_choice(true);
        app.toggle_choice();
        assert!(app.wizard.record().is_checked("accessibilityNeeds", "mobilityAid"));

        let field = app.focused_field().unwrap();
        assert_eq!(app.field_summary(field), "Mobility aid (walker/cane)");

        app.toggle_choice();
        assert!(!app.wizard.record().is_checked("accessibilityNeeds", "mobilityAid"));
    }

    #[test]
    fn test_previous_step_from_first_returns_to_picker() {
        let mut app = app_on(TemplateId::WellBeing);
        type_into(&mut app, "clientLocation", "Apt 4B");
        app.previous_step();
        assert_eq!(app.mode, AppMode::Picker);
        assert!(app.wizard.record().is_empty());
    }

    #[test]
    fn test_copy_is_inert_until_checks_pass() {
        let mut app = app_on(TemplateId::Transportation);
        let mut clipboard = MemoryClipboard::default();
        for _ in 0..4 {
            app.next_step();
        }
        app.copy_note(&mut clipboard);
        assert!(clipboard.contents.is_none());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_copy_complete_note() {
        let mut app = app_on(TemplateId::Transportation);
        complete_transportation(&mut app);
        assert!(app.wizard.is_final_step());

        let mut clipboard = MemoryClipboard::default();
        app.copy_note(&mut clipboard);
        let copied = clipboard.contents.unwrap();
        assert!(copied.starts_with("DATA:\nService Type: Transport to shelter"));
        assert!(copied.ends_with("Follow-up: None needed"));
        assert_eq!(app.status_message.as_deref(), Some("Note copied to clipboard"));
    }

    #[test]
    fn test_copy_failure_keeps_answers() {
        let mut app = app_on(TemplateId::Transportation);
        complete_transportation(&mut app);
        let before = app.wizard.record().clone();

        let mut clipboard = MemoryClipboard {
            contents: None,
            fail_with: Some("no display".to_string()),
        };
        app.copy_note(&mut clipboard);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Copy failed: Clipboard write failed: no display")
        );
        assert_eq!(app.wizard.record(), &before);
        assert_eq!(app.wizard.state(), WizardState::Step(5));

        clipboard.fail_with = None;
        app.copy_note(&mut clipboard);
        assert!(clipboard.contents.is_some());
    }

    #[test]
    fn test_start_new_note_and_exit() {
        let mut app = app_on(TemplateId::Transportation);
        complete_transportation(&mut app);

        app.start_new_note();
        assert_eq!(app.wizard.state(), WizardState::Step(1));
        assert!(app.wizard.record().is_empty());
        assert_eq!(app.mode, AppMode::Wizard);

        app.exit_wizard();
        assert_eq!(app.mode, AppMode::Picker);
        assert_eq!(app.wizard.state(), WizardState::NoTemplateSelected);
    }

    #[test]
    fn test_template_titles() {
        assert_eq!(
            App::template_titles(),
            vec![
                "Transportation Services",
                "Senior Well-Being Check",
                "Crisis Response/Shelter Placement",
            ]
        );
    }
}
