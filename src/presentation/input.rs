use crate::application::{App, AppMode};
use crate::domain::FieldKind;
use crate::infrastructure::ClipboardSink;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(
        app: &mut App,
        key: KeyCode,
        modifiers: KeyModifiers,
        clipboard: &mut dyn ClipboardSink,
    ) {
        if modifiers.contains(KeyModifiers::CONTROL) && matches!(key, KeyCode::Char('c')) {
            app.should_quit = true;
            return;
        }

        match app.mode {
            AppMode::Picker => Self::handle_picker_mode(app, key),
            AppMode::Wizard => Self::handle_wizard_mode(app, key, clipboard),
            AppMode::Editing => Self::handle_editing_mode(app, key),
        }
    }

    fn handle_picker_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.picker_up(),
            KeyCode::Down | KeyCode::Char('j') => app.picker_down(),
            KeyCode::Enter => app.choose_template(),
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            _ => {}
        }
    }

    fn handle_wizard_mode(app: &mut App, key: KeyCode, clipboard: &mut dyn ClipboardSink) {
        app.status_message = None;

        let focused_kind = app.focused_field().map(|field| field.kind);

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.focus_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.focus_next(),
            KeyCode::Tab | KeyCode::PageDown => app.next_step(),
            KeyCode::BackTab | KeyCode::PageUp | KeyCode::Esc => app.previous_step(),
            KeyCode::Enter => match focused_kind {
                Some(FieldKind::Text) => app.start_editing(),
                Some(FieldKind::Select { .. }) => app.cycle_option(true),
                Some(FieldKind::Multi { .. }) => app.toggle_choice(),
                None => {}
            },
            KeyCode::Char(' ') => app.toggle_choice(),
            KeyCode::Left | KeyCode::Char('h') => match focused_kind {
                Some(FieldKind::Select { .. }) => app.cycle_option(false),
                Some(FieldKind::Multi { .. }) => app.move_choice(false),
                _ => {}
            },
            KeyCode::Right | KeyCode::Char('l') => match focused_kind {
                Some(FieldKind::Select { .. }) => app.cycle_option(true),
                Some(FieldKind::Multi { .. }) => app.move_choice(true),
                _ => {}
            },
            KeyCode::Backspace | KeyCode::Delete => app.clear_focused_field(),
            KeyCode::Char('p') => app.toggle_preview(),
            KeyCode::Char('c') if app.wizard.is_final_step() => app.copy_note(clipboard),
            KeyCode::Char('n') if app.wizard.is_final_step() => app.start_new_note(),
            KeyCode::Char('x') if app.wizard.is_final_step() => app.exit_wizard(),
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            KeyCode::Backspace => app.delete_before_cursor(),
            KeyCode::Delete => app.delete_at_cursor(),
            KeyCode::Left => app.cursor_left(),
            KeyCode::Right => app.cursor_right(),
            KeyCode::Home => app.cursor_home(),
            KeyCode::End => app.cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::WizardState;
    use crate::domain::TemplateId;
    use crate::infrastructure::MemoryClipboard;

    fn press(app: &mut App, clipboard: &mut MemoryClipboard, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE, clipboard);
    }

    #[test]
    fn test_picker_selects_highlighted_template() {
        let mut app = App::default();
        let mut clipboard = MemoryClipboard::default();

        press(&mut app, &mut clipboard, KeyCode::Down);
        press(&mut app, &mut clipboard, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Wizard);
        assert_eq!(app.wizard.template().unwrap().id, TemplateId::WellBeing);
    }

    #[test]
    fn test_q_quits_from_picker_only() {
        let mut app = App::default();
        let mut clipboard = MemoryClipboard::default();
        press(&mut app, &mut clipboard, KeyCode::Enter);
        press(&mut app, &mut clipboard, KeyCode::Char('q'));
        assert!(!app.should_quit);

        let mut app = App::default();
        press(&mut app, &mut clipboard, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = App::new(true, Some(TemplateId::Crisis));
        let mut clipboard = MemoryClipboard::default();
        app.start_editing();
        InputHandler::handle_key_event(
            &mut app,
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            &mut clipboard,
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_into_text_field() {
        let mut app = App::new(true, Some(TemplateId::Transportation));
        let mut clipboard = MemoryClipboard::default();

        // serviceType, serviceTypeOther, pickupLocation
        press(&mut app, &mut clipboard, KeyCode::Down);
        press(&mut app, &mut clipboard, KeyCode::Down);
        press(&mut app, &mut clipboard, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Editing);

        for c in "12 Elm".chars() {
            press(&mut app, &mut clipboard, KeyCode::Char(c));
        }
        press(&mut app, &mut clipboard, KeyCode::Backspace);
        press(&mut app, &mut clipboard, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Wizard);
        assert_eq!(app.wizard.record().text("pickupLocation"), "12 El");
    }

    #[test]
    fn test_backspace_clears_focused_select() {
        let mut app = App::new(true, Some(TemplateId::Transportation));
        let mut clipboard = MemoryClipboard::default();
        press(&mut app, &mut clipboard, KeyCode::Right);
        assert_eq!(app.wizard.record().text("serviceType"), "Transport to shelter");

        press(&mut app, &mut clipboard, KeyCode::Backspace);
        assert!(!app.wizard.record().is_filled("serviceType"));
    }

    #[test]
    fn test_step_navigation_keys() {
        let mut app = App::new(true, Some(TemplateId::Transportation));
        let mut clipboard = MemoryClipboard::default();

        press(&mut app, &mut clipboard, KeyCode::Tab);
        press(&mut app, &mut clipboard, KeyCode::PageDown);
        assert_eq!(app.wizard.state(), WizardState::Step(3));

        press(&mut app, &mut clipboard, KeyCode::BackTab);
        assert_eq!(app.wizard.state(), WizardState::Step(2));

        press(&mut app, &mut clipboard, KeyCode::Esc);
        press(&mut app, &mut clipboard, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Picker);
        assert_eq!(app.wizard.state(), WizardState::NoTemplateSelected);
    }

    #[test]
    fn test_final_step_actions_only_on_final_step() {
        let mut app = App::new(true, Some(TemplateId::Transportation));
        let mut clipboard = MemoryClipboard::default();

        press(&mut app, &mut clipboard, KeyCode::Char('x'));
        assert_eq!(app.mode, AppMode::Wizard);

        for _ in 0..4 {
            press(&mut app, &mut clipboard, KeyCode::Tab);
        }
        press(&mut app, &mut clipboard, KeyCode::Char('c'));
        assert!(clipboard.contents.is_none());

        press(&mut app, &mut clipboard, KeyCode::Char('x'));
        assert_eq!(app.mode, AppMode::Picker);
    }

    #[test]
    fn test_preview_toggle() {
        let mut app = App::new(true, Some(TemplateId::WellBeing));
        let mut clipboard = MemoryClipboard::default();
        press(&mut app, &mut clipboard, KeyCode::Char('p'));
        assert!(!app.show_preview);
    }
}
