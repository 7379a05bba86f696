mod filter;
mod navigate;
mod popups;
mod text_input;
mod todo;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use filter::handle_filter;
use navigate::handle_navigate;
use popups::{handle_help, handle_status};
use text_input::handle_text_input;
use todo::handle_todo_popup;

/// Handle a key event. The topmost popup gets the key first.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    app.message = None;

    if app.text_input.is_some() {
        handle_text_input(app, key);
    } else if app.todos.is_open() {
        handle_todo_popup(app, key);
    } else if app.status.is_some() {
        handle_status(app, key);
    } else if app.show_help {
        handle_help(app, key);
    } else {
        match app.mode {
            Mode::Navigate => handle_navigate(app, key),
            Mode::Filter => handle_filter(app, key),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_keys {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ch(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }

    /// Send every char of `text` as a key press
    pub fn type_text(app: &mut crate::tui::app::App, text: &str) {
        for c in text.chars() {
            super::handle_key(app, ch(c));
        }
    }
}
