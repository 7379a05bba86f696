use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Keys while typing a `/` filter. The list narrows as the pattern changes.
pub(super) fn handle_filter(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let pattern = std::mem::take(&mut app.filter_input);
            app.filter = if pattern.is_empty() {
                None
            } else {
                Some(pattern)
            };
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc => {
            app.filter_input.clear();
            app.filter = None;
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            app.filter_input.pop();
        }
        KeyCode::Char(c) => app.filter_input.push(c),
        _ => return,
    }
    app.clamp_cursor();
}
