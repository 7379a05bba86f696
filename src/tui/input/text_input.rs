use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode::{
    next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left, word_boundary_right,
};

use super::todo;

/// Keys in the single-line text input popup
pub(super) fn handle_text_input(app: &mut App, key: KeyEvent) {
    let Some(input) = app.text_input.as_mut() else {
        return;
    };
    let word = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => app.text_input = None,
        KeyCode::Enter => {
            if let Some(input) = app.text_input.take() {
                todo::submit(app, input.purpose, &input.buffer);
            }
        }
        KeyCode::Left if word => input.cursor = word_boundary_left(&input.buffer, input.cursor),
        KeyCode::Right if word => input.cursor = word_boundary_right(&input.buffer, input.cursor),
        KeyCode::Left => {
            if let Some(pos) = prev_grapheme_boundary(&input.buffer, input.cursor) {
                input.cursor = pos;
            }
        }
        KeyCode::Right => {
            if let Some(pos) = next_grapheme_boundary(&input.buffer, input.cursor) {
                input.cursor = pos;
            }
        }
        KeyCode::Home => input.cursor = 0,
        KeyCode::End => input.cursor = input.buffer.len(),
        KeyCode::Backspace if word => {
            let start = word_boundary_left(&input.buffer, input.cursor);
            input.buffer.drain(start..input.cursor);
            input.cursor = start;
        }
        KeyCode::Backspace => {
            if let Some(pos) = prev_grapheme_boundary(&input.buffer, input.cursor) {
                input.buffer.drain(pos..input.cursor);
                input.cursor = pos;
            }
        }
        KeyCode::Delete => {
            if let Some(pos) = next_grapheme_boundary(&input.buffer, input.cursor) {
                input.buffer.drain(input.cursor..pos);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.buffer.drain(..input.cursor);
            input.cursor = 0;
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.buffer.insert(input.cursor, c);
            input.cursor += c.len_utf8();
        }
        _ => {}
    }
}
