use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, InputPurpose, MessageKind, TextInput};
use crate::tui::todo_panel::PanelError;

/// Keys inside the todo popup
pub(super) fn handle_todo_popup(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => close(app),
        KeyCode::Char('j') | KeyCode::Down => app.todos.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.todos.move_cursor(-1),
        KeyCode::Home => app.todos.select_first(),
        KeyCode::End => app.todos.select_last(),
        KeyCode::Char('a') => {
            if refuse_read_only(app) {
                return;
            }
            app.text_input = Some(TextInput::new(InputPurpose::AddTodo, ""));
        }
        KeyCode::Char('e') => {
            if refuse_read_only(app) {
                return;
            }
            if let Some(item) = app.todos.selected_item() {
                let input = TextInput::new(InputPurpose::EditTodo, &item.content);
                app.text_input = Some(input);
            }
        }
        KeyCode::Char('d') => {
            let result = app.todos.delete_todo().map(|_| ());
            report(app, result);
        }
        KeyCode::Char(' ') => {
            let result = app.todos.toggle_selected().map(|_| ());
            report(app, result);
        }
        _ => {}
    }
}

/// Apply a submitted text input to the open list
pub(super) fn submit(app: &mut App, purpose: InputPurpose, text: &str) {
    let result = match purpose {
        InputPurpose::AddTodo => app.todos.add_todo(text),
        InputPurpose::EditTodo => app.todos.edit_todo(text),
    };
    report(app, result);
}

fn close(app: &mut App) {
    let project = app.todos.open_panel().map(|p| p.project.clone());
    app.todos.close();
    if let Some(name) = project {
        app.refresh_todo_count(&name);
    }
}

fn refuse_read_only(app: &mut App) -> bool {
    let read_only = app.todos.open_panel().is_some_and(|p| p.read_only);
    if read_only {
        app.set_message(MessageKind::Warning, PanelError::ReadOnly.to_string());
    }
    read_only
}

fn report(app: &mut App, result: Result<(), PanelError>) {
    if let Err(e) = result {
        let kind = match e {
            PanelError::Save(_) => MessageKind::Error,
            _ => MessageKind::Warning,
        };
        app.set_message(kind, e.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::todo::TodoStatus;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::app_with_projects;
    use pretty_assertions::assert_eq;

    fn contents(app: &App) -> Vec<(String, TodoStatus)> {
        app.todos
            .open_panel()
            .unwrap()
            .list
            .items
            .iter()
            .map(|t| (t.content.clone(), t.status))
            .collect()
    }

    fn add(app: &mut App, text: &str) {
        handle_key(app, ch('a'));
        type_text(app, text);
        handle_key(app, key(KeyCode::Enter));
    }

    #[test]
    fn test_add_toggle_delete() {
        let (_tmp, mut app) = app_with_projects(&["demo"]);
        handle_key(&mut app, ch('t'));
        add(&mut app, "first");
        add(&mut app, "second");
        assert_eq!(app.todos.cursor(), Some(1));

        handle_key(&mut app, ch(' '));
        handle_key(&mut app, ch('k'));
        handle_key(&mut app, ch('d'));
        assert_eq!(
            contents(&app),
            vec![("second".to_string(), TodoStatus::InProgress)]
        );
    }

    #[test]
    fn test_edit_prefills_selected_text() {
        let (_tmp, mut app) = app_with_projects(&["demo"]);
        handle_key(&mut app, ch('t'));
        add(&mut app, "draft");
        handle_key(&mut app, ch('e'));
        assert_eq!(app.text_input.as_ref().unwrap().buffer, "draft");
        type_text(&mut app, " two");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(contents(&app)[0].0, "draft two");
    }

    #[test]
    fn test_edit_on_empty_list_does_nothing() {
        let (_tmp, mut app) = app_with_projects(&["demo"]);
        handle_key(&mut app, ch('t'));
        handle_key(&mut app, ch('e'));
        assert!(app.text_input.is_none());
        handle_key(&mut app, ch('d'));
        handle_key(&mut app, ch(' '));
        assert!(app.message.is_none());
    }

    #[test]
    fn test_blank_add_reports_invalid_input() {
        let (_tmp, mut app) = app_with_projects(&["demo"]);
        handle_key(&mut app, ch('t'));
        add(&mut app, "   ");
        assert!(contents(&app).is_empty());
        assert_eq!(app.message.as_ref().unwrap().kind, MessageKind::Warning);
    }

    #[test]
    fn test_corrupt_file_is_read_only() {
        let (_tmp, mut app) = app_with_projects(&["demo"]);
        let path = app.todos.store().path_for("demo").unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        handle_key(&mut app, ch('t'));
        assert!(app.todos.is_open());
        assert_eq!(app.message.as_ref().unwrap().kind, MessageKind::Warning);

        handle_key(&mut app, ch('a'));
        assert!(app.text_input.is_none());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }
}
