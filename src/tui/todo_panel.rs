//! Controller for the todo popup: one project's list plus a cursor.
//!
//! Every mutating intent runs to completion before returning: the list is
//! changed in memory, then written through the [`TodoStore`]. A failed write
//! keeps the in-memory change so the next successful write includes it.

use chrono::Utc;

use crate::io::recovery::{RecoveryEntry, log_recovery};
use crate::io::todo_store::{StoreError, TodoStore, serialize_todo_list};
use crate::model::todo::{TodoItem, TodoList, TodoStatus};
use crate::ops::todo_ops::{self, TodoError};

/// Error type for panel intents
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("no todo list is open")]
    Closed,
    #[error("todo file could not be read, editing is disabled")]
    ReadOnly,
    #[error(transparent)]
    Todo(#[from] TodoError),
    #[error("{0} (changes kept until the next save)")]
    Save(#[from] StoreError),
}

/// An open project's todo list
#[derive(Debug, Clone)]
pub struct OpenPanel {
    pub project: String,
    pub list: TodoList,
    /// Selected index, `None` when the list is empty
    pub cursor: Option<usize>,
    /// Set when the file exists but could not be read; it is never overwritten
    pub read_only: bool,
}

#[derive(Debug, Clone)]
pub enum PanelState {
    Closed,
    Open(OpenPanel),
}

#[derive(Debug, Clone)]
pub struct TodoPanel {
    store: TodoStore,
    state: PanelState,
}

impl TodoPanel {
    pub fn new(store: TodoStore) -> Self {
        TodoPanel {
            store,
            state: PanelState::Closed,
        }
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Open(_))
    }

    pub fn open_panel(&self) -> Option<&OpenPanel> {
        match &self.state {
            PanelState::Open(panel) => Some(panel),
            PanelState::Closed => None,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.open_panel().and_then(|p| p.cursor)
    }

    pub fn selected_item(&self) -> Option<&TodoItem> {
        let panel = self.open_panel()?;
        panel.list.items.get(panel.cursor?)
    }

    /// Load a project's list and show it.
    ///
    /// The panel is open after this call either way. When the file can't be
    /// read the panel shows an empty, read-only list and the error is
    /// returned as a warning.
    pub fn open(&mut self, project: &str) -> Result<(), StoreError> {
        let (list, read_only, result) = match self.store.load(project) {
            Ok(list) => (list, false, Ok(())),
            Err(e) => {
                log::warn!("opening todos for {}: {}", project, e);
                (TodoList::new(), true, Err(e))
            }
        };
        let cursor = if list.is_empty() { None } else { Some(0) };
        self.state = PanelState::Open(OpenPanel {
            project: project.to_string(),
            list,
            cursor,
            read_only,
        });
        result
    }

    /// Discard the in-memory list. Nothing is written.
    pub fn close(&mut self) {
        self.state = PanelState::Closed;
    }

    /// Move the cursor by `delta`, clamped to the list
    pub fn move_cursor(&mut self, delta: isize) {
        if let PanelState::Open(panel) = &mut self.state
            && let Some(cur) = panel.cursor
        {
            let last = panel.list.len().saturating_sub(1);
            panel.cursor = Some(cur.saturating_add_signed(delta).min(last));
        }
    }

    pub fn select_first(&mut self) {
        if let PanelState::Open(panel) = &mut self.state
            && !panel.list.is_empty()
        {
            panel.cursor = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if let PanelState::Open(panel) = &mut self.state
            && !panel.list.is_empty()
        {
            panel.cursor = Some(panel.list.len() - 1);
        }
    }

    /// Append a todo and select it
    pub fn add_todo(&mut self, text: &str) -> Result<(), PanelError> {
        let panel = writable(&mut self.state)?;
        todo_ops::add_item(&mut panel.list, text)?;
        panel.cursor = Some(panel.list.len() - 1);
        persist(&self.store, panel)
    }

    /// Replace the selected todo's text
    pub fn edit_todo(&mut self, text: &str) -> Result<(), PanelError> {
        let panel = writable(&mut self.state)?;
        let Some(index) = panel.cursor else {
            return Ok(());
        };
        todo_ops::edit_item(&mut panel.list, index, text)?;
        persist(&self.store, panel)
    }

    /// Delete the selected todo. The cursor stays in range.
    pub fn delete_todo(&mut self) -> Result<Option<TodoItem>, PanelError> {
        let panel = writable(&mut self.state)?;
        let Some(index) = panel.cursor else {
            return Ok(None);
        };
        let removed = todo_ops::delete_item(&mut panel.list, index)?;
        panel.cursor = match panel.list.len() {
            0 => None,
            len => Some(index.min(len - 1)),
        };
        persist(&self.store, panel)?;
        Ok(Some(removed))
    }

    /// Advance the selected todo's status
    pub fn toggle_selected(&mut self) -> Result<Option<TodoStatus>, PanelError> {
        let panel = writable(&mut self.state)?;
        let Some(index) = panel.cursor else {
            return Ok(None);
        };
        let status = todo_ops::toggle_status(&mut panel.list, index)?;
        persist(&self.store, panel)?;
        Ok(Some(status))
    }
}

fn writable(state: &mut PanelState) -> Result<&mut OpenPanel, PanelError> {
    match state {
        PanelState::Closed => Err(PanelError::Closed),
        PanelState::Open(panel) if panel.read_only => Err(PanelError::ReadOnly),
        PanelState::Open(panel) => Ok(panel),
    }
}

fn persist(store: &TodoStore, panel: &OpenPanel) -> Result<(), PanelError> {
    if let Err(e) = store.save(&panel.project, &panel.list) {
        log::error!("{}", e);
        log_recovery(
            store.dir(),
            RecoveryEntry {
                timestamp: Utc::now(),
                description: "todo write failed".to_string(),
                fields: vec![
                    ("Project".to_string(), panel.project.clone()),
                    ("Error".to_string(), e.to_string()),
                ],
                body: serialize_todo_list(&panel.list)
                    .unwrap_or_else(|_| format!("{:#?}", panel.list)),
            },
        );
        return Err(PanelError::Save(e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn panel() -> (TempDir, TodoPanel) {
        let tmp = TempDir::new().unwrap();
        let store = TodoStore::new(tmp.path().join("todos"));
        (tmp, TodoPanel::new(store))
    }

    fn contents(panel: &TodoPanel) -> Vec<String> {
        panel
            .open_panel()
            .unwrap()
            .list
            .items
            .iter()
            .map(|t| t.content.clone())
            .collect()
    }

    fn file_json(panel: &TodoPanel, project: &str) -> serde_json::Value {
        let path = panel.store().path_for(project).unwrap();
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn add_then_toggle_persists_in_progress() {
        let (_tmp, mut panel) = panel();
        panel.open("demo").unwrap();
        assert_eq!(panel.cursor(), None);

        panel.add_todo("write docs").unwrap();
        panel.toggle_selected().unwrap();

        assert_eq!(
            file_json(&panel, "demo"),
            serde_json::json!({
                "items": [{ "content": "write docs", "status": "in_progress" }]
            })
        );
    }

    #[test]
    fn open_missing_file_is_empty_and_writes_nothing() {
        let (_tmp, mut panel) = panel();
        panel.open("fresh").unwrap();
        assert!(panel.is_open());
        assert!(panel.open_panel().unwrap().list.is_empty());
        panel.close();
        assert!(!panel.store().path_for("fresh").unwrap().exists());
    }

    #[test]
    fn open_resets_cursor_to_first_item() {
        let (_tmp, mut panel) = panel();
        panel.open("demo").unwrap();
        panel.add_todo("A").unwrap();
        panel.add_todo("B").unwrap();
        assert_eq!(panel.cursor(), Some(1));
        panel.close();

        panel.open("demo").unwrap();
        assert_eq!(panel.cursor(), Some(0));
        assert_eq!(contents(&panel), vec!["A", "B"]);
    }

    #[test]
    fn move_cursor_clamps() {
        let (_tmp, mut panel) = panel();
        panel.open("demo").unwrap();
        panel.move_cursor(1);
        assert_eq!(panel.cursor(), None);

        for t in ["A", "B", "C"] {
            panel.add_todo(t).unwrap();
        }
        panel.select_first();
        panel.move_cursor(-1);
        assert_eq!(panel.cursor(), Some(0));
        panel.move_cursor(5);
        assert_eq!(panel.cursor(), Some(2));
        panel.move_cursor(-1);
        assert_eq!(panel.cursor(), Some(1));
        panel.select_last();
        assert_eq!(panel.cursor(), Some(2));
    }

    #[test]
    fn delete_clamps_cursor() {
        let (_tmp, mut panel) = panel();
        panel.open("demo").unwrap();
        for t in ["A", "B", "C"] {
            panel.add_todo(t).unwrap();
        }

        // Deleting the last item moves the cursor to the new last
        let removed = panel.delete_todo().unwrap().unwrap();
        assert_eq!(removed.content, "C");
        assert_eq!(panel.cursor(), Some(1));

        // Deleting in the middle keeps the index
        panel.select_first();
        panel.delete_todo().unwrap();
        assert_eq!(contents(&panel), vec!["B"]);
        assert_eq!(panel.cursor(), Some(0));

        panel.delete_todo().unwrap();
        assert_eq!(panel.cursor(), None);
        assert_eq!(panel.delete_todo().unwrap(), None);
        assert_eq!(file_json(&panel, "demo"), serde_json::json!({ "items": [] }));
    }

    #[test]
    fn delete_middle_preserves_order_on_disk() {
        let (_tmp, mut panel) = panel();
        panel.open("demo").unwrap();
        for t in ["A", "B", "C"] {
            panel.add_todo(t).unwrap();
        }
        panel.select_first();
        panel.move_cursor(1);
        panel.delete_todo().unwrap();

        panel.close();
        panel.open("demo").unwrap();
        assert_eq!(contents(&panel), vec!["A", "C"]);
    }

    #[test]
    fn edit_selected() {
        let (_tmp, mut panel) = panel();
        panel.open("demo").unwrap();
        panel.add_todo("draft").unwrap();
        panel.edit_todo("  final  ").unwrap();
        assert_eq!(panel.selected_item().unwrap().content, "final");
        assert_eq!(file_json(&panel, "demo")["items"][0]["content"], "final");
    }

    #[test]
    fn invalid_input_changes_nothing() {
        let (_tmp, mut panel) = panel();
        panel.open("demo").unwrap();
        panel.add_todo("keep").unwrap();
        let before = fs::read_to_string(panel.store().path_for("demo").unwrap()).unwrap();

        assert!(matches!(
            panel.add_todo("   "),
            Err(PanelError::Todo(TodoError::InvalidInput))
        ));
        assert!(matches!(
            panel.edit_todo(""),
            Err(PanelError::Todo(TodoError::InvalidInput))
        ));
        assert_eq!(contents(&panel), vec!["keep"]);
        assert_eq!(panel.cursor(), Some(0));
        let after = fs::read_to_string(panel.store().path_for("demo").unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn empty_list_intents_are_noops() {
        let (_tmp, mut panel) = panel();
        panel.open("demo").unwrap();
        panel.edit_todo("x").unwrap();
        assert_eq!(panel.toggle_selected().unwrap(), None);
        assert_eq!(panel.delete_todo().unwrap(), None);
        assert!(!panel.store().path_for("demo").unwrap().exists());
    }

    #[test]
    fn closed_panel_rejects_intents() {
        let (_tmp, mut panel) = panel();
        assert!(matches!(panel.add_todo("x"), Err(PanelError::Closed)));
        assert!(matches!(panel.toggle_selected(), Err(PanelError::Closed)));
        panel.move_cursor(1);
        assert_eq!(panel.cursor(), None);
    }

    #[test]
    fn corrupt_file_opens_read_only_and_is_never_overwritten() {
        let (_tmp, mut panel) = panel();
        let path = panel.store().path_for("demo").unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{\"items\": [oops").unwrap();

        let err = panel.open("demo").unwrap_err();
        assert!(err.is_corrupt());
        let open = panel.open_panel().unwrap();
        assert!(open.read_only);
        assert!(open.list.is_empty());

        assert!(matches!(panel.add_todo("x"), Err(PanelError::ReadOnly)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"items\": [oops");
    }

    #[test]
    fn failed_save_keeps_change_for_next_save() {
        let tmp = TempDir::new().unwrap();
        let todos = tmp.path().join("todos");
        let mut panel = TodoPanel::new(TodoStore::new(&todos));
        panel.open("demo").unwrap();
        assert!(!panel.open_panel().unwrap().read_only);

        // A file where the todos directory should be makes every save fail
        fs::write(&todos, "").unwrap();

        assert!(matches!(panel.add_todo("first"), Err(PanelError::Save(_))));
        assert_eq!(contents(&panel), vec!["first"]);

        fs::remove_file(&todos).unwrap();
        panel.add_todo("second").unwrap();
        assert_eq!(
            file_json(&panel, "demo"),
            serde_json::json!({
                "items": [
                    { "content": "first", "status": "pending" },
                    { "content": "second", "status": "pending" }
                ]
            })
        );
    }

    #[test]
    fn failed_save_lands_in_recovery_log() {
        let tmp = TempDir::new().unwrap();
        let todos = tmp.path().join("todos");
        fs::create_dir_all(&todos).unwrap();
        // A directory squatting on the todo file path makes the rename fail
        fs::create_dir_all(todos.join("demo.json")).unwrap();
        let mut panel = TodoPanel::new(TodoStore::new(&todos));
        let _ = panel.open("demo");

        // Reading a directory fails, so the panel is read-only; clear it to
        // exercise the write path
        if let PanelState::Open(p) = &mut panel.state {
            p.read_only = false;
        }
        assert!(matches!(panel.add_todo("unsaved"), Err(PanelError::Save(_))));

        let log = fs::read_to_string(crate::io::recovery::recovery_log_path(&todos)).unwrap();
        assert!(log.contains("todo write failed"));
        assert!(log.contains("Project: demo"));
        assert!(log.contains("\"unsaved\""));
    }
}
