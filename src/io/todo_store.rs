use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::recovery::atomic_write;
use crate::model::todo::TodoList;
use crate::ops::todo_ops;

/// Error type for todo persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid project name: {0:?}")]
    InvalidProjectName(String),
    #[error("todo file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not encode todos for {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}

/// Per-project todo lists stored as `{dir}/{project}.json`
#[derive(Debug, Clone)]
pub struct TodoStore {
    dir: PathBuf,
}

impl TodoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TodoStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a project's todo file. The name is used verbatim.
    pub fn path_for(&self, project: &str) -> Result<PathBuf, StoreError> {
        validate_project_name(project)?;
        Ok(self.dir.join(format!("{}.json", project)))
    }

    /// Load a project's todos. A missing file is an empty list.
    pub fn load(&self, project: &str) -> Result<TodoList, StoreError> {
        let path = self.path_for(project)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TodoList::new()),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(StoreError::Corrupt {
                    path,
                    reason: "not valid UTF-8".to_string(),
                });
            }
            Err(e) => return Err(StoreError::Read { path, source: e }),
        };
        parse_todo_list(&text).map_err(|reason| StoreError::Corrupt { path, reason })
    }

    /// Overwrite a project's todo file with `list`
    pub fn save(&self, project: &str, list: &TodoList) -> Result<(), StoreError> {
        let path = self.path_for(project)?;
        let content = serialize_todo_list(list).map_err(|e| StoreError::Encode {
            path: path.clone(),
            source: e,
        })?;
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Write {
            path: self.dir.clone(),
            source: e,
        })?;
        atomic_write(&path, content.as_bytes())
            .map_err(|e| StoreError::Write { path, source: e })?;
        log::debug!("saved {} todos for {}", list.len(), project);
        Ok(())
    }

    /// Number of open (not completed) todos for a project
    pub fn count_open(&self, project: &str) -> Result<usize, StoreError> {
        Ok(todo_ops::count(&self.load(project)?))
    }
}

/// Parse the contents of a todo file, rejecting anything that is not
/// exactly `{"items": [{"content": .., "status": ..}, ..]}`.
pub fn parse_todo_list(text: &str) -> Result<TodoList, String> {
    let list: TodoList = serde_json::from_str(text).map_err(|e| e.to_string())?;
    if let Some(i) = list.items.iter().position(|t| t.content.trim().is_empty()) {
        return Err(format!("item {} has empty content", i));
    }
    Ok(list)
}

/// Serialize a todo list as pretty JSON with a trailing newline
pub fn serialize_todo_list(list: &TodoList) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(list)?;
    out.push('\n');
    Ok(out)
}

/// Reject names that would escape the todos directory or are not a file name
pub fn validate_project_name(name: &str) -> Result<(), StoreError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(StoreError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}
