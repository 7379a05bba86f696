use serde::Serialize;

use crate::model::project::{Project, TodoCount};
use crate::model::todo::{TodoItem, TodoStatus};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProjectJson {
    pub name: String,
    pub path: String,
    pub git: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<String>,
    /// `null` when the todo file could not be read
    pub open_todos: Option<usize>,
}

#[derive(Serialize)]
pub struct TodoItemJson {
    pub index: usize,
    pub content: String,
    pub status: TodoStatus,
}

#[derive(Serialize)]
pub struct TodoListJson {
    pub project: String,
    pub todos: Vec<TodoItemJson>,
}

#[derive(Serialize)]
pub struct MoveJson {
    pub project: String,
    pub to: String,
}

pub fn project_to_json(project: &Project) -> ProjectJson {
    ProjectJson {
        name: project.name.clone(),
        path: project.path.display().to_string(),
        git: git_label(project).to_string(),
        branch: project.git.branch.clone(),
        last_commit: project
            .git
            .last_commit_date
            .map(|d| d.format("%Y-%m-%d").to_string()),
        open_todos: match project.todos {
            TodoCount::Open(n) => Some(n),
            TodoCount::Unreadable => None,
        },
    }
}

pub fn todo_list_to_json(project: &str, items: &[TodoItem]) -> TodoListJson {
    TodoListJson {
        project: project.to_string(),
        todos: items
            .iter()
            .enumerate()
            .map(|(i, item)| TodoItemJson {
                index: i + 1,
                content: item.content.clone(),
                status: item.status,
            })
            .collect(),
    }
}

fn git_label(project: &Project) -> &'static str {
    use crate::model::project::GitStatus;
    match project.git.status {
        GitStatus::Clean => "clean",
        GitStatus::Dirty => "dirty",
        GitStatus::NoGit => "none",
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `  3  [~] write the docs` style line for a todo
pub fn format_todo_line(index: usize, item: &TodoItem) -> String {
    let mark = match item.status {
        TodoStatus::Pending => "[ ]",
        TodoStatus::InProgress => "[~]",
        TodoStatus::Completed => "[x]",
    };
    format!("{:>3}  {} {}", index, mark, item.content)
}

/// One line per project: icon, name, branch, open todos
pub fn format_project_line(project: &Project, name_width: usize) -> String {
    let todos = match project.todos {
        TodoCount::Open(0) => "-".to_string(),
        TodoCount::Open(n) => n.to_string(),
        TodoCount::Unreadable => "!".to_string(),
    };
    let line = format!(
        "{} {:<name_w$}  {:<16}  {:>5}",
        project.git.status.icon(),
        project.name,
        project.git.branch.as_deref().unwrap_or("-"),
        todos,
        name_w = name_width,
    );
    line.trim_end().to_string()
}
