use crate::model::todo::{TodoItem, TodoList, TodoStatus};

/// Error type for todo list operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoError {
    #[error("todo text cannot be empty")]
    InvalidInput,
    #[error("todo index out of range: {0}")]
    IndexOutOfRange(usize),
}

// ---------------------------------------------------------------------------
// Mutations (in memory only; callers persist)
// ---------------------------------------------------------------------------

/// Append a new pending todo. Content is trimmed.
pub fn add_item(list: &mut TodoList, content: &str) -> Result<(), TodoError> {
    let content = validate_content(content)?;
    list.items.push(TodoItem::new(content));
    Ok(())
}

/// Replace the content of the todo at `index`
pub fn edit_item(list: &mut TodoList, index: usize, content: &str) -> Result<(), TodoError> {
    check_index(list, index)?;
    let content = validate_content(content)?;
    list.items[index].content = content;
    Ok(())
}

/// Remove the todo at `index`; later items shift up
pub fn delete_item(list: &mut TodoList, index: usize) -> Result<TodoItem, TodoError> {
    check_index(list, index)?;
    Ok(list.items.remove(index))
}

/// Cycle status: pending → in_progress → completed → pending
pub fn toggle_status(list: &mut TodoList, index: usize) -> Result<TodoStatus, TodoError> {
    check_index(list, index)?;
    let item = &mut list.items[index];
    item.status = item.status.next();
    Ok(item.status)
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Number of todos that are not completed
pub fn count(list: &TodoList) -> usize {
    list.items.iter().filter(|t| t.status.is_open()).count()
}

fn check_index(list: &TodoList, index: usize) -> Result<(), TodoError> {
    if index >= list.items.len() {
        return Err(TodoError::IndexOutOfRange(index));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<String, TodoError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(TodoError::InvalidInput);
    }
    Ok(trimmed.to_string())
}
