pub mod dashboard;
pub mod todo_ops;
