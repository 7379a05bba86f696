pub mod config_io;
pub mod projects;
pub mod recovery;
pub mod todo_store;
