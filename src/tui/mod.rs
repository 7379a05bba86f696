pub mod app;
pub mod input;
pub mod render;
pub mod theme;
pub mod todo_panel;

pub use app::run;
