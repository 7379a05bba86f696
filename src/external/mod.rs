//! Thin wrappers over the command-line tools the dashboard drives:
//! `git`, `gh` and `tmux`.

pub mod git;
pub mod github;
pub mod process;
pub mod tmux;
