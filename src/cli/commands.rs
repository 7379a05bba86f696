use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hangar", about = concat!("hangar v", env!("CARGO_PKG_VERSION"), " - a dashboard for your project checkouts"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects with branch and open todo counts
    Projects(ProjectsArgs),
    /// Show or change a project's todo list
    Todo(TodoCmd),
    /// Move a project to the archive (or back with --restore)
    Mv(MvArgs),
}

#[derive(Args)]
pub struct ProjectsArgs {
    /// List the archived tree instead of the active one
    #[arg(long)]
    pub archived: bool,
}

#[derive(Args)]
pub struct TodoCmd {
    #[command(subcommand)]
    pub action: TodoAction,
}

#[derive(Subcommand)]
pub enum TodoAction {
    /// List a project's todos
    List(ProjectArg),
    /// Append a todo
    Add(TodoAddArgs),
    /// Replace the text of a todo
    Edit(TodoEditArgs),
    /// Delete a todo
    Rm(TodoIndexArgs),
    /// Advance a todo's status (pending -> in_progress -> completed -> pending)
    Toggle(TodoIndexArgs),
}

#[derive(Args)]
pub struct ProjectArg {
    /// Project name
    pub project: String,
}

#[derive(Args)]
pub struct TodoAddArgs {
    /// Project name
    pub project: String,
    /// Todo text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct TodoEditArgs {
    /// Project name
    pub project: String,
    /// Todo number as shown by `todo list` (1-based)
    pub index: usize,
    /// New text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct TodoIndexArgs {
    /// Project name
    pub project: String,
    /// Todo number as shown by `todo list` (1-based)
    pub index: usize,
}

#[derive(Args)]
pub struct MvArgs {
    /// Project name
    pub project: String,
    /// Move from the archive back to the active tree
    #[arg(long)]
    pub restore: bool,
}
