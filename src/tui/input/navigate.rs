use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent};

use crate::external::{git, github, tmux};
use crate::io::projects::move_project;
use crate::tui::app::{App, MessageKind, Mode, StatusInfo};

/// Recent commits listed in the status popup
const STATUS_COMMITS: usize = 5;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Home => app.cursor = 0,
        KeyCode::End => {
            app.cursor = usize::MAX;
            app.clamp_cursor();
        }
        KeyCode::Enter => open_workspace(app),
        KeyCode::Char('c') => {
            let agent = app.config.launch.agent.clone();
            open_with(app, &agent);
        }
        KeyCode::Char('l') => {
            let git_ui = app.config.launch.git_ui.clone();
            open_with(app, &git_ui);
        }
        KeyCode::Char('n') => {
            let editor = app.config.launch.editor.clone();
            open_with(app, &editor);
        }
        KeyCode::Char('g') => open_github(app, "PRs", github::open_prs_in_browser),
        KeyCode::Char('G') => open_github(app, "repo", github::open_repo),
        KeyCode::Char('t') => open_todos(app),
        KeyCode::Char('s') => open_status(app),
        KeyCode::Char('m') => move_selected(app),
        KeyCode::Tab => app.switch_tree(),
        KeyCode::Char('r') => {
            app.refresh();
            app.set_message(MessageKind::Info, "Refreshed");
        }
        KeyCode::Char('/') => {
            app.mode = Mode::Filter;
            app.filter_input = app.filter.clone().unwrap_or_default();
        }
        KeyCode::Esc => {
            if app.filter.take().is_some() {
                app.clamp_cursor();
            }
        }
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}

fn open_workspace(app: &mut App) {
    let Some(project) = app.selected_project() else {
        return;
    };
    let name = project.name.clone();
    let result = tmux::open_workspace(
        &name,
        &project.path,
        &app.config.launch.agent,
        &app.config.launch.editor,
    );
    match result {
        Ok(()) => app.set_message(MessageKind::Info, format!("Opened {} in tmux", name)),
        Err(e) => app.set_message(MessageKind::Error, format!("Failed to open {}: {}", name, e)),
    }
}

fn open_with(app: &mut App, command: &str) {
    let Some(project) = app.selected_project() else {
        return;
    };
    let name = project.name.clone();
    match tmux::open_with(&name, &project.path, command) {
        Ok(()) => app.set_message(
            MessageKind::Info,
            format!("Opened {} with {}", name, command),
        ),
        Err(e) => app.set_message(
            MessageKind::Error,
            format!("Failed to open {}: {}", command, e),
        ),
    }
}

/// Open a GitHub page for the selected project with `opener`
fn open_github(app: &mut App, page: &str, opener: fn(&Path) -> bool) {
    let Some(project) = app.selected_project() else {
        return;
    };
    if !project.has_remote() {
        app.set_message(MessageKind::Warning, "No GitHub remote");
        return;
    }
    let name = project.name.clone();
    if opener(&project.path) {
        app.set_message(MessageKind::Info, format!("Opening {} {}", name, page));
    } else {
        app.set_message(MessageKind::Error, format!("Failed to open GitHub {}", page));
    }
}

fn open_todos(app: &mut App) {
    let Some(project) = app.selected_project() else {
        return;
    };
    let name = project.name.clone();
    if let Err(e) = app.todos.open(&name) {
        app.set_message(MessageKind::Warning, format!("{} (read-only)", e));
    }
}

fn open_status(app: &mut App) {
    let Some(project) = app.selected_project() else {
        return;
    };
    let commits = if project.git.status.is_repo() {
        git::recent_commits(&project.path, STATUS_COMMITS)
    } else {
        Vec::new()
    };
    let prs = if project.has_remote() {
        github::open_prs(&project.path)
    } else {
        Vec::new()
    };
    app.status = Some(StatusInfo {
        name: project.name.clone(),
        git: project.git.clone(),
        commits,
        prs,
    });
}

fn move_selected(app: &mut App) {
    let Some(project) = app.selected_project() else {
        return;
    };
    let name = project.name.clone();
    let dest = app.tree.other();
    match move_project(&project.path, &dest.root(&app.config)) {
        Ok(_) => {
            app.refresh();
            app.set_message(
                MessageKind::Info,
                format!("Moved {} to {}", name, dest.label()),
            );
        }
        Err(e) => app.set_message(MessageKind::Error, format!("Failed to move: {}", e)),
    }
}
