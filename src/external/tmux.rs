use std::path::Path;

use super::process::run_status;

/// Error type for tmux launches
#[derive(Debug, thiserror::Error)]
pub enum TmuxError {
    #[error("not running inside tmux")]
    NotInTmux,
    #[error("tmux {0} failed")]
    CommandFailed(&'static str),
}

/// Whether this process is running inside a tmux session
pub fn inside_tmux() -> bool {
    std::env::var_os("TMUX").is_some_and(|v| !v.is_empty())
}

/// Open a project as a new tmux window: `agent` on the left, `editor .` on
/// the right.
pub fn open_workspace(name: &str, path: &Path, agent: &str, editor: &str) -> Result<(), TmuxError> {
    if !inside_tmux() {
        return Err(TmuxError::NotInTmux);
    }
    let dir = path.to_string_lossy();
    let editor_cmd = format!("{} .", editor);

    step("new-window", &["new-window", "-n", name, "-c", &dir])?;
    step(
        "split-window",
        &["split-window", "-h", "-c", &dir, &editor_cmd],
    )?;
    step("select-pane", &["select-pane", "-L"])?;
    step("send-keys", &["send-keys", agent, "Enter"])?;
    log::info!("opened {} workspace in tmux", name);
    Ok(())
}

/// Open a project in a new tmux window running a single command
pub fn open_with(name: &str, path: &Path, command: &str) -> Result<(), TmuxError> {
    if !inside_tmux() {
        return Err(TmuxError::NotInTmux);
    }
    let dir = path.to_string_lossy();
    step("new-window", &["new-window", "-n", name, "-c", &dir, command])?;
    log::info!("opened {} in tmux with {}", name, command);
    Ok(())
}

fn step(label: &'static str, args: &[&str]) -> Result<(), TmuxError> {
    if run_status("tmux", args) {
        Ok(())
    } else {
        Err(TmuxError::CommandFailed(label))
    }
}
