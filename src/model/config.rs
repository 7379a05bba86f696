use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HangarConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub launch: LaunchConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Tree holding active projects
    #[serde(default = "default_active")]
    pub active: String,
    /// Tree holding archived projects
    #[serde(default = "default_archived")]
    pub archived: String,
    /// Todo directory. Defaults to `{active}/.claude/todos`.
    #[serde(default)]
    pub todos: Option<String>,
    /// Directory names never listed as projects
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            active: default_active(),
            archived: default_archived(),
            todos: None,
            exclude: default_exclude(),
        }
    }
}

fn default_active() -> String {
    "~/Hangar".to_string()
}

fn default_archived() -> String {
    "~/Stash".to_string()
}

fn default_exclude() -> Vec<String> {
    vec![".claude".into(), ".DS_Store".into(), ".git".into()]
}

/// Commands started in tmux windows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    #[serde(default = "default_agent")]
    pub agent: String,
    #[serde(default = "default_editor")]
    pub editor: String,
    #[serde(default = "default_git_ui")]
    pub git_ui: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        LaunchConfig {
            agent: default_agent(),
            editor: default_editor(),
            git_ui: default_git_ui(),
        }
    }
}

fn default_agent() -> String {
    "claude".to_string()
}

fn default_editor() -> String {
    "nvim".to_string()
}

fn default_git_ui() -> String {
    "lazygit".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Query `gh` for open PR counts during a refresh
    #[serde(default = "default_true")]
    pub pr_counts: bool,
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig { pr_counts: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl HangarConfig {
    pub fn active_dir(&self) -> PathBuf {
        expand_home(&self.paths.active)
    }

    pub fn archived_dir(&self) -> PathBuf {
        expand_home(&self.paths.archived)
    }

    pub fn todos_dir(&self) -> PathBuf {
        match &self.paths.todos {
            Some(dir) => expand_home(dir),
            None => self.active_dir().join(".claude").join("todos"),
        }
    }
}

/// Expand a leading `~` to `$HOME`
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => Path::new(path).to_path_buf(),
    }
}

/// Get the user's home directory
pub fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: HangarConfig = toml::from_str("").unwrap();
        assert_eq!(config.paths.active, "~/Hangar");
        assert_eq!(config.paths.archived, "~/Stash");
        assert!(config.paths.todos.is_none());
        assert_eq!(config.paths.exclude, vec![".claude", ".DS_Store", ".git"]);
        assert_eq!(config.launch.agent, "claude");
        assert_eq!(config.launch.editor, "nvim");
        assert_eq!(config.launch.git_ui, "lazygit");
        assert!(config.github.pr_counts);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn todos_dir_defaults_under_active() {
        let config: HangarConfig = toml::from_str(
            r#"
[paths]
active = "/srv/hangar"
"#,
        )
        .unwrap();
        assert_eq!(config.todos_dir(), PathBuf::from("/srv/hangar/.claude/todos"));
    }

    #[test]
    fn explicit_todos_dir_wins() {
        let config: HangarConfig = toml::from_str(
            r#"
[paths]
active = "/srv/hangar"
todos = "/var/todos"
"#,
        )
        .unwrap();
        assert_eq!(config.todos_dir(), PathBuf::from("/var/todos"));
    }

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        let home = home_dir();
        assert_eq!(expand_home("~/Hangar"), home.join("Hangar"));
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("/abs/~/x"), PathBuf::from("/abs/~/x"));
        assert_eq!(expand_home("rel"), PathBuf::from("rel"));
    }
}
