use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Working tree state of a project checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GitStatus {
    Clean,
    Dirty,
    #[default]
    NoGit,
}

impl GitStatus {
    pub fn icon(self) -> &'static str {
        match self {
            GitStatus::Clean => "\u{2713}",
            GitStatus::Dirty => "\u{25CF}",
            GitStatus::NoGit => "\u{25CB}",
        }
    }

    pub fn is_repo(self) -> bool {
        self != GitStatus::NoGit
    }
}

/// Summary read from the project's git repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitInfo {
    pub status: GitStatus,
    pub branch: Option<String>,
    pub last_commit_date: Option<DateTime<FixedOffset>>,
    pub last_commit_message: Option<String>,
    pub remote_url: Option<String>,
    pub uncommitted_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Abbreviated (7 char) hash
    pub hash: String,
    pub message: String,
    pub date: Option<DateTime<FixedOffset>>,
    pub author: String,
}

/// An open pull request as reported by `gh pr list --json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(rename = "headRefName", default)]
    pub head_ref_name: String,
    #[serde(default)]
    pub url: String,
}

/// Open todo count for a project, or a marker that its file could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoCount {
    Open(usize),
    Unreadable,
}

impl Default for TodoCount {
    fn default() -> Self {
        TodoCount::Open(0)
    }
}

/// One row of the project list
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub path: PathBuf,
    pub git: GitInfo,
    pub todos: TodoCount,
    pub pr_count: usize,
}

impl Project {
    pub fn new(name: String, path: PathBuf) -> Self {
        Project {
            name,
            path,
            git: GitInfo::default(),
            todos: TodoCount::default(),
            pr_count: 0,
        }
    }

    pub fn has_remote(&self) -> bool {
        self.git.remote_url.is_some()
    }
}
