use std::path::PathBuf;

use crate::external::{git, github};
use crate::io::projects::{ProjectError, scan_projects};
use crate::io::todo_store::TodoStore;
use crate::model::config::HangarConfig;
use crate::model::project::{Project, TodoCount};

/// Which directory tree is being browsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tree {
    Active,
    Archived,
}

impl Tree {
    pub fn root(self, config: &HangarConfig) -> PathBuf {
        match self {
            Tree::Active => config.active_dir(),
            Tree::Archived => config.archived_dir(),
        }
    }

    pub fn other(self) -> Tree {
        match self {
            Tree::Active => Tree::Archived,
            Tree::Archived => Tree::Active,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tree::Active => "Hangar",
            Tree::Archived => "Stash",
        }
    }
}

/// What to gather for each project row
#[derive(Debug, Clone, Copy)]
pub struct SummaryOptions {
    pub git: bool,
    pub pr_counts: bool,
}

/// Open todo count for a project, degrading unreadable files to a marker
pub fn todo_count(store: &TodoStore, name: &str) -> TodoCount {
    match store.count_open(name) {
        Ok(n) => TodoCount::Open(n),
        Err(e) => {
            log::warn!("{}", e);
            TodoCount::Unreadable
        }
    }
}

/// Scan a tree and build one summary row per project
pub fn load_projects(
    config: &HangarConfig,
    tree: Tree,
    store: &TodoStore,
    options: SummaryOptions,
) -> Result<Vec<Project>, ProjectError> {
    let dirs = scan_projects(&tree.root(config), &config.paths.exclude)?;
    let projects = dirs
        .into_iter()
        .map(|dir| {
            let mut project = Project::new(dir.name, dir.path);
            if options.git {
                project.git = git::git_info(&project.path);
            }
            project.todos = todo_count(store, &project.name);
            if options.pr_counts && project.has_remote() {
                project.pr_count = github::count_open_prs(&project.path);
            }
            project
        })
        .collect();
    Ok(projects)
}
