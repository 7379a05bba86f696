use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Error type for project directory operations
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} already exists")]
    DestinationExists(PathBuf),
    #[error("project not found: {0}")]
    NotFound(PathBuf),
    #[error("could not move {from} to {to}: {source}")]
    MoveError {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// A project directory found by a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDir {
    pub name: String,
    pub path: PathBuf,
}

/// List the project directories directly under `root`, sorted by name.
/// The root is created when missing.
pub fn scan_projects(root: &Path, exclude: &[String]) -> Result<Vec<ProjectDir>, ProjectError> {
    if !root.exists() {
        fs::create_dir_all(root).map_err(|e| ProjectError::ReadError {
            path: root.to_path_buf(),
            source: e,
        })?;
    }

    let entries = fs::read_dir(root).map_err(|e| ProjectError::ReadError {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut projects = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ProjectError::ReadError {
            path: root.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        // Names that aren't valid UTF-8 can't be keyed to a todo file
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::warn!("skipping non-UTF-8 directory {}", path.display());
            continue;
        };
        if exclude.iter().any(|e| *e == name) {
            continue;
        }
        projects.push(ProjectDir { name, path });
    }

    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}

/// Move a project directory into `dest_root`, keeping its name.
/// Returns the new path.
pub fn move_project(src: &Path, dest_root: &Path) -> Result<PathBuf, ProjectError> {
    if !src.is_dir() {
        return Err(ProjectError::NotFound(src.to_path_buf()));
    }
    let name = src
        .file_name()
        .ok_or_else(|| ProjectError::NotFound(src.to_path_buf()))?;
    let dest = dest_root.join(name);
    if dest.exists() {
        return Err(ProjectError::DestinationExists(dest));
    }

    fs::create_dir_all(dest_root).map_err(|e| ProjectError::MoveError {
        from: src.to_path_buf(),
        to: dest.clone(),
        source: e,
    })?;

    match fs::rename(src, &dest) {
        Ok(()) => {
            log::info!("moved {} to {}", src.display(), dest.display());
            Ok(dest)
        }
        Err(e) if e.kind() == ErrorKind::CrossesDevices => Err(ProjectError::MoveError {
            from: src.to_path_buf(),
            to: dest,
            source: std::io::Error::other(
                "active and archived trees are on different filesystems",
            ),
        }),
        Err(e) => Err(ProjectError::MoveError {
            from: src.to_path_buf(),
            to: dest,
            source: e,
        }),
    }
}
