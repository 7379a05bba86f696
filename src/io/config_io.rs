use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::model::config::{HangarConfig, home_dir};

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"));
    config_dir.join("hangar").join("config.toml")
}

/// Get the directory for runtime state (the log file), respecting XDG_STATE_HOME
pub fn state_dir() -> PathBuf {
    let state_dir = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("state"));
    state_dir.join("hangar")
}

/// Read the config from `path`. A missing file gives the defaults.
pub fn read_config_from(path: &Path) -> Result<HangarConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(HangarConfig::default());
        }
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    toml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read the config from `--config` if given, else the default location
pub fn read_config(override_path: Option<&Path>) -> Result<HangarConfig, ConfigError> {
    match override_path {
        Some(path) => read_config_from(path),
        None => read_config_from(&config_path()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.paths.active, "~/Hangar");
    }

    #[test]
    fn test_read_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r##"
[paths]
active = "/work/active"
archived = "/work/archive"
exclude = ["node_modules"]

[launch]
editor = "hx"

[github]
pr_counts = false

[ui.colors]
highlight = "#112233"
"##,
        )
        .unwrap();

        let config = read_config(Some(&path)).unwrap();
        assert_eq!(config.active_dir(), PathBuf::from("/work/active"));
        assert_eq!(config.archived_dir(), PathBuf::from("/work/archive"));
        assert_eq!(config.paths.exclude, vec!["node_modules"]);
        assert_eq!(config.launch.editor, "hx");
        assert_eq!(config.launch.agent, "claude");
        assert!(!config.github.pr_counts);
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#112233");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "not valid toml [[[").unwrap();
        assert!(matches!(
            read_config_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[github]\npr_counts = \"yes\"\n").unwrap();
        assert!(read_config_from(&path).is_err());
    }
}
