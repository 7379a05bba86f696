use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- hangar recovery log (append-only)
     Todo lists that could not be written are kept here.
     Safe to delete once the content has been restored. -->

---
";

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

/// Return the path to the recovery log file.
pub fn recovery_log_path(dir: &Path) -> PathBuf {
    dir.join(".recovery.log")
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    // Data must be on disk before the rename makes it visible
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl RecoveryEntry {
    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {} {}\n\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.description,
        );

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push_str("\n```json\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push_str("\n---\n");
        out
    }
}

/// Append a recovery entry to the log. Errors are swallowed and logged.
pub fn log_recovery(dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(dir, entry) {
        log::warn!("could not write to recovery log in {}: {}", dir.display(), e);
    }
}

fn log_recovery_inner(dir: &Path, entry: RecoveryEntry) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let path = recovery_log_path(dir);
    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_entry(description: &str, body: &str) -> RecoveryEntry {
        RecoveryEntry {
            timestamp: Utc::now(),
            description: description.to_string(),
            fields: vec![("Project".to_string(), "demo".to_string())],
            body: body.to_string(),
        }
    }

    #[test]
    fn test_atomic_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.json");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");

        // No temp files left behind
        let count = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_atomic_write_replaces_whole_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.json");
        let big = "x".repeat(256 * 1024);

        atomic_write(&path, big.as_bytes()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().len(), big.len());
        atomic_write(&path, b"{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_atomic_write_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope").join("test.json");
        assert!(atomic_write(&path, b"x").is_err());
    }

    #[test]
    fn test_entry_formatting() {
        let md = make_entry("todo write failed", "{\"items\": []}").to_markdown();
        assert!(md.starts_with("## "));
        assert!(md.contains("Z todo write failed\n"));
        assert!(md.contains("Project: demo\n"));
        assert!(md.contains("```json\n{\"items\": []}\n```\n"));
        assert!(md.ends_with("---\n"));
    }

    #[test]
    fn test_header_written_once() {
        let tmp = TempDir::new().unwrap();
        log_recovery(tmp.path(), make_entry("first", "a"));
        log_recovery(tmp.path(), make_entry("second", "b"));

        let content = std::fs::read_to_string(recovery_log_path(tmp.path())).unwrap();
        assert_eq!(content.matches("hangar recovery log").count(), 1);
        assert!(content.contains("first"));
        assert!(content.contains("second"));
    }

    #[test]
    fn test_recovery_log_path() {
        let path = recovery_log_path(Path::new("/tmp/todos"));
        assert_eq!(path, PathBuf::from("/tmp/todos/.recovery.log"));
    }
}
