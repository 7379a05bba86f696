use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Environment variable holding the log filter (e.g. `HANGAR_LOG=debug`)
pub const LOG_ENV: &str = "HANGAR_LOG";

/// Where log records go
pub enum LogTarget<'a> {
    /// Standard error, for CLI commands
    Stderr,
    /// An append-only file, for the TUI (stderr would draw over the screen)
    File(&'a Path),
}

/// Initialize the global logger. Safe to call more than once.
pub fn init(target: LogTarget) {
    let mut builder = Builder::from_env(Env::default().filter_or(LOG_ENV, "warn"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}] {} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let LogTarget::File(path) = target {
        match open_log_file(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    let _ = builder.try_init();
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
