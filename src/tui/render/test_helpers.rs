use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::model::config::HangarConfig;
use crate::ops::dashboard::SummaryOptions;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Config whose trees live under `tmp`: `Hangar/`, `Stash/`, todos in
/// `Hangar/.claude/todos`.
pub fn config_in(tmp: &TempDir) -> HangarConfig {
    let mut config = HangarConfig::default();
    config.paths.active = tmp.path().join("Hangar").to_string_lossy().into_owned();
    config.paths.archived = tmp.path().join("Stash").to_string_lossy().into_owned();
    config
}

/// An App over a temp active tree holding one empty directory per name.
/// Git and PR lookups are off.
pub fn app_with_projects(names: &[&str]) -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    let config = config_in(&tmp);
    for name in names {
        std::fs::create_dir_all(config.active_dir().join(name)).unwrap();
    }
    let summary = SummaryOptions {
        git: false,
        pr_counts: false,
    };
    let app = App::new(config, summary);
    (tmp, app)
}
