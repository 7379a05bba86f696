use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::project::GitStatus;
use crate::tui::app::{App, StatusInfo};
use crate::util::unicode::truncate_to_width;

use super::helpers::centered_rect_fixed;

const COMMIT_MSG_W: usize = 50;
const PR_TITLE_W: usize = 40;

/// Render git details, recent commits and open PRs of one project
pub fn render_status_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(status) = &app.status else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let bg_style = Style::default().bg(bg);
    let section = Style::default()
        .fg(theme.cyan)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme.text).bg(bg);
    let dim = Style::default().fg(theme.dim).bg(bg);

    let lines = status_lines(status, section, text, dim);

    let popup_w = ((area.width as u32 * 4 / 5) as u16).min(area.width);
    let popup_h = ((area.height as u32 * 4 / 5) as u16).min(area.height);
    let popup = centered_rect_fixed(popup_w, popup_h, area);

    let block = Block::default()
        .title(Span::styled(
            format!(" Status: {} ", status.name),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(bg_style);

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block).style(bg_style), popup);
}

fn status_lines(status: &StatusInfo, section: Style, text: Style, dim: Style) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(""), Line::from(Span::styled(" Git Status", section))];

    if status.git.status == GitStatus::NoGit {
        lines.push(Line::from(Span::styled("   Not a git repository", dim)));
        return lines;
    }

    let branch = status.git.branch.clone().unwrap_or_else(|| "unknown".into());
    lines.push(Line::from(Span::styled(format!("   Branch: {}", branch), text)));
    let state = match status.git.status {
        GitStatus::Clean => "Clean".to_string(),
        _ => format!(
            "Has uncommitted changes ({})",
            status.git.uncommitted_count
        ),
    };
    lines.push(Line::from(Span::styled(format!("   Status: {}", state), text)));
    if let Some(remote) = &status.git.remote_url {
        lines.push(Line::from(Span::styled(format!("   Remote: {}", remote), text)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Recent Commits", section)));
    if status.commits.is_empty() {
        lines.push(Line::from(Span::styled("   No commits", dim)));
    }
    for c in &status.commits {
        let date = c
            .date
            .map_or_else(|| "-".repeat(10), |d| d.format("%Y-%m-%d").to_string());
        lines.push(Line::from(vec![
            Span::styled(format!("   {} ", c.hash), dim),
            Span::styled(format!("{} ", date), dim),
            Span::styled(truncate_to_width(&c.message, COMMIT_MSG_W), text),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Open PRs", section)));
    if status.prs.is_empty() {
        lines.push(Line::from(Span::styled("   No open PRs", dim)));
    }
    for pr in &status.prs {
        lines.push(Line::from(vec![
            Span::styled(format!("   #{} ", pr.number), dim),
            Span::styled(truncate_to_width(&pr.title, PR_TITLE_W), text),
        ]));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::{Commit, GitInfo, PullRequest};
    use crate::tui::render::test_helpers::*;
    use chrono::DateTime;

    fn render(app: &App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_status_popup(frame, app, area);
        })
    }

    #[test]
    fn not_a_repository() {
        let (_tmp, mut app) = app_with_projects(&["plain"]);
        app.status = Some(StatusInfo {
            name: "plain".into(),
            git: GitInfo::default(),
            commits: vec![],
            prs: vec![],
        });
        let output = render(&app);
        assert!(output.contains(" Status: plain "));
        assert!(output.contains("Not a git repository"));
        assert!(!output.contains("Recent Commits"));
    }

    #[test]
    fn repository_details() {
        let (_tmp, mut app) = app_with_projects(&["repo"]);
        app.status = Some(StatusInfo {
            name: "repo".into(),
            git: GitInfo {
                status: GitStatus::Dirty,
                branch: Some("feature/x".into()),
                uncommitted_count: 3,
                ..GitInfo::default()
            },
            commits: vec![Commit {
                hash: "abc1234".into(),
                message: "Fix the thing".into(),
                date: DateTime::parse_from_rfc3339("2024-05-02T09:30:00+02:00").ok(),
                author: "Dev".into(),
            }],
            prs: vec![PullRequest {
                number: 42,
                title: "Add todos".into(),
                head_ref_name: "todos".into(),
                url: String::new(),
            }],
        });
        let output = render(&app);
        assert!(output.contains("Branch: feature/x"));
        assert!(output.contains("Status: Has uncommitted changes (3)"));
        assert!(output.contains("abc1234 2024-05-02 Fix the thing"));
        assert!(output.contains("#42 Add todos"));
    }
}
