use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::project::{Project, TodoCount};
use crate::tui::app::App;
use crate::util::unicode::fit_to_width;

use super::helpers::pad_spans;
use super::push_highlighted_spans;

const BRANCH_W: usize = 16;
const DATE_W: usize = 11;
const TODOS_W: usize = 5;
const PRS_W: usize = 4;
/// Cells used by everything but the name column
const FIXED_W: usize = 3 + BRANCH_W + 1 + DATE_W + 1 + TODOS_W + 1 + PRS_W + 1;
const MIN_NAME_W: usize = 8;

/// Render the column header and one row per visible project
pub fn render_project_list(frame: &mut Frame, app: &mut App, area: Rect) {
    if area.height == 0 {
        return;
    }
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let width = area.width as usize;
    let name_w = width.saturating_sub(FIXED_W).max(MIN_NAME_W);

    let mut lines: Vec<Line> = Vec::new();
    let header_style = Style::default()
        .fg(app.theme.dim)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let header = format!(
        "   {} {} {} {:>todos$} {:>prs$}",
        fit_to_width("Project", name_w),
        fit_to_width("Branch", BRANCH_W),
        fit_to_width("Last Commit", DATE_W),
        "Todos",
        "PRs",
        todos = TODOS_W,
        prs = PRS_W,
    );
    lines.push(Line::from(Span::styled(header, header_style)));

    let visible = app.visible_indices();
    if visible.is_empty() {
        let root = app.tree.root(&app.config);
        let text = if app.projects.is_empty() {
            format!(" No projects in {}", root.display())
        } else {
            " No projects match the filter".to_string()
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        frame.render_widget(Paragraph::new(lines).style(bg_style), area);
        return;
    }

    // Keep the cursor row on screen
    let rows = (area.height as usize).saturating_sub(1).max(1);
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + rows {
        app.scroll_offset = app.cursor + 1 - rows;
    }

    let search_re = app.filter_regex();
    for (row, &idx) in visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(rows)
    {
        let project = &app.projects[idx];
        let selected = row == app.cursor;
        let row_bg = if selected { app.theme.selection_bg } else { bg };
        let mut spans = project_row(app, project, name_w, row_bg, search_re.as_ref());
        pad_spans(&mut spans, width, Style::default().bg(row_bg));
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(bg_style), area);
}

fn project_row<'a>(
    app: &App,
    project: &Project,
    name_w: usize,
    row_bg: ratatui::style::Color,
    search_re: Option<&regex::Regex>,
) -> Vec<Span<'a>> {
    let theme = &app.theme;
    let text = Style::default().fg(theme.text).bg(row_bg);
    let dim = Style::default().fg(theme.dim).bg(row_bg);

    let mut spans = vec![
        Span::styled(" ", text),
        Span::styled(
            project.git.status.icon(),
            Style::default()
                .fg(theme.git_status_color(project.git.status))
                .bg(row_bg),
        ),
        Span::styled(" ", text),
    ];

    let name = fit_to_width(&project.name, name_w);
    let name_style = Style::default().fg(theme.text_bright).bg(row_bg);
    let match_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);
    push_highlighted_spans(&mut spans, &name, name_style, match_style, search_re);

    let branch = project.git.branch.as_deref().unwrap_or("-");
    spans.push(Span::styled(format!(" {}", fit_to_width(branch, BRANCH_W)), text));

    let date = project
        .git
        .last_commit_date
        .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());
    spans.push(Span::styled(format!(" {}", fit_to_width(&date, DATE_W)), dim));

    let (todos, todo_style) = match project.todos {
        TodoCount::Open(0) => ("-".to_string(), dim),
        TodoCount::Open(n) => (n.to_string(), Style::default().fg(theme.yellow).bg(row_bg)),
        TodoCount::Unreadable => ("!".to_string(), Style::default().fg(theme.red).bg(row_bg)),
    };
    spans.push(Span::styled(
        format!(" {:>width$}", todos, width = TODOS_W),
        todo_style,
    ));

    let (prs, pr_style) = if project.pr_count > 0 {
        (
            project.pr_count.to_string(),
            Style::default().fg(theme.cyan).bg(row_bg),
        )
    } else {
        ("-".to_string(), dim)
    };
    spans.push(Span::styled(
        format!(" {:>width$}", prs, width = PRS_W),
        pr_style,
    ));

    spans
}
