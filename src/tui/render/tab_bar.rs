use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::dashboard::Tree;
use crate::tui::app::App;

use super::helpers::spans_width;

/// Render the tree tabs with a separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            "\u{25B6}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
        Span::styled(" ", bg_style),
    ];
    for tree in [Tree::Active, Tree::Archived] {
        spans.push(Span::styled(
            format!(" {} ", tree.label()),
            tab_style(app, tree == app.tree),
        ));
        spans.push(sep.clone());
    }

    let visible = app.visible_indices().len();
    let count = if visible == app.projects.len() {
        format!("{} projects ", app.projects.len())
    } else {
        format!("{}/{} projects ", visible, app.projects.len())
    };
    let width = chunks[0].width as usize;
    let used = spans_width(&spans);
    if used + count.chars().count() < width {
        spans.push(Span::styled(
            " ".repeat(width - used - count.chars().count()),
            bg_style,
        ));
        spans.push(Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), chunks[0]);

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(chunks[1].width as usize),
        Style::default().fg(app.theme.dim).bg(bg),
    ));
    frame.render_widget(Paragraph::new(separator).style(bg_style), chunks[1]);
}

fn tab_style(app: &App, current: bool) -> Style {
    if current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(app.theme.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn tab_bar_shows_trees_and_count() {
        let (_tmp, app) = app_with_projects(&["a", "b"]);
        let output = render_to_string(TERM_W, 2, |frame, area| {
            render_tab_bar(frame, &app, area);
        });
        let first = output.lines().next().unwrap();
        assert!(first.starts_with(" \u{25B6}  Hangar \u{2502} Stash \u{2502}"));
        assert!(first.ends_with("2 projects"));
        assert!(output.lines().nth(1).unwrap().starts_with("\u{2500}\u{2500}"));
    }

    #[test]
    fn tab_bar_shows_filtered_count() {
        let (_tmp, mut app) = app_with_projects(&["a", "b"]);
        app.filter = Some("a".into());
        let output = render_to_string(TERM_W, 2, |frame, area| {
            render_tab_bar(frame, &app, area);
        });
        assert!(output.lines().next().unwrap().ends_with("1/2 projects"));
    }
}
