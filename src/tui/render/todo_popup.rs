use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

use super::helpers::{centered_rect_fixed, pad_spans, todo_symbol};

const HINT: &str = "a add  e edit  d delete  Space toggle  Esc close";

/// Render the todo list of the open project as a centered popup
pub fn render_todo_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(panel) = app.todos.open_panel() else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let bg_style = Style::default().bg(bg);

    let popup_w = ((area.width as u32 * 4 / 5) as u16)
        .clamp(40, 100)
        .min(area.width);
    let popup_h = ((area.height as u32 * 4 / 5) as u16).max(8).min(area.height);
    let popup = centered_rect_fixed(popup_w, popup_h, area);
    let inner_w = popup_w.saturating_sub(2) as usize;
    // Blank line, list, blank line, hint
    let list_rows = popup_h.saturating_sub(5) as usize;

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(" ".repeat(inner_w), bg_style))];

    if panel.list.is_empty() {
        let text = if panel.read_only {
            " The todo file could not be read. It is left untouched."
        } else {
            " No todos yet. Press a to add one."
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(theme.dim).bg(bg),
        )));
    } else {
        // Scroll so the cursor stays in view
        let cursor = panel.cursor.unwrap_or(0);
        let first = (cursor + 1).saturating_sub(list_rows.max(1));
        for (i, item) in panel.list.items.iter().enumerate().skip(first).take(list_rows) {
            let selected = panel.cursor == Some(i);
            let row_bg = if selected { theme.selection_bg } else { bg };
            let text_fg = if item.status.is_open() {
                theme.text_bright
            } else {
                theme.dim
            };
            let content = truncate_to_width(&item.content, inner_w.saturating_sub(5));
            let mut spans = vec![
                Span::styled(
                    if selected { " \u{258E}" } else { "  " },
                    Style::default().fg(theme.highlight).bg(row_bg),
                ),
                Span::styled(
                    todo_symbol(item.status),
                    Style::default()
                        .fg(theme.todo_status_color(item.status))
                        .bg(row_bg),
                ),
                Span::styled(" ", Style::default().bg(row_bg)),
                Span::styled(content, Style::default().fg(text_fg).bg(row_bg)),
            ];
            pad_spans(&mut spans, inner_w, Style::default().bg(row_bg));
            lines.push(Line::from(spans));
        }
    }

    // Pin the hint to the bottom row
    while lines.len() < popup_h.saturating_sub(4) as usize {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));
    let hint_pad = inner_w.saturating_sub(display_width(HINT)) / 2;
    lines.push(Line::from(Span::styled(
        format!("{}{}", " ".repeat(hint_pad), HINT),
        Style::default().fg(theme.dim).bg(bg),
    )));

    let mut title = format!(" Todos: {} ", panel.project);
    if panel.read_only {
        title.push_str("[read-only] ");
    }
    let border_color = if panel.read_only { theme.red } else { theme.highlight };
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(bg_style);

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block).style(bg_style), popup);
}
