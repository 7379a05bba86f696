use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, MessageKind, Mode};

use super::helpers::push_right_hint;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    let hint = match app.mode {
        Mode::Filter => {
            spans.push(Span::styled(
                format!("/{}", app.filter_input),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
            "Enter keep  Esc clear"
        }
        Mode::Navigate => {
            if let Some(msg) = &app.message {
                let color = match msg.kind {
                    MessageKind::Info => app.theme.text,
                    MessageKind::Warning => app.theme.yellow,
                    MessageKind::Error => app.theme.red,
                };
                spans.push(Span::styled(
                    format!(" {}", msg.text),
                    Style::default().fg(color).bg(bg),
                ));
            } else if let Some(pattern) = &app.filter {
                spans.push(Span::styled(format!("/{}", pattern), dim_style));
            }
            "t todos  s status  ? help  q quit"
        }
    };
    push_right_hint(&mut spans, hint, width, bg_style, dim_style);

    let paragraph = Paragraph::new(Line::from(spans)).style(bg_style);
    frame.render_widget(paragraph, area);
}
