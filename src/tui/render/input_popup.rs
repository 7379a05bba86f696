use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::byte_offset_to_display_col;

use super::helpers::centered_rect_fixed;

/// Render the single-line text input over the todo popup
pub fn render_input_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(input) = &app.text_input else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let bg_style = Style::default().bg(bg);

    let popup_w = ((area.width as u32 * 3 / 5) as u16)
        .clamp(30, 80)
        .min(area.width);
    let popup = centered_rect_fixed(popup_w, 5, area);
    let inner_w = popup_w.saturating_sub(4) as usize;

    // Scroll horizontally so the cursor stays inside the field
    let cursor_col = byte_offset_to_display_col(&input.buffer, input.cursor);
    let h_scroll = (cursor_col + 1).saturating_sub(inner_w);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" ", bg_style),
            Span::styled(
                input.buffer.clone(),
                Style::default().fg(theme.text_bright).bg(bg),
            ),
        ]),
        Line::from(Span::styled(
            " Enter save  Esc cancel",
            Style::default().fg(theme.dim).bg(bg),
        )),
    ];

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", input.purpose.title()),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(bg_style);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .scroll((0, h_scroll as u16))
            .style(bg_style),
        popup,
    );

    let x = popup.x + 2 + (cursor_col - h_scroll) as u16;
    frame.set_cursor_position(Position::new(x, popup.y + 2));
}
