use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

use crate::model::todo::TodoStatus;
use crate::util::unicode;

/// Status symbols for todo items
pub(super) fn todo_symbol(status: TodoStatus) -> &'static str {
    match status {
        TodoStatus::Pending => "\u{25CB}",
        TodoStatus::InProgress => "\u{25D0}",
        TodoStatus::Completed => "\u{25CF}",
    }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad `spans` with `style` up to `width` cells
pub(super) fn pad_spans(spans: &mut Vec<Span<'_>>, width: usize, style: Style) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}

/// Push `hint` right-aligned after `spans`, if it fits in `width`
pub(super) fn push_right_hint<'a>(
    spans: &mut Vec<Span<'a>>,
    hint: &'a str,
    width: usize,
    pad_style: Style,
    hint_style: Style,
) {
    let content_width = spans_width(spans);
    let hint_width = unicode::display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), pad_style));
        spans.push(Span::styled(hint, hint_style));
    }
}

/// Fixed-size rectangle centered in `area`
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
