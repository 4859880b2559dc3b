use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use super::InputState;

/// Height of a rendered input field (border + one line).
pub const INPUT_HEIGHT: u16 = 3;

/// Renders an input field; places the terminal cursor when `focused`.
///
/// `busy` dims the border while the field's request is in flight.
pub fn render_input(frame: &mut Frame, area: Rect, input: &InputState, focused: bool, busy: bool) {
    let border_color = match (focused, busy) {
        (_, true) => Color::DarkGray,
        (true, false) => Color::Cyan,
        (false, false) => Color::Gray,
    };
    let title = if busy {
        format!(" {} (waiting…) ", input.kind().title())
    } else {
        format!(" {} ", input.kind().title())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);
    let inner = block.inner(area);

    let width = inner.width as usize;
    let (visible, skipped_cols) = visible_window(input, width);
    let line = if input.is_empty() {
        Line::from(Span::styled(
            input.kind().placeholder(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(visible)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);

    if focused && inner.width > 0 {
        let col = input.cursor_columns().saturating_sub(skipped_cols);
        let x = inner.x + (col as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

/// Returns the slice of text to show so the cursor stays in view, plus the
/// number of display columns scrolled off the left edge.
fn visible_window(input: &InputState, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let cursor_col = input.cursor_columns();
    let skip_cols = cursor_col.saturating_sub(width.saturating_sub(1));

    let mut skipped = 0;
    let mut used = 0;
    let mut out = String::new();
    for ch in input.text().chars() {
        let w = ch.width().unwrap_or(0);
        if skipped < skip_cols {
            skipped += w;
            continue;
        }
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    (out, skipped)
}
