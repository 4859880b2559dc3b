//! Status line under the play area: spinner, last error, key hints.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::common::truncate_with_ellipsis;

/// Height of the status line.
pub const STATUS_HEIGHT: u16 = 1;

/// Spinner frames for the status line animation.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

const PLAYING_HINTS: &str = "Tab switch · Enter submit · PgUp/PgDn scroll · Esc title";

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Everything the status line shows while a game is in progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusView<'a> {
    pub asking: bool,
    pub guessing: bool,
    pub spinner_frame: usize,
    pub error: Option<&'a str>,
}

/// Builds the status line for a terminal `width` columns wide.
///
/// Activity comes first, then the last error; key hints fill the line only
/// when there is nothing else to say.
pub fn status_line(view: StatusView<'_>, width: usize) -> Line<'static> {
    let mut spans = Vec::new();
    let mut used = 0;

    let activity = match (view.asking, view.guessing) {
        (true, true) => Some("Asking and checking your guess…"),
        (true, false) => Some("Asking…"),
        (false, true) => Some("Checking your guess…"),
        (false, false) => None,
    };
    if let Some(activity) = activity {
        let text = format!("{} {activity}", spinner(view.spinner_frame));
        used += text.width();
        spans.push(Span::styled(text, Style::default().fg(Color::Cyan)));
    }

    if let Some(error) = view.error {
        if used > 0 {
            spans.push(Span::raw("  "));
            used += 2;
        }
        let text = truncate_with_ellipsis(error, width.saturating_sub(used));
        spans.push(Span::styled(
            text,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    } else if activity.is_none() {
        spans.push(Span::styled(
            truncate_with_ellipsis(PLAYING_HINTS, width),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

pub fn render_status_line(frame: &mut Frame, area: Rect, view: StatusView<'_>) {
    let line = status_line(view, area.width as usize);
    frame.render_widget(Paragraph::new(line), area);
}
