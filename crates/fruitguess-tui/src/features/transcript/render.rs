use fruitguess_core::game::{Role, Transcript};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::ScrollState;
use crate::common::wrap_words;

/// Shown in place of the exchanges before the first question.
pub const EMPTY_HINT: &str = "No questions yet. Ask one to start narrowing it down.";

const QUESTION_PREFIX: &str = "Q: ";
const ANSWER_PREFIX: &str = "A: ";
const CONTINUATION: &str = "   ";

/// Lays out the transcript as display lines for a pane `width` columns wide.
///
/// Each entry starts with its role prefix; wrapped continuation lines are
/// indented under the text. Exchanges are separated by a blank line.
pub fn render_transcript(transcript: &Transcript, width: usize) -> Vec<Line<'static>> {
    if transcript.is_empty() {
        return vec![Line::from(Span::styled(
            EMPTY_HINT,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))];
    }

    let text_width = width.saturating_sub(QUESTION_PREFIX.len()).max(1);
    let mut lines = Vec::new();

    for (index, entry) in transcript.entries().iter().enumerate() {
        let (prefix, prefix_style, text_style) = match entry.role {
            Role::User => (
                QUESTION_PREFIX,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                Style::default(),
            ),
            Role::Assistant => (
                ANSWER_PREFIX,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Gray),
            ),
        };

        if entry.role == Role::User && index > 0 {
            lines.push(Line::default());
        }

        for (row, chunk) in wrap_words(&entry.content, text_width)
            .into_iter()
            .enumerate()
        {
            let lead = if row == 0 {
                Span::styled(prefix, prefix_style)
            } else {
                Span::raw(CONTINUATION)
            };
            lines.push(Line::from(vec![lead, Span::styled(chunk, text_style)]));
        }
    }

    lines
}

/// Inner size (width, height) of the bordered transcript pane.
pub fn transcript_viewport(area: Rect) -> (usize, usize) {
    (
        area.width.saturating_sub(2) as usize,
        area.height.saturating_sub(2) as usize,
    )
}

/// Draws the bordered transcript pane at the current scroll offset.
pub fn render_transcript_pane(
    frame: &mut Frame,
    area: Rect,
    transcript: &Transcript,
    scroll: &ScrollState,
) {
    let (width, height) = transcript_viewport(area);
    let lines = render_transcript(transcript, width);
    let offset = scroll.get_offset(height);

    let title = if scroll.is_following() {
        " Transcript ".to_string()
    } else {
        format!(" Transcript (line {}/{}) ", offset + 1, lines.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);

    let visible: Vec<Line<'static>> = lines.into_iter().skip(offset).take(height).collect();
    frame.render_widget(Paragraph::new(visible).block(block), area);
}
