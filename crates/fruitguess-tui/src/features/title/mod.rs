//! Title and finished screens.
//!
//! Both are a short centered block of text; they differ only in the
//! headline and the key hints.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const BANNER: &str = "Fruit Guess";
const TAGLINE: &str = "I'm thinking of a fruit. Ask yes/no questions, then name it.";

/// Status of a pending `/start` shown under the hints.
#[derive(Debug, Clone, Copy)]
pub struct Pending<'a> {
    pub loading: bool,
    pub spinner: &'a str,
    pub error: Option<&'a str>,
}

/// Lines for the title screen.
pub fn title_lines(pending: Pending<'_>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            BANNER,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(TAGLINE, Style::default().fg(Color::Gray))),
        Line::default(),
        hint_line(&[("Enter", "start"), ("q", "quit")]),
    ];
    push_pending(&mut lines, pending, "Starting a new game…");
    lines
}

/// Lines for the screen shown after a correct guess.
pub fn finished_lines(answer: Option<&str>, pending: Pending<'_>) -> Vec<Line<'static>> {
    let headline = match answer {
        Some(answer) => format!("Correct! The answer was {answer}."),
        None => "Correct!".to_string(),
    };
    let mut lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        hint_line(&[("Enter", "play again"), ("Esc", "title"), ("q", "quit")]),
    ];
    push_pending(&mut lines, pending, "Starting a new game…");
    lines
}

pub fn render_title_screen(frame: &mut Frame, area: Rect, pending: Pending<'_>) {
    render_centered(frame, area, title_lines(pending));
}

pub fn render_finished_screen(
    frame: &mut Frame,
    area: Rect,
    answer: Option<&str>,
    pending: Pending<'_>,
) {
    render_centered(frame, area, finished_lines(answer, pending));
}

fn push_pending(lines: &mut Vec<Line<'static>>, pending: Pending<'_>, loading_text: &str) {
    if pending.loading {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", pending.spinner),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(loading_text.to_string()),
        ]));
    }
    if let Some(error) = pending.error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
}

fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {action}")));
    }
    Line::from(spans)
}

fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let [_, body, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        body,
    );
}
