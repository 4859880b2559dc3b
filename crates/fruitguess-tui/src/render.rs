//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use fruitguess_core::game::Stage;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::input::{INPUT_HEIGHT, render_input};
use crate::state::{AppState, Focus, TuiState};
use crate::statusline::{STATUS_HEIGHT, StatusView, render_status_line, spinner};
use crate::title::{Pending, render_finished_screen, render_title_screen};
use crate::transcript::render_transcript_pane;

const HEADER_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 1;

/// Areas of the playing screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayingLayout {
    pub header: Rect,
    pub question: Rect,
    pub transcript: Rect,
    pub answer: Rect,
    pub status: Rect,
}

/// Splits the terminal for the playing screen.
///
/// The reducer uses the same layout to size the transcript for scrolling.
pub fn playing_layout(area: Rect) -> PlayingLayout {
    let [header, question, transcript, answer, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);
    PlayingLayout {
        header,
        question,
        transcript,
        answer,
        status,
    }
}

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    match state.stage() {
        Stage::Start => render_start(state, frame, area),
        Stage::Playing => render_playing(state, frame, area, app.overlay.is_none()),
        Stage::Finished => {
            render_finished_screen(frame, area, state.game.chosen_answer(), pending(state));
        }
    }

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area);
    }
}

fn pending(state: &TuiState) -> Pending<'_> {
    Pending {
        loading: state.game.is_loading(),
        spinner: spinner(state.spinner_frame),
        error: state.game.error(),
    }
}

fn render_start(state: &TuiState, frame: &mut Frame, area: Rect) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(FOOTER_HEIGHT)]).areas(area);
    render_title_screen(frame, body, pending(state));
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" Server: {}", state.api_url),
            Style::default().fg(Color::DarkGray),
        ))),
        footer,
    );
}

fn render_playing(state: &TuiState, frame: &mut Frame, area: Rect, show_cursor: bool) {
    let layout = playing_layout(area);
    let game = &state.game;

    let mut header = vec![Span::styled(
        " Fruit Guess",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(session) = game.session() {
        header.push(Span::styled(
            format!("  session {session}  ·  {} questions", game.transcript().len() / 2),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(header)), layout.header);

    // The focused field owns the terminal cursor unless a popup is up.
    render_input(
        frame,
        layout.question,
        &state.question,
        show_cursor && state.focus == Focus::Question,
        game.is_asking(),
    );
    render_transcript_pane(frame, layout.transcript, game.transcript(), &state.scroll);
    render_input(
        frame,
        layout.answer,
        &state.answer,
        show_cursor && state.focus == Focus::Answer,
        game.is_guessing(),
    );
    render_status_line(
        frame,
        layout.status,
        StatusView {
            asking: game.is_asking(),
            guessing: game.is_guessing(),
            spinner_frame: state.spinner_frame,
            error: game.error(),
        },
    );
}
