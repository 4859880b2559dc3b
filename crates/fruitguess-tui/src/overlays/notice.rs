//! Interruptive notice popup (wrong guess, expired session).

use crossterm::event::{KeyCode, KeyEvent};
use fruitguess_core::game::GameNotice;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::render_utils::{calculate_overlay_area, render_overlay_container};

const NOTICE_WIDTH: u16 = 52;
const NOTICE_HEIGHT: u16 = 7;
const DISMISS_HINT: &str = "Enter / Esc to continue";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTone {
    Warning,
    Error,
}

impl NoticeTone {
    fn color(self) -> Color {
        match self {
            NoticeTone::Warning => Color::Yellow,
            NoticeTone::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeState {
    pub title: String,
    pub message: String,
    pub tone: NoticeTone,
}

impl NoticeState {
    /// Builds the popup for notices that interrupt play; `None` for the rest.
    pub fn from_game_notice(notice: &GameNotice) -> Option<Self> {
        match notice {
            GameNotice::IncorrectGuess { guess } => Some(Self {
                title: "Not quite".to_string(),
                message: format!("\"{guess}\" is not the answer."),
                tone: NoticeTone::Warning,
            }),
            GameNotice::SessionExpired { message } => Some(Self {
                title: "Session ended".to_string(),
                message: format!("{message}. Start a new game from the title screen."),
                tone: NoticeTone::Error,
            }),
            GameNotice::GameStarted | GameNotice::Correct { .. } | GameNotice::Failed { .. } => {
                None
            }
        }
    }

    /// Returns true when the key dismisses the notice.
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        matches!(key.code, KeyCode::Enter | KeyCode::Esc)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = calculate_overlay_area(area, NOTICE_WIDTH, NOTICE_HEIGHT);
        render_overlay_container(frame, popup, &self.title, self.tone.color());

        let inner = Rect::new(
            popup.x + 1,
            popup.y + 1,
            popup.width.saturating_sub(2),
            popup.height.saturating_sub(2),
        );
        let lines = vec![
            Line::default(),
            Line::from(self.message.clone()),
            Line::default(),
            Line::from(Span::styled(
                DISMISS_HINT,
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
    }
}
