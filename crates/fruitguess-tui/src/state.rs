//! TUI state.
//!
//! `AppState` splits into the screen state (`TuiState`) and the optional
//! modal overlay, so overlay handlers can borrow the rest of the state.

use fruitguess_core::game::{GameController, Stage};
use url::Url;

use crate::input::{InputKind, InputState};
use crate::overlays::Overlay;
use crate::transcript::ScrollState;

/// Which entry field receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Question,
    Answer,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Question => Focus::Answer,
            Focus::Answer => Focus::Question,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(api_url: &Url) -> Self {
        Self {
            tui: TuiState::new(api_url),
            overlay: None,
        }
    }
}

#[derive(Debug)]
pub struct TuiState {
    pub game: GameController,
    pub question: InputState,
    pub answer: InputState,
    pub focus: Focus,
    pub scroll: ScrollState,
    /// Transcript rows visible in the last laid-out frame.
    pub transcript_height: usize,
    pub spinner_frame: usize,
    /// Server base URL, shown on the title screen.
    pub api_url: String,
    pub should_quit: bool,
}

impl TuiState {
    pub fn new(api_url: &Url) -> Self {
        Self {
            game: GameController::new(),
            question: InputState::new(InputKind::Question),
            answer: InputState::new(InputKind::Answer),
            focus: Focus::default(),
            scroll: ScrollState::default(),
            transcript_height: 0,
            spinner_frame: 0,
            api_url: api_url.to_string(),
            should_quit: false,
        }
    }

    pub fn stage(&self) -> Stage {
        self.game.stage()
    }

    pub fn focused_input_mut(&mut self) -> &mut InputState {
        match self.focus {
            Focus::Question => &mut self.question,
            Focus::Answer => &mut self.answer,
        }
    }

    /// Clears everything that belongs to a single game on screen.
    pub fn reset_play_area(&mut self) {
        self.question.clear();
        self.answer.clear();
        self.focus = Focus::Question;
        self.scroll.reset();
    }
}
