//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay owns its state, key handler and render function.

pub mod notice;
pub mod render_utils;

use crossterm::event::KeyEvent;
pub use notice::{NoticeState, NoticeTone};
use ratatui::Frame;
use ratatui::layout::Rect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Notice(NoticeState),
}

impl Overlay {
    /// Handles a key while the overlay is open. Returns true when it closes.
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        match self {
            Overlay::Notice(state) => state.handle_key(key),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Notice(state) => state.render(frame, area),
        }
    }
}
