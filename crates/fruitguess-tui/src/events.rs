//! Events consumed by the reducer.

use crossterm::event::Event;
use fruitguess_core::game::GameResponse;

#[derive(Debug)]
pub enum UiEvent {
    /// Animation tick; the runtime redraws after each one.
    Tick,
    /// Current terminal size, sent before the other events of a loop pass.
    Frame { width: u16, height: u16 },
    Terminal(Event),
    /// A game server request finished.
    Game(GameResponse),
}
