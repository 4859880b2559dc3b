//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O itself.

use fruitguess_core::game::GameRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,
    /// Execute a game request on the server; the result comes back as
    /// `UiEvent::Game`.
    Send(GameRequest),
}
