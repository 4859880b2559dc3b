//! Runtime execution modes.
//!
//! - `plain`: line-oriented game over stdin/stdout
//! - the full-screen terminal UI lives in `fruitguess-tui`

pub mod plain;

pub use fruitguess_tui::run_game;
