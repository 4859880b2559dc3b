//! Full-screen TUI for Fruit Guess.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use features::{input, statusline, title, transcript};
use fruitguess_core::api::GameClient;
use fruitguess_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive game until the user quits.
///
/// Blocks the calling thread; requests are spawned on the ambient tokio
/// runtime.
///
/// # Errors
/// Returns an error if stderr is not a terminal or the terminal fails.
pub fn run_game(config: &Config, client: GameClient) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The game UI requires a terminal.\n\
             Use `fruitguess plain` to play over stdin/stdout."
        );
    }

    let mut runtime = TuiRuntime::new(client, config.tick_interval())?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
