//! Interactive (full-screen) game handler.

use anyhow::{Context, Result};
use fruitguess_core::api::GameClient;
use fruitguess_core::config::Config;

use crate::modes;

pub fn run(config: &Config, client: GameClient) -> Result<()> {
    modes::run_game(config, client).context("interactive game failed")
}
