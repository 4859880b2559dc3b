//! Plain (line-oriented) game handler.

use std::io;

use anyhow::{Context, Result};
use fruitguess_core::api::GameClient;
use tokio::io::BufReader;

use crate::modes::plain::{self, PlainOptions};

pub async fn run(client: GameClient, auto_start: bool) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    plain::run_plain(&client, input, io::stdout(), PlainOptions { auto_start })
        .await
        .context("plain game failed")
}
