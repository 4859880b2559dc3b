//! Health command handler.

use anyhow::{Context, Result, bail};
use fruitguess_core::api::GameClient;

pub async fn run(client: &GameClient) -> Result<()> {
    let healthy = client
        .health()
        .await
        .with_context(|| format!("check {}", client.base_url()))?;
    if !healthy {
        bail!("Server at {} reported it is not healthy", client.base_url());
    }
    println!("ok");
    Ok(())
}
