//! Refresh token command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use directus::{AuthMode, DirectusClient};

use crate::output;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(_args: RefreshTokenArgs, client: &DirectusClient) -> Result<()> {
    if client.auth_mode().await != AuthMode::Session {
        bail!("No active session. Run 'directus login' first.");
    }

    output::note("Refreshing session...");

    client
        .refresh(None)
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");
    output::field("URL", client.base_url().as_str());

    Ok(())
}
