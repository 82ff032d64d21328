//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::{AuthMode, DirectusClient, RequestOptions};

use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, client: &DirectusClient) -> Result<()> {
    let mode = client.auth_mode().await;

    output::field("URL", client.base_url().as_str());
    output::field("Mode", mode_label(mode));

    if mode == AuthMode::Unauthenticated {
        return Ok(());
    }

    let me = client
        .fetch(
            "/users/me",
            &RequestOptions::new().query("fields", "id,email,first_name,last_name"),
        )
        .await
        .context("Failed to fetch current user")?;

    for (label, key) in [("ID", "id"), ("Email", "email")] {
        if let Some(value) = me.get(key).and_then(|v| v.as_str()) {
            output::field(label, value);
        }
    }

    Ok(())
}

fn mode_label(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::Static => "static token",
        AuthMode::Session => "session",
        AuthMode::Unauthenticated => "unauthenticated",
    }
}
