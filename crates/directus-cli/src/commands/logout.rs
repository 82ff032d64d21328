//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::auth::RefreshToken;
use directus::{AuthMode, DirectusClient};

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, client: &DirectusClient) -> Result<()> {
    // With --token the client is in static mode, but a saved session for the
    // same server must still be invalidated before its file is removed.
    let saved = storage::load_session()
        .context("Failed to load session")?
        .filter(|s| s.is_for(client.base_url()));

    let refresh_token = match (client.auth_mode().await, saved) {
        (AuthMode::Session, _) => None,
        (_, Some(saved)) => Some(RefreshToken::new(saved.refresh_token)),
        (_, None) => {
            output::note("No active session");
            return Ok(());
        }
    };

    // Local state is cleared even when the server rejects the logout
    let result = client.logout(refresh_token).await;
    storage::clear_session().context("Failed to remove session")?;
    result.context("Failed to logout")?;

    output::success("Logged out");
    Ok(())
}
