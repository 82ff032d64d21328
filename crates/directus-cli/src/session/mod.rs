//! Client construction from CLI flags and the saved session.

pub mod storage;

use anyhow::{Context, Result};
use directus::{AuthMode, BaseUrl, DirectusClient};

use crate::cli::ConnectionArgs;
use storage::StoredSession;

/// Build a client for one command.
///
/// `--token` wins. Otherwise the saved session is resumed when it belongs to
/// the same server, and the client runs unauthenticated when there is none.
pub async fn connect(conn: &ConnectionArgs) -> Result<DirectusClient> {
    let stored = storage::load_session().context("Failed to load session")?;

    let url = match (&conn.url, &stored) {
        (Some(url), _) => BaseUrl::new(url).context("Invalid server URL")?,
        (None, Some(stored)) => stored.url.clone(),
        (None, None) => anyhow::bail!(
            "No server URL. Pass --url, set DIRECTUS_URL or run 'directus login' first."
        ),
    };

    let mut builder = DirectusClient::builder(url.as_str()).verify(!conn.insecure);
    if let Some(token) = &conn.token {
        builder = builder.static_token(token);
    } else if let Some(stored) = stored.filter(|s| s.is_for(&url)) {
        builder = builder.session(stored.tokens());
    }

    builder.build().await.context("Failed to create client")
}

/// Save the client's current session pair.
///
/// Every authenticated call rotates the refresh token, so this runs after
/// each command. Static and anonymous clients have nothing to save.
pub async fn persist(client: &DirectusClient) -> Result<()> {
    if client.auth_mode().await != AuthMode::Session {
        return Ok(());
    }
    let Some(tokens) = client.export_tokens().await else {
        return Ok(());
    };

    let stored = StoredSession::new(client.base_url(), &tokens);
    storage::save_session(&stored).context("Failed to save session")
}
