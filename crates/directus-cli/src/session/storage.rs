//! Session storage for persisting login state.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use directus::{BaseUrl, TokenPair};

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// Stored session data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub url: BaseUrl,
    pub access_token: String,
    pub refresh_token: String,
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(url: &BaseUrl, tokens: &TokenPair) -> Self {
        Self {
            url: url.clone(),
            access_token: tokens.access_token.as_str().to_string(),
            refresh_token: tokens.refresh_token.as_str().to_string(),
            saved_at: Utc::now(),
        }
    }

    pub fn tokens(&self) -> TokenPair {
        TokenPair::new(&self.access_token, &self.refresh_token)
    }

    /// Check if this session belongs to the server at `url`.
    pub fn is_for(&self, url: &BaseUrl) -> bool {
        self.url == *url
    }
}

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "directus").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save a session to disk.
pub fn save_session(session: &StoredSession) -> Result<()> {
    write_session(&session_path()?, session)
}

/// Load the saved session, if there is one.
pub fn load_session() -> Result<Option<StoredSession>> {
    read_session(&session_path()?)
}

/// Remove the saved session. Succeeds when there is none.
pub fn clear_session() -> Result<()> {
    let path = session_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove session file")?;
    }

    Ok(())
}

fn write_session(path: &Path, session: &StoredSession) -> Result<()> {
    let json = serde_json::to_string_pretty(session)?;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    // Tokens are bearer credentials; the file is private from creation (Unix only)
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).context("Failed to open session file")?;

    // A file left by an older version may still be wider than 0600
    #[cfg(unix)]
    file.set_permissions(fs::Permissions::from_mode(0o600))?;

    file.write_all(json.as_bytes()).context("Failed to write session file")?;

    Ok(())
}

fn read_session(path: &Path) -> Result<Option<StoredSession>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path).context("Failed to read session file")?;
    let stored = serde_json::from_str(&json).context("Invalid session file")?;
    Ok(Some(stored))
}
