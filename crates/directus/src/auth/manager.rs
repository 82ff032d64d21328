//! Credential state and bearer token derivation.

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::{AuthError, Error};
use crate::http::endpoints::{
    AUTH_LOGIN, AUTH_LOGOUT, AUTH_REFRESH, AuthData, Envelope, LoginRequest, RefreshTokenRequest,
};
use crate::http::HttpClient;

use super::credentials::Credentials;
use super::tokens::{RefreshToken, StaticToken, TokenPair};

/// Which kind of credential is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// A caller-supplied token, sent as-is on every request.
    Static,
    /// A login session; the pair is refreshed before every request.
    Session,
    /// No credential; requests carry an empty bearer.
    Unauthenticated,
}

/// The active credential.
///
/// Being a sum type, a static token and a session pair can never both be
/// active, so "static wins" needs no runtime check.
#[derive(Debug, Clone)]
pub enum CredentialState {
    Static(StaticToken),
    Session(TokenPair),
    Unauthenticated,
}

impl CredentialState {
    pub fn mode(&self) -> AuthMode {
        match self {
            CredentialState::Static(_) => AuthMode::Static,
            CredentialState::Session(_) => AuthMode::Session,
            CredentialState::Unauthenticated => AuthMode::Unauthenticated,
        }
    }
}

struct Inner {
    state: CredentialState,
    // Remembered for relogin(); survives logout.
    credentials: Option<Credentials>,
}

/// Owns the credential state and mints the bearer token for each request.
///
/// The session pair is exchanged at `/auth/refresh` before every use rather
/// than cached until expiry. That costs one extra round trip per
/// authenticated call, and the access token handed out is never stale.
///
/// The state sits behind an async mutex which stays locked for the whole
/// refresh round trip: the server rotates the refresh token on every
/// exchange, so two overlapping refreshes would invalidate each other.
pub struct CredentialManager {
    http: HttpClient,
    inner: Mutex<Inner>,
}

impl CredentialManager {
    pub(crate) fn new(http: HttpClient, state: CredentialState) -> Self {
        Self {
            http,
            inner: Mutex::new(Inner {
                state,
                credentials: None,
            }),
        }
    }

    /// Returns the active credential kind.
    pub async fn mode(&self) -> AuthMode {
        self.inner.lock().await.state.mode()
    }

    /// Returns the bearer token for the next request.
    ///
    /// - static token: returned unchanged, never refreshed
    /// - session: refreshed first, then the new access token is returned
    /// - neither: an empty string
    pub async fn current_token(&self) -> Result<String, Error> {
        let mut inner = self.inner.lock().await;
        let refresh_token = match inner.state {
            CredentialState::Static(ref token) => return Ok(token.as_str().to_string()),
            CredentialState::Session(ref pair) => pair.refresh_token.clone(),
            CredentialState::Unauthenticated => return Ok(String::new()),
        };

        let pair = self.exchange(&refresh_token).await?;
        let token = pair.access_token.as_str().to_string();
        inner.state = CredentialState::Session(pair);
        Ok(token)
    }

    /// Log in at `/auth/login`.
    ///
    /// The credentials are remembered for [`relogin`](Self::relogin) and any
    /// static token is dropped.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: Credentials) -> Result<TokenPair, Error> {
        info!("Logging in");

        let mut inner = self.inner.lock().await;
        let request = LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
        };
        let response = self.http.post_unauthed(AUTH_LOGIN, &request).await?;
        if !response.is_success() {
            return Err(AuthError::LoginRejected {
                status: response.status,
                body: response.body,
            }
            .into());
        }

        let pair = decode_pair(&response.body)?;
        inner.state = CredentialState::Session(pair.clone());
        inner.credentials = Some(credentials);

        debug!("Session created successfully");
        Ok(pair)
    }

    /// Log in again with the credentials from the last [`login`](Self::login).
    pub async fn relogin(&self) -> Result<TokenPair, Error> {
        let credentials = self
            .inner
            .lock()
            .await
            .credentials
            .clone()
            .ok_or(AuthError::NoCredentials)?;
        self.login(credentials).await
    }

    /// Invalidate a session pair at `/auth/logout`.
    ///
    /// Falls back to the stored refresh token. The local session is cleared
    /// whatever the server answers; a static token is left in place.
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, refresh_token: Option<RefreshToken>) -> Result<(), Error> {
        info!("Logging out");

        let mut inner = self.inner.lock().await;
        let refresh_token = match refresh_token {
            Some(token) => token,
            None => match inner.state {
                CredentialState::Session(ref pair) => pair.refresh_token.clone(),
                _ => return Err(AuthError::NoSession.into()),
            },
        };

        let result = self
            .http
            .post_unauthed(
                AUTH_LOGOUT,
                &RefreshTokenRequest {
                    refresh_token: refresh_token.as_str(),
                },
            )
            .await;

        if matches!(inner.state, CredentialState::Session(_)) {
            inner.state = CredentialState::Unauthenticated;
        }

        let response = result?;
        if !response.is_success() {
            warn!(
                status = response.status,
                "Server rejected logout; local session cleared anyway"
            );
        }
        Ok(())
    }

    /// Exchange a refresh token for a new pair at `/auth/refresh`.
    ///
    /// Falls back to the stored refresh token. The new pair becomes the
    /// active session unless a static token is active, in which case it is
    /// only returned.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: Option<RefreshToken>) -> Result<TokenPair, Error> {
        info!("Refreshing session");

        let mut inner = self.inner.lock().await;
        let refresh_token = match refresh_token {
            Some(token) => token,
            None => match inner.state {
                CredentialState::Session(ref pair) => pair.refresh_token.clone(),
                _ => return Err(AuthError::NoSession.into()),
            },
        };

        let pair = self.exchange(&refresh_token).await?;
        if !matches!(inner.state, CredentialState::Static(_)) {
            inner.state = CredentialState::Session(pair.clone());
        }
        Ok(pair)
    }

    /// Switch to a static token. Any session pair is dropped locally.
    pub async fn set_static_token(&self, token: StaticToken) {
        info!("Switching to static token");
        self.inner.lock().await.state = CredentialState::Static(token);
    }

    /// Drop the static token, leaving the client unauthenticated until the
    /// next login.
    pub async fn clear_static_token(&self) {
        let mut inner = self.inner.lock().await;
        if matches!(inner.state, CredentialState::Static(_)) {
            info!("Static token cleared");
            inner.state = CredentialState::Unauthenticated;
        }
    }

    /// Returns the current session pair, if a session is active.
    pub async fn export_tokens(&self) -> Option<TokenPair> {
        match self.inner.lock().await.state {
            CredentialState::Session(ref pair) => Some(pair.clone()),
            _ => None,
        }
    }

    async fn exchange(&self, refresh_token: &RefreshToken) -> Result<TokenPair, Error> {
        let response = self
            .http
            .post_unauthed(
                AUTH_REFRESH,
                &RefreshTokenRequest {
                    refresh_token: refresh_token.as_str(),
                },
            )
            .await?;
        if !response.is_success() {
            return Err(AuthError::RefreshRejected {
                status: response.status,
                body: response.body,
            }
            .into());
        }
        let pair = decode_pair(&response.body)?;
        debug!("Session refreshed successfully");
        Ok(pair)
    }
}

fn decode_pair(body: &str) -> Result<TokenPair, Error> {
    let envelope: Envelope<AuthData> = serde_json::from_str(body)?;
    if let Some(expires) = envelope.data.expires {
        debug!(expires_ms = expires, "Access token issued");
    }
    Ok(TokenPair::new(
        envelope.data.access_token,
        envelope.data.refresh_token,
    ))
}

impl std::fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialManager")
            .field("base", self.http.base())
            .field("state", &"[REDACTED]")
            .finish()
    }
}
