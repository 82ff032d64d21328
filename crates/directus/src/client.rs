//! The session client and its request executor.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::auth::{
    AuthMode, CredentialManager, CredentialState, Credentials, RefreshToken, StaticToken,
    TokenPair,
};
use crate::error::{ApiError, Error};
use crate::http::{HttpClient, RawResponse, RequestOptions, TransportConfig};
use crate::retry::RetryPolicy;
use crate::types::BaseUrl;

/// Shape of a GET response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Parse the `{data: ...}` envelope and return `data`.
    #[default]
    Json,
    /// Return the raw body, for CSV and other exports.
    Text,
}

/// A GET response in the requested [`ResponseFormat`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    pub fn into_json(self) -> Option<Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Json(_) => None,
        }
    }
}

/// A client bound to one Directus instance.
///
/// All requests flow through the client's credential manager, which picks
/// the bearer token (static, refreshed session, or none). Clients are cheap
/// to clone; clones share the credential state.
///
/// # Example
///
/// ```no_run
/// use directus::DirectusClient;
///
/// # async fn example() -> Result<(), directus::Error> {
/// let client = DirectusClient::builder("http://localhost:8055")
///     .credentials("admin@example.com", "password")
///     .build()
///     .await?;
///
/// let articles = client.fetch("/items/articles", &Default::default()).await?;
/// println!("{}", articles);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DirectusClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    credentials: CredentialManager,
    retry: RetryPolicy,
}

impl DirectusClient {
    /// Start building a client for the instance at `base_url`.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Unauthenticated client with default settings.
    pub async fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        Self::builder(base_url).build().await
    }

    /// Returns the instance URL.
    pub fn base_url(&self) -> &BaseUrl {
        self.inner.http.base()
    }

    /// Whether TLS certificates are verified.
    pub fn verify(&self) -> bool {
        self.inner.http.verify()
    }

    /// The retry policy applied to relation creation.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.inner.retry
    }

    /// The credential manager backing this client.
    pub fn credentials(&self) -> &CredentialManager {
        &self.inner.credentials
    }

    // ========================================================================
    // Credentials
    // ========================================================================

    /// Log in with email and password. Clears any static token.
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<TokenPair, Error> {
        self.inner
            .credentials
            .login(Credentials::new(email, password))
            .await
    }

    /// Log in again with the last credentials passed to [`login`](Self::login).
    pub async fn relogin(&self) -> Result<TokenPair, Error> {
        self.inner.credentials.relogin().await
    }

    /// Invalidate the session; `None` uses the stored refresh token.
    pub async fn logout(&self, refresh_token: Option<RefreshToken>) -> Result<(), Error> {
        self.inner.credentials.logout(refresh_token).await
    }

    /// Exchange a refresh token for a new pair; `None` uses the stored one.
    pub async fn refresh(&self, refresh_token: Option<RefreshToken>) -> Result<TokenPair, Error> {
        self.inner.credentials.refresh(refresh_token).await
    }

    /// Switch to a static token.
    pub async fn set_static_token(&self, token: impl Into<String>) {
        self.inner
            .credentials
            .set_static_token(StaticToken::new(token))
            .await
    }

    /// Drop the static token.
    pub async fn clear_static_token(&self) {
        self.inner.credentials.clear_static_token().await
    }

    /// The bearer token the next request would carry.
    pub async fn current_token(&self) -> Result<String, Error> {
        self.inner.credentials.current_token().await
    }

    pub async fn auth_mode(&self) -> AuthMode {
        self.inner.credentials.mode().await
    }

    /// The active session pair, for persistence.
    pub async fn export_tokens(&self) -> Option<TokenPair> {
        self.inner.credentials.export_tokens().await
    }

    // ========================================================================
    // Request Executor
    // ========================================================================

    /// GET `path` and return the `data` payload.
    pub async fn fetch(&self, path: &str, opts: &RequestOptions) -> Result<Value, Error> {
        let payload = self.fetch_as(path, ResponseFormat::Json, opts).await?;
        Ok(payload.into_json().unwrap_or(Value::Null))
    }

    /// GET `path` and return the raw body.
    pub async fn fetch_text(&self, path: &str, opts: &RequestOptions) -> Result<String, Error> {
        let payload = self.fetch_as(path, ResponseFormat::Text, opts).await?;
        Ok(payload.into_text().unwrap_or_default())
    }

    /// GET `path` in the requested format.
    ///
    /// Fails with [`Error::Api`] when the body carries an `errors` marker or
    /// the status is not a success.
    #[instrument(skip(self, opts))]
    pub async fn fetch_as(
        &self,
        path: &str,
        format: ResponseFormat,
        opts: &RequestOptions,
    ) -> Result<Payload, Error> {
        let response = self.send(Method::GET, path, opts).await?;

        let parsed = serde_json::from_str::<Value>(&response.body).ok();
        let has_errors = parsed
            .as_ref()
            .is_some_and(|body| body.get("errors").is_some());
        if has_errors || !response.is_success() {
            return Err(ApiError::new(response.status, response.body).into());
        }

        match format {
            ResponseFormat::Text => Ok(Payload::Text(response.body)),
            ResponseFormat::Json => {
                let mut body = match parsed {
                    Some(body) => body,
                    None => response.json()?,
                };
                let data = body
                    .get_mut("data")
                    .map(Value::take)
                    .unwrap_or(Value::Null);
                Ok(Payload::Json(data))
            }
        }
    }

    /// POST to `path`. Only HTTP 200 counts as success; the whole response
    /// body is returned.
    #[instrument(skip(self, opts))]
    pub async fn create(&self, path: &str, opts: &RequestOptions) -> Result<Value, Error> {
        let response = self.send(Method::POST, path, opts).await?;
        expect_status(&response, &[200])?;
        response.json()
    }

    /// DELETE `path`. Only HTTP 204 counts as success.
    #[instrument(skip(self, opts))]
    pub async fn remove(&self, path: &str, opts: &RequestOptions) -> Result<(), Error> {
        let response = self.send(Method::DELETE, path, opts).await?;
        expect_status(&response, &[204])
    }

    /// PATCH `path`. HTTP 200 returns the parsed body, 204 returns `null`.
    #[instrument(skip(self, opts))]
    pub async fn modify(&self, path: &str, opts: &RequestOptions) -> Result<Value, Error> {
        let response = self.send(Method::PATCH, path, opts).await?;
        expect_status(&response, &[200, 204])?;
        if response.status == 204 {
            return Ok(Value::Null);
        }
        response.json()
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<RawResponse, Error> {
        let token = self.inner.credentials.current_token().await?;
        let response = self
            .inner
            .http
            .send(method, path, Some(&token), opts)
            .await?;
        debug!(status = response.status, "request complete");
        Ok(response)
    }
}

fn expect_status(response: &RawResponse, accepted: &[u16]) -> Result<(), Error> {
    if accepted.contains(&response.status) {
        Ok(())
    } else {
        Err(ApiError::new(response.status, response.body.clone()).into())
    }
}

impl std::fmt::Debug for DirectusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectusClient")
            .field("base_url", self.inner.http.base())
            .field("verify", &self.inner.http.verify())
            .field("retry", &self.inner.retry)
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}

/// Builder for [`DirectusClient`].
///
/// When several credential sources are set, a static token wins over login
/// credentials, which win over a persisted session pair.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    static_token: Option<StaticToken>,
    credentials: Option<Credentials>,
    session: Option<TokenPair>,
    transport: TransportConfig,
    retry: RetryPolicy,
}

impl ClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            static_token: None,
            credentials: None,
            session: None,
            transport: TransportConfig::default(),
            retry: RetryPolicy::default(),
        }
    }

    /// Authenticate every request with a fixed token.
    pub fn static_token(mut self, token: impl Into<String>) -> Self {
        self.static_token = Some(StaticToken::new(token));
        self
    }

    /// Log in with these credentials when the client is built.
    pub fn credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(email, password));
        self
    }

    /// Resume a previously exported session pair.
    pub fn session(mut self, tokens: TokenPair) -> Self {
        self.session = Some(tokens);
        self
    }

    /// Verify TLS certificates (default `true`).
    pub fn verify(mut self, verify: bool) -> Self {
        self.transport.verify = verify;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.transport.user_agent = Some(agent.into());
        self
    }

    /// Retry policy for the relation id collision.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Build the client, logging in first if credentials were given.
    pub async fn build(self) -> Result<DirectusClient, Error> {
        let base = BaseUrl::new(&self.base_url)?;
        let http = HttpClient::new(base, &self.transport)?;

        let state = match (self.static_token, self.session) {
            (Some(token), _) => CredentialState::Static(token),
            (None, Some(pair)) if self.credentials.is_none() => CredentialState::Session(pair),
            _ => CredentialState::Unauthenticated,
        };
        let login_with = match state {
            CredentialState::Static(_) => None,
            _ => self.credentials,
        };

        let client = DirectusClient {
            inner: Arc::new(ClientInner {
                credentials: CredentialManager::new(http.clone(), state),
                http,
                retry: self.retry,
            }),
        };

        if let Some(credentials) = login_with {
            client.inner.credentials.login(credentials).await?;
        }

        Ok(client)
    }
}
