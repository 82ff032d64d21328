//! HTTP transport for the Directus REST API.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

use crate::error::Error;
use crate::types::BaseUrl;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-request transport options: query parameters, JSON body and extra
/// headers.
///
/// Extra headers are applied after `Authorization`, so a caller may replace
/// it for a single request.
///
/// # Example
///
/// ```
/// use directus::RequestOptions;
/// use serde_json::json;
///
/// let opts = RequestOptions::new()
///     .query("fields", "id,title")
///     .unbounded()
///     .json(json!({"title": "Hello"}));
/// assert_eq!(opts.query_pairs().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    body: Option<Value>,
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Request an unbounded page (`limit=-1`).
    pub fn unbounded(self) -> Self {
        self.query("limit", -1)
    }

    /// Set the JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Transport settings fixed at client construction.
#[derive(Debug, Clone)]
pub(crate) struct TransportConfig {
    pub verify: bool,
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            verify: true,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

/// A response with its body already read.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON; an empty body is `null`.
    pub fn json(&self) -> Result<Value, Error> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// HTTP client bound to one Directus instance.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    base: BaseUrl,
    verify: bool,
}

impl HttpClient {
    /// Create a new client for the given instance.
    pub fn new(base: BaseUrl, config: &TransportConfig) -> Result<Self, Error> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| concat!("directus-rs/", env!("CARGO_PKG_VERSION")).to_string());

        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(config.timeout);

        if !config.verify {
            // Logged once here rather than on every request.
            warn!(base = %base, "TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            base,
            verify: config.verify,
        })
    }

    /// Returns the instance URL this client is configured for.
    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    pub fn verify(&self) -> bool {
        self.verify
    }

    /// Send a request.
    ///
    /// `token` of `None` sends no `Authorization` header at all (auth
    /// endpoints); `Some("")` sends an empty bearer.
    #[instrument(skip(self, token, opts), fields(base = %self.base))]
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        opts: &RequestOptions,
    ) -> Result<RawResponse, Error> {
        let url = self.base.endpoint(path)?;
        debug!(%method, path, "Directus request");
        trace!(query = ?opts.query, "query parameters");

        let mut request = self.client.request(method, &url);
        if !opts.query.is_empty() {
            request = request.query(&opts.query);
        }
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        for (name, value) in &opts.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(ref body) = opts.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        trace!(status, "Directus response");

        Ok(RawResponse { status, body })
    }

    /// Unauthenticated POST of a serializable body, used by the auth endpoints.
    pub async fn post_unauthed<B>(&self, path: &str, body: &B) -> Result<RawResponse, Error>
    where
        B: Serialize + std::fmt::Debug,
    {
        let opts = RequestOptions::new().json(serde_json::to_value(body)?);
        self.send(Method::POST, path, None, &opts).await
    }
}
