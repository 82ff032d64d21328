//! Error types for the directus library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, validation and lookup failures.

use std::fmt;
use thiserror::Error;

/// Marker the server puts in the body when a relation payload collides with
/// an existing auto-increment id.
pub(crate) const UNIQUE_ID_COLLISION: &str = "\"id\" has to be unique";

/// The unified error type for directus operations.
///
/// Every fallible operation in the crate returns this type, so callers can
/// match on the variant they care about and propagate the rest.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected login, rejected refresh, no session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The server answered with an unexpected status or an error payload.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A payload failed client-side validation before being sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A delete-all was requested on a collection holding no items.
    #[error("collection '{collection}' has no items to delete")]
    EmptyCollection { collection: String },

    /// A lookup found nothing.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Caller-supplied input was malformed (URL, path, chunk size).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A success response carried a body that could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl Error {
    /// Returns the API error if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Check whether this is the server's duplicate relation id condition.
    pub fn is_unique_id_collision(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_unique_id_collision)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Could not build the underlying HTTP client (TLS backend, headers).
    #[error("client setup failed: {message}")]
    Setup { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_builder() {
            TransportError::Setup {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(DecodeError {
            message: err.to_string(),
        })
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// `/auth/login` rejected the credentials.
    #[error("login rejected (HTTP {status}): {body}")]
    LoginRejected { status: u16, body: String },

    /// `/auth/refresh` rejected the refresh token.
    #[error("refresh rejected (HTTP {status}): {body}")]
    RefreshRejected { status: u16, body: String },

    /// A session operation was requested but no refresh token is available.
    #[error("no active session")]
    NoSession,

    /// Re-login was requested but no credentials were ever supplied.
    #[error("no stored credentials")]
    NoCredentials,
}

/// A non-success response from the API.
///
/// Carries the raw body for diagnostics and, when the body followed the
/// `{"errors": [...]}` convention, the parsed error list.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
    /// Parsed `errors` payload, if present.
    pub errors: Option<serde_json::Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        match self.errors {
            Some(ref errors) => write!(f, ": {}", errors),
            None if !self.body.is_empty() => write!(f, ": {}", self.body),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error from a status and raw body.
    ///
    /// The `errors` list is extracted when the body is a JSON object
    /// carrying one.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let errors = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|mut v| v.get_mut("errors").map(serde_json::Value::take));
        Self {
            status,
            body,
            errors,
        }
    }

    /// Check if the server rejected a relation because its id already exists.
    pub fn is_unique_id_collision(&self) -> bool {
        if self.body.contains(UNIQUE_ID_COLLISION) {
            return true;
        }
        // JSON bodies escape the quotes, so look at the decoded messages too.
        self.messages()
            .iter()
            .any(|message| message.contains(UNIQUE_ID_COLLISION))
    }

    /// Returns the `message` of every entry in the parsed `errors` list.
    pub fn messages(&self) -> Vec<&str> {
        self.errors
            .as_ref()
            .and_then(serde_json::Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.get("message").and_then(serde_json::Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Client-side payload validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A relation payload did not have exactly the expected keys.
    #[error("relation must have exactly the keys {expected:?}, got {actual:?}")]
    RelationKeys {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// A payload that must be a JSON object was something else.
    #[error("{what} must be a JSON object")]
    NotAnObject { what: &'static str },
}

/// Lookup failures.
#[derive(Debug, Error)]
pub enum NotFoundError {
    /// The collection has no field flagged as primary key.
    #[error("collection '{collection}' has no primary key field")]
    PrimaryKey { collection: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// A request path did not start with `/`.
    #[error("invalid path '{value}': must start with '/'")]
    Path { value: String },

    /// A chunk size of zero was requested.
    #[error("chunk size must be at least 1")]
    ChunkSize,
}

/// A response body that could not be decoded.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DecodeError {
    pub message: String,
}
