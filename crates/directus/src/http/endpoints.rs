//! Endpoint paths and auth request/response types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Auth
// ============================================================================

/// POST, `{email, password}` -> token pair
pub const AUTH_LOGIN: &str = "/auth/login";

/// POST, `{refresh_token}` -> token pair
pub const AUTH_REFRESH: &str = "/auth/refresh";

/// POST, `{refresh_token}`
pub const AUTH_LOGOUT: &str = "/auth/logout";

// ============================================================================
// Resources
// ============================================================================

pub const COLLECTIONS: &str = "/collections";

pub const RELATIONS: &str = "/relations";

/// `/items/{collection}`
pub fn items(collection: &str) -> String {
    format!("/items/{}", collection)
}

/// `/collections/{name}`
pub fn collection(name: &str) -> String {
    format!("{}/{}", COLLECTIONS, name)
}

/// `/fields/{collection}`
pub fn fields(collection: &str) -> String {
    format!("/fields/{}", collection)
}

/// `/relations/{collection}`
pub fn relations(collection: &str) -> String {
    format!("{}/{}", RELATIONS, collection)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for refresh and logout.
#[derive(Debug, Serialize)]
pub(crate) struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
}

/// The `{data: ...}` envelope every JSON response is wrapped in.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthData {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in milliseconds.
    #[serde(default)]
    pub expires: Option<u64>,
}
