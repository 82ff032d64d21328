//! Authentication types and credential management.
//!
//! A client carries exactly one [`CredentialState`]: a static token, a
//! refreshable session pair, or nothing. The [`CredentialManager`] derives
//! the bearer token for each request from it.

mod credentials;
mod manager;
mod tokens;

pub use credentials::Credentials;
pub use manager::{AuthMode, CredentialManager, CredentialState};
pub use tokens::{AccessToken, RefreshToken, StaticToken, TokenPair};
