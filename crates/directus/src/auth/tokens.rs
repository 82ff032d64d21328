//! Token types for Directus authentication.

use std::fmt;

macro_rules! opaque_token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw token value.
            pub fn new(token: impl Into<String>) -> Self {
                Self(token.into())
            }

            /// Returns the raw token value.
            ///
            /// Use only when building request headers or persisting a session.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        // Hide token value in Debug output
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&"[REDACTED]").finish()
            }
        }
    };
}

opaque_token!(
    /// A short-lived access token minted by `/auth/login` or `/auth/refresh`.
    AccessToken
);

opaque_token!(
    /// A refresh token, exchanged at `/auth/refresh` for a new token pair.
    RefreshToken
);

opaque_token!(
    /// A caller-supplied token that never expires from the client's point of
    /// view and is never refreshed.
    StaticToken
);

/// An access/refresh token pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: AccessToken::new(access_token),
            refresh_token: RefreshToken::new(refresh_token),
        }
    }
}
