//! directus - Session-centric client for the Directus v9 REST API
//!
//! All requests flow through a [`DirectusClient`], which owns the credential
//! state (a static token, a refreshable login session, or nothing) and
//! attaches the right bearer token to each call. On top of the four verbs
//! (`fetch`, `create`, `modify`, `remove`) it offers chunked bulk inserts,
//! delete-all, collection duplication and schema introspection.
//!
//! # Example
//!
//! ```no_run
//! use directus::DirectusClient;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), directus::Error> {
//! let client = DirectusClient::builder("http://localhost:8055")
//!     .credentials("admin@example.com", "password")
//!     .build()
//!     .await?;
//!
//! let items: Vec<_> = (0..250).map(|i| json!({"name": format!("item {i}")})).collect();
//! client.bulk_insert("articles", &items).await?;
//!
//! client.duplicate_collection("articles", "articles_backup").await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod ops;
pub mod retry;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{AuthMode, Credentials, TokenPair};
pub use client::{ClientBuilder, DirectusClient, Payload, ResponseFormat};
pub use error::Error;
pub use http::RequestOptions;
pub use retry::RetryPolicy;
pub use types::{BaseUrl, CollectionDescriptor, FieldDescriptor, RelationDescriptor};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
