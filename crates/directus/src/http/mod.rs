//! HTTP layer.
//!
//! This module provides the transport used by the credential manager and
//! the request executor, plus the endpoint catalogue.

mod client;
pub mod endpoints;

pub use client::{DEFAULT_TIMEOUT, RequestOptions};
pub(crate) use client::{HttpClient, RawResponse, TransportConfig};
