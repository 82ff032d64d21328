//! Core types for the Directus API.
//!
//! This module provides the validated instance URL and the schema
//! descriptors exchanged with the server.

mod base_url;
mod descriptors;

pub use base_url::BaseUrl;
pub use descriptors::{
    CollectionDescriptor, FieldDescriptor, RELATION_KEYS, RelationDescriptor,
    SYSTEM_COLLECTION_PREFIX,
};
