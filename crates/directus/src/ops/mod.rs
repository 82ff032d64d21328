//! Bulk and administrative helpers built on the request executor.
//!
//! None of these are transactional. A failure partway through leaves the
//! earlier requests committed on the server, so callers must be ready to
//! re-run them.

mod bulk;
mod relations;
mod schema;

pub use bulk::{DEFAULT_CHUNK_SIZE, DELETE_CHUNK_SIZE};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DecodeError, Error};

/// Decode a `data` payload that must be a JSON array.
pub(crate) fn decode_list<T: DeserializeOwned>(data: Value, what: &str) -> Result<Vec<T>, Error> {
    match data {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(Error::from))
            .collect(),
        other => Err(DecodeError {
            message: format!("expected a list of {}, got {}", what, kind(&other)),
        }
        .into()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
