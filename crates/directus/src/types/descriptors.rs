//! Schema descriptors returned by the `/collections`, `/fields` and
//! `/relations` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix the platform reserves for its own collections.
pub const SYSTEM_COLLECTION_PREFIX: &str = "directus";

/// A collection descriptor (`{collection, schema, meta}`).
///
/// The server owns this shape; the client only ever rewrites the embedded
/// collection name, so it is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionDescriptor(pub Value);

impl CollectionDescriptor {
    /// Returns the collection name.
    pub fn name(&self) -> Option<&str> {
        self.0.get("collection").and_then(Value::as_str)
    }

    /// Check if this is a platform system collection.
    pub fn is_system(&self) -> bool {
        self.name()
            .is_some_and(|name| name.starts_with(SYSTEM_COLLECTION_PREFIX))
    }

    /// Point every embedded name at `name`: the top-level `collection`,
    /// `meta.collection` and `schema.name`.
    ///
    /// `meta` and `schema` are left alone when they are not objects (the
    /// server reports folders and schema-less collections with `null`).
    pub fn rename(&mut self, name: &str) {
        let Some(descriptor) = self.0.as_object_mut() else {
            return;
        };
        descriptor.insert("collection".into(), Value::from(name));
        if let Some(meta) = descriptor.get_mut("meta").and_then(Value::as_object_mut) {
            meta.insert("collection".into(), Value::from(name));
        }
        if let Some(schema) = descriptor.get_mut("schema").and_then(Value::as_object_mut) {
            schema.insert("name".into(), Value::from(name));
        }
    }

    /// Returns the inner JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

/// A field descriptor.
///
/// Only the keys the client inspects are typed; everything else rides along
/// in `extra` so a descriptor can be re-posted without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub field: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default)]
    pub schema: Option<Map<String, Value>>,
    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldDescriptor {
    /// Check if the schema flags this field as the primary key.
    pub fn is_primary_key(&self) -> bool {
        self.schema
            .as_ref()
            .and_then(|schema| schema.get("is_primary_key"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Returns the table this field references, if it is a foreign key.
    pub fn foreign_key_table(&self) -> Option<&str> {
        self.schema
            .as_ref()
            .and_then(|schema| schema.get("foreign_key_table"))
            .and_then(Value::as_str)
    }

    /// Drop `meta.id`; the server rejects a field definition that reuses one.
    pub fn strip_meta_id(&mut self) {
        if let Some(meta) = self.meta.as_mut() {
            meta.remove("id");
        }
    }
}

/// The three keys that make up a relation payload.
pub const RELATION_KEYS: [&str; 3] = ["collection", "field", "related_collection"];

/// A relation, projected down to the keys needed to recreate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    pub collection: String,
    pub field: String,
    pub related_collection: Option<String>,
}
