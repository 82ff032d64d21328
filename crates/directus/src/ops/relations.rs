//! Relation introspection and creation.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::client::DirectusClient;
use crate::error::{Error, ValidationError};
use crate::http::RequestOptions;
use crate::http::endpoints;
use crate::types::{RELATION_KEYS, RelationDescriptor};

use super::decode_list;

impl DirectusClient {
    /// Relations declared on `collection`, projected to
    /// `{collection, field, related_collection}`.
    pub async fn get_relations(&self, collection: &str) -> Result<Vec<RelationDescriptor>, Error> {
        let data = self
            .fetch(&endpoints::relations(collection), &RequestOptions::new())
            .await?;
        decode_list(data, "relations")
    }

    /// Create a relation.
    ///
    /// The payload must serialize to an object with exactly the keys
    /// `collection`, `field` and `related_collection`; anything else fails
    /// with [`Error::Validation`] before a request is made. A
    /// `"id" has to be unique` rejection is retried per the client's
    /// [`RetryPolicy`](crate::RetryPolicy).
    #[instrument(skip(self, relation))]
    pub async fn post_relation<R>(&self, relation: &R) -> Result<(), Error>
    where
        R: Serialize + ?Sized,
    {
        let payload = serde_json::to_value(relation)?;
        validate_relation(&payload)?;

        let opts = RequestOptions::new().json(payload);
        self.retry_policy()
            .run(
                || self.create(endpoints::RELATIONS, &opts),
                Error::is_unique_id_collision,
            )
            .await?;
        Ok(())
    }

    /// Recreate every relation of `source` on `target`. Returns how many
    /// were posted.
    #[instrument(skip(self))]
    pub async fn copy_relations(&self, source: &str, target: &str) -> Result<usize, Error> {
        let relations = self.get_relations(source).await?;
        for relation in &relations {
            let relation = RelationDescriptor {
                collection: target.to_string(),
                ..relation.clone()
            };
            self.post_relation(&relation).await?;
        }
        info!(count = relations.len(), "Copied relations");
        Ok(relations.len())
    }
}

fn validate_relation(payload: &Value) -> Result<(), ValidationError> {
    let object = payload
        .as_object()
        .ok_or(ValidationError::NotAnObject { what: "relation" })?;

    let actual: BTreeSet<&str> = object.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = RELATION_KEYS.into_iter().collect();
    if actual != expected {
        return Err(ValidationError::RelationKeys {
            expected: expected.into_iter().map(str::to_string).collect(),
            actual: actual.into_iter().map(str::to_string).collect(),
        });
    }
    Ok(())
}
