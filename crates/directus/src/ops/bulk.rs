//! Chunked item insert and delete.

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::client::DirectusClient;
use crate::error::{Error, InvalidInputError};
use crate::http::RequestOptions;
use crate::http::endpoints;

use super::decode_list;

/// Items per create call; the server's page size for a single insert.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Ids per delete call.
pub const DELETE_CHUNK_SIZE: usize = 100;

impl DirectusClient {
    /// Insert `items` into `collection`, [`DEFAULT_CHUNK_SIZE`] per request.
    pub async fn bulk_insert(&self, collection: &str, items: &[Value]) -> Result<(), Error> {
        self.bulk_insert_chunked(collection, items, DEFAULT_CHUNK_SIZE).await
    }

    /// Insert `items` into `collection`, at most `chunk_size` per request.
    ///
    /// Chunks are sent in input order, one at a time. The first failing
    /// chunk aborts the insert; earlier chunks stay committed.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn bulk_insert_chunked(
        &self,
        collection: &str,
        items: &[Value],
        chunk_size: usize,
    ) -> Result<(), Error> {
        if chunk_size == 0 {
            return Err(InvalidInputError::ChunkSize.into());
        }

        let path = endpoints::items(collection);
        let total = items.len();
        for (index, chunk) in items.chunks(chunk_size).enumerate() {
            let start = index * chunk_size;
            info!("Inserting {}-{} of {}", start, start + chunk.len(), total);
            let opts = RequestOptions::new().json(Value::Array(chunk.to_vec()));
            self.create(&path, &opts).await?;
        }
        Ok(())
    }

    /// Delete every item in `collection`. Returns the number deleted.
    ///
    /// Ids are read through the collection's primary key field and deleted
    /// [`DELETE_CHUNK_SIZE`] at a time.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if there is nothing to delete; no delete
    /// request is sent then.
    #[instrument(skip(self))]
    pub async fn delete_all_items(&self, collection: &str) -> Result<usize, Error> {
        let pk = self.get_pk_field(collection).await?.field;
        let path = endpoints::items(collection);

        let opts = RequestOptions::new().query("fields", &pk).unbounded();
        let items: Vec<Value> = decode_list(self.fetch(&path, &opts).await?, "items")?;
        let ids: Vec<Value> = items
            .into_iter()
            .filter_map(|mut item| item.get_mut(&pk).map(Value::take))
            .collect();

        if ids.is_empty() {
            return Err(Error::EmptyCollection {
                collection: collection.to_string(),
            });
        }

        debug!(count = ids.len(), pk = %pk, "Deleting items");
        for chunk in ids.chunks(DELETE_CHUNK_SIZE) {
            let opts = RequestOptions::new().json(Value::Array(chunk.to_vec()));
            self.remove(&path, &opts).await?;
        }
        info!(count = ids.len(), "Deleted all items");
        Ok(ids.len())
    }
}
