//! Collection and field introspection, and collection duplication.

use serde_json::Value;
use tracing::{info, instrument};

use crate::client::DirectusClient;
use crate::error::{Error, NotFoundError};
use crate::http::RequestOptions;
use crate::http::endpoints;
use crate::types::{CollectionDescriptor, FieldDescriptor};

use super::decode_list;

impl DirectusClient {
    /// All collections, system ones included.
    pub async fn list_collections(&self) -> Result<Vec<CollectionDescriptor>, Error> {
        let data = self
            .fetch(endpoints::COLLECTIONS, &RequestOptions::new())
            .await?;
        decode_list(data, "collections")
    }

    /// The descriptor of one collection.
    pub async fn get_collection(&self, name: &str) -> Result<CollectionDescriptor, Error> {
        let data = self
            .fetch(&endpoints::collection(name), &RequestOptions::new())
            .await?;
        Ok(CollectionDescriptor(data))
    }

    /// Check if a collection named `name` exists.
    pub async fn collection_exists(&self, name: &str) -> Result<bool, Error> {
        Ok(self
            .list_collections()
            .await?
            .iter()
            .any(|collection| collection.name() == Some(name)))
    }

    /// Names of every collection not reserved by the platform.
    pub async fn get_all_user_created_collection_names(&self) -> Result<Vec<String>, Error> {
        Ok(self
            .list_collections()
            .await?
            .iter()
            .filter(|collection| !collection.is_system())
            .filter_map(|collection| collection.name().map(str::to_string))
            .collect())
    }

    /// Field descriptors of `collection`, exactly as the server reports them.
    pub async fn get_fields(&self, collection: &str) -> Result<Vec<FieldDescriptor>, Error> {
        let data = self
            .fetch(&endpoints::fields(collection), &RequestOptions::new())
            .await?;
        decode_list(data, "fields")
    }

    /// Field descriptors of `collection` with `meta.id` removed, ready to be
    /// posted to another collection.
    pub async fn get_all_fields(&self, collection: &str) -> Result<Vec<FieldDescriptor>, Error> {
        let mut fields = self.get_fields(collection).await?;
        fields.iter_mut().for_each(FieldDescriptor::strip_meta_id);
        Ok(fields)
    }

    /// The primary key field of `collection`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no field is flagged as primary key.
    pub async fn get_pk_field(&self, collection: &str) -> Result<FieldDescriptor, Error> {
        self.get_fields(collection)
            .await?
            .into_iter()
            .find(FieldDescriptor::is_primary_key)
            .ok_or_else(|| {
                NotFoundError::PrimaryKey {
                    collection: collection.to_string(),
                }
                .into()
            })
    }

    /// Fields of `collection` that reference another table.
    pub async fn get_all_fk_fields(&self, collection: &str) -> Result<Vec<FieldDescriptor>, Error> {
        Ok(self
            .get_fields(collection)
            .await?
            .into_iter()
            .filter(|field| field.foreign_key_table().is_some())
            .collect())
    }

    /// Copy `source` into a new collection `target`: schema, fields and data.
    ///
    /// The steps run in order and each needs the previous one:
    ///
    /// 1. create `target` from `source`'s descriptor
    /// 2. create every non primary key field of `source` in `target`
    /// 3. read all of `source`'s items
    /// 4. bulk insert them into `target`
    ///
    /// A failure leaves `target` as far as the last completed step got.
    /// Relations are not copied; see [`copy_relations`](Self::copy_relations).
    #[instrument(skip(self))]
    pub async fn duplicate_collection(&self, source: &str, target: &str) -> Result<(), Error> {
        let mut descriptor = self.get_collection(source).await?;
        descriptor.rename(target);
        self.create(
            endpoints::COLLECTIONS,
            &RequestOptions::new().json(descriptor.into_value()),
        )
        .await?;
        info!("Created collection");

        let target_fields = endpoints::fields(target);
        let fields = self.get_all_fields(source).await?;
        let mut copied = 0usize;
        for mut field in fields.into_iter().filter(|f| !f.is_primary_key()) {
            if field.extra.contains_key("collection") {
                field.extra.insert("collection".into(), Value::from(target));
            }
            let body = serde_json::to_value(&field)?;
            self.create(&target_fields, &RequestOptions::new().json(body))
                .await?;
            copied += 1;
        }
        info!(fields = copied, "Copied fields");

        let items: Vec<Value> = decode_list(
            self.fetch(
                &endpoints::items(source),
                &RequestOptions::new().unbounded(),
            )
            .await?,
            "items",
        )?;
        self.bulk_insert(target, &items).await?;
        info!(items = items.len(), "Copied items");

        Ok(())
    }
}
