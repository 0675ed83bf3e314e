//! MongoDB implementation of ProductRepository

use std::str::FromStr;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, to_bson, to_document, Bson, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Client, Collection, IndexModel,
};
use serde_json::Value;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::keyspace::{Keyspace, SEARCH_INDEX};
use crate::models::ProductBody;
use crate::repository::ProductRepository;

const DUPLICATE_KEY: i32 = 11000;

/// Which engine answers term searches.
///
/// `Text` uses a regular `$text` index and works on any MongoDB deployment.
/// `Atlas` runs a `$search` aggregation against an Atlas Search index of the
/// same name, which has to be created outside the application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchBackend {
    #[default]
    Text,
    Atlas,
}

impl FromStr for SearchBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "atlas" => Ok(Self::Atlas),
            other => Err(format!("unknown search backend '{}'", other)),
        }
    }
}

/// MongoDB implementation of the ProductRepository
///
/// The product key is stored as `_id`; the rest of the document is the body.
pub struct MongoProductRepository {
    collection: Collection<Document>,
    backend: SearchBackend,
}

impl MongoProductRepository {
    /// Repository over the products keyspace
    pub fn new(client: &Client) -> Self {
        Self::with_keyspace(client, &Keyspace::PRODUCTS)
    }

    pub fn with_keyspace(client: &Client, keyspace: &Keyspace) -> Self {
        let collection = client
            .database(keyspace.database_name())
            .collection::<Document>(&keyspace.collection_name());
        Self {
            collection,
            backend: SearchBackend::default(),
        }
    }

    pub fn with_search_backend(mut self, backend: SearchBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Create the full-text index used by the `Text` backend
    pub async fn init_indexes(&self) -> ProductResult<()> {
        if self.backend == SearchBackend::Atlas {
            tracing::info!(index = SEARCH_INDEX, "Atlas Search index is managed externally");
            return Ok(());
        }

        let index = IndexModel::builder()
            .keys(doc! { "name": "text", "tags": "text" })
            .options(
                IndexOptions::builder()
                    .name(SEARCH_INDEX.to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!(index = SEARCH_INDEX, "Product text index created");
        Ok(())
    }

    fn key_filter(key: &str) -> Document {
        doc! { "_id": key }
    }

    fn text_filter(term: &str) -> Document {
        doc! { "$text": { "$search": term } }
    }

    fn atlas_pipeline(term: &str, limit: usize) -> Vec<Document> {
        vec![
            doc! {
                "$search": {
                    "index": SEARCH_INDEX,
                    "text": { "query": term, "path": { "wildcard": "*" } }
                }
            },
            doc! { "$limit": limit as i64 },
            doc! { "$project": { "_id": 1 } },
        ]
    }

    fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
        matches!(
            err.kind.as_ref(),
            ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
        )
    }

    fn hit_key(hit: &Document) -> ProductResult<String> {
        hit.get_str("_id")
            .map(str::to_string)
            .map_err(|e| ProductError::Serialization(format!("search hit without string key: {}", e)))
    }

    async fn exists(&self, key: &str) -> ProductResult<bool> {
        let found = self
            .collection
            .find_one(Self::key_filter(key))
            .projection(doc! { "_id": 1 })
            .await?;
        Ok(found.is_some())
    }
}

/// Integers that fit are written as 32-bit so in-place updates keep the
/// same BSON type the body serializer produces.
fn json_to_bson(value: &Value) -> ProductResult<Bson> {
    if let Some(small) = value.as_i64().and_then(|n| i32::try_from(n).ok()) {
        return Ok(Bson::Int32(small));
    }
    Ok(to_bson(value)?)
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> ProductResult<ProductBody> {
        let document = self
            .collection
            .find_one(Self::key_filter(key))
            .projection(doc! { "_id": 0 })
            .await?
            .ok_or_else(|| ProductError::NotFound(key.to_string()))?;

        Ok(from_document(document)?)
    }

    #[instrument(skip(self, body))]
    async fn insert(&self, key: &str, body: ProductBody) -> ProductResult<()> {
        let mut document = to_document(&body)?;
        document.insert("_id", key);

        self.collection.insert_one(document).await.map_err(|e| {
            if Self::is_duplicate_key(&e) {
                ProductError::AlreadyExists(key.to_string())
            } else {
                e.into()
            }
        })?;

        tracing::info!(product_id = %key, "Product created successfully");
        Ok(())
    }

    #[instrument(skip(self, body))]
    async fn replace(&self, key: &str, body: ProductBody) -> ProductResult<()> {
        let document = to_document(&body)?;
        let result = self
            .collection
            .replace_one(Self::key_filter(key), document)
            .await?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(key.to_string()));
        }

        tracing::info!(product_id = %key, "Product replaced successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> ProductResult<()> {
        let result = self.collection.delete_one(Self::key_filter(key)).await?;

        if result.deleted_count == 0 {
            return Err(ProductError::NotFound(key.to_string()));
        }

        tracing::info!(product_id = %key, "Product deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn mutate_field(&self, key: &str, path: &str, value: Value) -> ProductResult<()> {
        let mut filter = Self::key_filter(key);
        filter.insert(path, doc! { "$exists": true });

        let mut fields = Document::new();
        fields.insert(path, json_to_bson(&value)?);

        let result = self
            .collection
            .update_one(filter, doc! { "$set": fields })
            .await?;

        if result.matched_count == 0 {
            return Err(if self.exists(key).await? {
                ProductError::PathMismatch {
                    key: key.to_string(),
                    path: path.to_string(),
                }
            } else {
                ProductError::NotFound(key.to_string())
            });
        }

        tracing::info!(product_id = %key, path, "Product field updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str, limit: usize) -> ProductResult<Vec<String>> {
        let hits: Vec<Document> = match self.backend {
            SearchBackend::Text => {
                self.collection
                    .find(Self::text_filter(term))
                    .projection(doc! { "_id": 1, "score": { "$meta": "textScore" } })
                    .sort(doc! { "score": { "$meta": "textScore" } })
                    .limit(limit as i64)
                    .await?
                    .try_collect()
                    .await?
            }
            SearchBackend::Atlas => {
                self.collection
                    .aggregate(Self::atlas_pipeline(term, limit))
                    .await?
                    .try_collect()
                    .await?
            }
        };

        hits.iter().map(Self::hit_key).collect()
    }
}
