//! Product Service - resolver logic for the catalog API

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::keyspace::{QUANTITY_PATH, SEARCH_LIMIT};
use crate::models::{Product, ProductBody, ProductInput};
use crate::repository::ProductRepository;

/// Product service backing every GraphQL field.
///
/// Each operation is a single repository call (search issues one extra get
/// per hit). Failures are logged here before they reach the API layer.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Get a product by key
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        let body = self
            .repository
            .get(id)
            .await
            .inspect_err(|e| log_failure("get_product", e))?;

        Ok(Product::from_body(id, body))
    }

    /// Search the index for `term` and load each hit, keeping index order
    ///
    /// A hit that no longer resolves fails the whole search.
    #[instrument(skip(self))]
    pub async fn get_all_products_with_term(&self, term: &str) -> ProductResult<Vec<Product>> {
        let keys = self
            .repository
            .search(term, SEARCH_LIMIT)
            .await
            .inspect_err(|e| log_failure("search", e))?;

        let fetches = keys.into_iter().take(SEARCH_LIMIT).map(|key| async move {
            let body = self.repository.get(&key).await?;
            Ok::<_, ProductError>(Product::from_body(key, body))
        });

        try_join_all(fetches)
            .await
            .inspect_err(|e| log_failure("get_all_products_with_term", e))
    }

    /// Store a new product under a freshly minted key
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        let key = Uuid::new_v4().to_string();
        let body = ProductBody::from(input);

        self.repository
            .insert(&key, body.clone())
            .await
            .inspect_err(|e| log_failure("create_product", e))?;

        Ok(Product::from_body(key, body))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<bool> {
        self.repository
            .remove(id)
            .await
            .inspect_err(|e| log_failure("delete_product", e))?;

        Ok(true)
    }

    /// Replace the whole body; fields missing from `input` are dropped
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: ProductInput) -> ProductResult<Product> {
        let body = ProductBody::from(input);

        self.repository
            .replace(id, body.clone())
            .await
            .inspect_err(|e| log_failure("update_product", e))?;

        Ok(Product::from_body(id, body))
    }

    /// Overwrite only the `quantity` field of an existing product
    #[instrument(skip(self))]
    pub async fn set_quantity(&self, id: &str, quantity: i32) -> ProductResult<bool> {
        self.repository
            .mutate_field(id, QUANTITY_PATH, quantity.into())
            .await
            .inspect_err(|e| log_failure("set_quantity", e))?;

        Ok(true)
    }
}

fn log_failure(operation: &'static str, err: &ProductError) {
    if err.is_internal() {
        tracing::error!(operation, code = err.code().as_str(), error = %err, "Storage operation failed");
    } else {
        tracing::warn!(operation, code = err.code().as_str(), error = %err, "Request rejected");
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
