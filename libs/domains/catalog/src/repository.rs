use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProductResult;
use crate::models::ProductBody;

/// Key/value document store holding product bodies.
///
/// Every call addresses a single key in the repository's fixed keyspace.
/// Implementations perform exactly one round trip per call; there is no
/// read-before-write and the last write wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch the body stored at `key`. Fails with `NotFound`.
    async fn get(&self, key: &str) -> ProductResult<ProductBody>;

    /// Store a body under a new key. Fails with `AlreadyExists`.
    async fn insert(&self, key: &str, body: ProductBody) -> ProductResult<()>;

    /// Overwrite the whole body at `key`. Fails with `NotFound`.
    async fn replace(&self, key: &str, body: ProductBody) -> ProductResult<()>;

    /// Delete `key`. Fails with `NotFound`.
    async fn remove(&self, key: &str) -> ProductResult<()>;

    /// Set one existing top-level field in place, leaving the rest untouched.
    ///
    /// Fails with `NotFound` when the key is absent and `PathMismatch` when
    /// the body has no field at `path`.
    async fn mutate_field(&self, key: &str, path: &str, value: Value) -> ProductResult<()>;

    /// Query the full-text index and return at most `limit` keys in index order.
    async fn search(&self, term: &str, limit: usize) -> ProductResult<Vec<String>>;
}
