//! Fixed storage addressing for the product catalog.

/// Name of the full-text index over the product collection.
pub const SEARCH_INDEX: &str = "products-search";

/// Maximum number of hits returned by a term search.
pub const SEARCH_LIMIT: usize = 2;

/// Field targeted by the in-place quantity update.
pub const QUANTITY_PATH: &str = "quantity";

/// Bucket / scope / collection triple addressing a document collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyspace {
    pub bucket: &'static str,
    pub scope: &'static str,
    pub collection: &'static str,
}

impl Keyspace {
    /// Where every product lives.
    pub const PRODUCTS: Keyspace = Keyspace {
        bucket: "catalog",
        scope: "inventory",
        collection: "products",
    };

    /// Database name on a MongoDB cluster.
    pub fn database_name(&self) -> &'static str {
        self.bucket
    }

    /// Collection name on a MongoDB cluster: `<scope>.<collection>`.
    pub fn collection_name(&self) -> String {
        format!("{}.{}", self.scope, self.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_keyspace_mapping() {
        assert_eq!(Keyspace::PRODUCTS.database_name(), "catalog");
        assert_eq!(Keyspace::PRODUCTS.collection_name(), "inventory.products");
    }
}
