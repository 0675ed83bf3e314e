//! Catalog GraphQL routes

use axum::Router;
use domain_catalog::{graphql, MongoProductRepository, ProductService};

use crate::state::AppState;

fn repository(state: &AppState) -> MongoProductRepository {
    MongoProductRepository::new(&state.mongo_client)
        .with_search_backend(state.config.search_backend)
}

/// `/graphql` with the product service injected into the schema
pub fn router(state: &AppState) -> Router {
    let service = ProductService::new(repository(state));
    graphql::router(graphql::build_schema(service))
}

/// Initialize catalog indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    repository(state).init_indexes().await?;
    Ok(())
}
