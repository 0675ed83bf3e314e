//! Catalog Domain
//!
//! Products stored as key/value documents in MongoDB, exposed through a
//! GraphQL schema.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   GraphQL   │  ← Query / Mutation roots, /graphql router
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Key minting, search hydration, error logging
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Keyed document access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Stored body, GraphQL input and output types
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{graphql, MongoProductRepository, ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//!
//! let repository = MongoProductRepository::new(&client);
//! repository.init_indexes().await?;
//!
//! let schema = graphql::build_schema(ProductService::new(repository));
//! let router = graphql::router(schema);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod graphql;
pub mod keyspace;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use graphql::{build_schema, CatalogSchema};
pub use keyspace::Keyspace;
pub use models::{Product, ProductBody, ProductInput};
pub use self::mongodb::{MongoProductRepository, SearchBackend};
pub use repository::ProductRepository;
pub use service::ProductService;
