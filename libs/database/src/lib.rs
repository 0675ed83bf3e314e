//! Database connectors and utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connection, configuration and health checks
//! - `config` - `core_config::FromEnv` support for the connection settings
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::mongodb::{connect_from_config, MongoConfig};
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config(&config).await?;
//! let status = database::mongodb::check_health(&client).await;
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;
