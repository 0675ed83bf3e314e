//! MongoDB database connector and utilities
//!
//! Provides connection management and MongoDB-specific helpers.

mod config;
mod connector;
mod health;

pub use config::{ConnectionProfile, MongoConfig};
pub use connector::{connect, connect_from_config, MongoError};
pub use health::{check_health, HealthStatus};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
