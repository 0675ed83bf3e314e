//! Configuration for Catalog API

use core_config::{app_info, env_parse, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;
use domain_catalog::SearchBackend;

pub use core_config::Environment;

/// Port the GraphQL server listens on unless `PORT` overrides it
pub const DEFAULT_PORT: u16 = 4000;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub search_backend: SearchBackend,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env_with_port(DEFAULT_PORT)?;
        let search_backend = env_parse("SEARCH_BACKEND", SearchBackend::Text)?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            search_backend,
        })
    }
}
