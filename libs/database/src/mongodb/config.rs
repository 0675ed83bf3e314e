#[cfg(feature = "config")]
use core_config::{env_parse, ConfigError, FromEnv};
use std::str::FromStr;
use std::time::Duration;

/// Named latency-tuning profile for the cluster connection.
///
/// `WanDevelopment` stretches the connect and server-selection timeouts for
/// clusters reached over a high-latency link (e.g. a hosted cluster from a
/// laptop).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionProfile {
    #[default]
    Default,
    WanDevelopment,
}

impl ConnectionProfile {
    pub fn connect_timeout(&self) -> Duration {
        match self {
            Self::Default => Duration::from_secs(10),
            Self::WanDevelopment => Duration::from_secs(20),
        }
    }

    pub fn server_selection_timeout(&self) -> Duration {
        match self {
            Self::Default => Duration::from_secs(30),
            Self::WanDevelopment => Duration::from_secs(60),
        }
    }
}

impl FromStr for ConnectionProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "default" => Ok(Self::Default),
            "wan_development" | "wandevelopment" => Ok(Self::WanDevelopment),
            other => Err(format!("unknown connection profile '{}'", other)),
        }
    }
}

/// MongoDB cluster connection settings.
///
/// Only connection-level parameters live here. Which database and collection
/// a repository addresses is fixed by the repository itself.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::{ConnectionProfile, MongoConfig};
///
/// let config = MongoConfig::new("mongodb://localhost:27017")
///     .with_credentials("catalog", "secret")
///     .with_profile(ConnectionProfile::WanDevelopment);
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string, e.g. `mongodb://host:27017`
    pub url: String,

    pub username: Option<String>,

    pub password: Option<String>,

    /// Optional application name shown in server logs
    pub app_name: Option<String>,

    pub profile: ConnectionProfile,

    pub max_pool_size: u32,

    pub min_pool_size: u32,

    pub connect_timeout: Duration,

    pub server_selection_timeout: Duration,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Apply a latency profile, resetting both timeouts to its values.
    pub fn with_profile(mut self, profile: ConnectionProfile) -> Self {
        self.profile = profile;
        self.connect_timeout = profile.connect_timeout();
        self.server_selection_timeout = profile.server_selection_timeout();
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        let profile = ConnectionProfile::default();
        Self {
            url: "mongodb://localhost:27017".to_string(),
            username: None,
            password: None,
            app_name: None,
            profile,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout: profile.connect_timeout(),
            server_selection_timeout: profile.server_selection_timeout(),
        }
    }
}

/// Load MongoConfig from environment variables
///
/// - `MONGODB_URL` or `MONGO_URL` (required)
/// - `MONGODB_USERNAME` / `MONGODB_PASSWORD` (optional, both or neither)
/// - `MONGODB_PROFILE` (optional, `default` | `wan_development`)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 100), `MONGODB_MIN_POOL_SIZE` (default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS`, `MONGODB_SERVER_SELECTION_TIMEOUT_SECS`
///   (default: taken from the profile)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .map_err(|_| ConfigError::MissingEnvVar("MONGODB_URL or MONGO_URL".to_string()))?;

        let username = std::env::var("MONGODB_USERNAME").ok();
        let password = std::env::var("MONGODB_PASSWORD").ok();
        if username.is_some() != password.is_some() {
            return Err(ConfigError::MissingEnvVar(
                "MONGODB_USERNAME and MONGODB_PASSWORD must be set together".to_string(),
            ));
        }

        let profile: ConnectionProfile = env_parse("MONGODB_PROFILE", ConnectionProfile::Default)?;
        let connect_timeout_secs = env_parse(
            "MONGODB_CONNECT_TIMEOUT_SECS",
            profile.connect_timeout().as_secs(),
        )?;
        let server_selection_timeout_secs = env_parse(
            "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
            profile.server_selection_timeout().as_secs(),
        )?;

        Ok(Self {
            url,
            username,
            password,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            profile,
            max_pool_size: env_parse("MONGODB_MAX_POOL_SIZE", 100)?,
            min_pool_size: env_parse("MONGODB_MIN_POOL_SIZE", 5)?,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            server_selection_timeout: Duration::from_secs(server_selection_timeout_secs),
        })
    }
}
