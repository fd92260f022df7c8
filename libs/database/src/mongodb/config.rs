#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};

/// Database used when `MONGO_DATABASE` is not set
pub const DEFAULT_DATABASE: &str = "catalog";

/// MongoDB connection settings
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "catalog")
///     .with_app_name("catalog-api");
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string: `mongodb://[username:password@]host[:port][/database][?options]`
    pub url: String,

    /// Database name
    pub database: String,

    /// Application name reported to the server
    pub app_name: Option<String>,

    pub max_pool_size: u32,

    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds; bounds how long a request waits
    /// for an unreachable store before failing
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_database(url, DEFAULT_DATABASE)
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 0,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Connection string with any `user:password@` credentials masked, for logs
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                format!("{}://***@{}", &self.url[..scheme_end], &self.url[at + 1..])
            }
            _ => self.url.clone(),
        }
    }
}

/// Load MongoConfig from environment variables
///
/// - `MONGO_URI` or `MONGODB_URL` (required) - connection string
/// - `MONGO_DATABASE` (optional, default: `catalog`)
/// - `MONGO_APP_NAME` (optional)
/// - `MONGO_MAX_POOL_SIZE` (optional, default: 100)
/// - `MONGO_MIN_POOL_SIZE` (optional, default: 0)
/// - `MONGO_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `MONGO_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("MONGO_URI")
            .or_else(|_| std::env::var("MONGODB_URL"))
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("MONGO_URI".to_string()))?;

        let defaults = MongoConfig::new(url.clone());

        Ok(Self {
            url,
            database: env_or_default("MONGO_DATABASE", DEFAULT_DATABASE),
            app_name: std::env::var("MONGO_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGO_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or("MONGO_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_or(
                "MONGO_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGO_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}
