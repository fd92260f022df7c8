//! Configuration for the catalog API

use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_products::mongodb::PRODUCTS_COLLECTION;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    /// Collection holding product documents (`MONGO_COLLECTION`)
    pub collection: String,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    /// Load everything from the environment.
    ///
    /// Fails when `MONGO_URI` is missing or a numeric variable does not parse.
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(env!("CARGO_PKG_NAME"));
        }
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            collection: env_or_default("MONGO_COLLECTION", PRODUCTS_COLLECTION),
            server,
            environment,
        })
    }
}
