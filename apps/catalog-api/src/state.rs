//! Shared application state

use database::mongodb::connect_lazy;
use domain_products::MongoProductRepository;
use mongodb::{Client, Database};

use crate::config::Config;

/// Handles shared by every route; cloning is cheap
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mongo_client: Client,
    pub db: Database,
}

impl AppState {
    /// Build the store handles without waiting for the server to answer.
    ///
    /// An unreachable store surfaces as failed requests, not a failed startup.
    pub async fn connect(config: Config) -> eyre::Result<Self> {
        let mongo_client = connect_lazy(&config.mongodb).await?;
        let db = mongo_client.database(config.mongodb.database());

        Ok(Self {
            config,
            mongo_client,
            db,
        })
    }

    /// Repository over the configured products collection
    pub fn products(&self) -> MongoProductRepository {
        MongoProductRepository::with_collection(&self.db, &self.config.collection)
    }
}
