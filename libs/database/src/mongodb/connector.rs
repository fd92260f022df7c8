use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::MongoConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Build a client from `config` without touching the network.
///
/// The driver connects on first use, so a store that is down at startup only
/// fails the requests that need it. A malformed connection string is still
/// rejected here.
pub async fn connect_lazy(config: &MongoConfig) -> Result<Client, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(Client::with_options(options)?)
}

/// Build a client and verify the server answers a `ping`.
pub async fn connect(config: &MongoConfig) -> Result<Client, MongoError> {
    info!("Attempting to connect to MongoDB at {}", config.redacted_url());

    let client = connect_lazy(config).await?;
    ping(&client).await?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Run the `ping` admin command
pub async fn ping(client: &Client) -> Result<(), MongoError> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;
    Ok(())
}

/// Check connectivity in the background and log the outcome.
///
/// Never terminates the process: a store that stays unreachable is reported
/// once at `error` level and the server keeps serving, failing individual
/// requests until the store comes back.
pub fn spawn_connectivity_check(client: Client, retry_config: RetryConfig) -> JoinHandle<bool> {
    tokio::spawn(async move {
        match retry_with_backoff(|| ping(&client), retry_config).await {
            Ok(()) => {
                info!("Connected to MongoDB");
                true
            }
            Err(e) => {
                error!(error = %e, "MongoDB connection error");
                false
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_lazy_rejects_malformed_uri() {
        let config = MongoConfig::new("not-a-mongo-uri");
        let result = connect_lazy(&config).await;
        assert!(matches!(result, Err(MongoError::Mongo(_))));
    }

    #[tokio::test]
    async fn test_connect_lazy_does_not_need_a_server() {
        // Nothing listens on port 1; building the client must still succeed.
        let config = MongoConfig::with_database("mongodb://127.0.0.1:1", "catalog");
        assert!(connect_lazy(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_connectivity_check_reports_unreachable_store() {
        let mut config = MongoConfig::with_database("mongodb://127.0.0.1:1", "catalog");
        config.server_selection_timeout_secs = 1;
        config.connect_timeout_secs = 1;
        let client = connect_lazy(&config).await.unwrap();

        let retry = RetryConfig::new().with_max_retries(0);
        let connected = spawn_connectivity_check(client, retry).await.unwrap();

        assert!(!connected);
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect() {
        let url = std::env::var("MONGO_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let config = MongoConfig::new(url);
        assert!(connect(&config).await.is_ok());
    }
}
