//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that creates a MongoDB container for testing.

use mongodb::{Client, Database};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::{TestDataBuilder, TestMongo};
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let builder = TestDataBuilder::from_test_name("my_test");
/// let db = mongo.database(&builder.database_name());
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    pub connection_string: String,
}

impl TestMongo {
    /// Create a new test MongoDB instance
    ///
    /// Uses the MongoDB 7 image.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7.0")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to create MongoDB client");

        tracing::info!(port = host_port, "Test MongoDB ready (mongo 7.0)");

        Self {
            container,
            client,
            connection_string,
        }
    }

    /// Get a cloned client (useful for passing to services)
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// Handle to a database on the test server
    ///
    /// Use a distinct name per test so tests sharing a container stay isolated.
    pub fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }
}
