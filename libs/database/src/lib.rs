//! Document store connectors and utilities.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client construction, connectivity checks
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_lazy};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "catalog");
//! let client = connect_lazy(&config).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;
