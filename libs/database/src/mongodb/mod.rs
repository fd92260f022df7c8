//! MongoDB connector and utilities
//!
//! Client construction, ping and background connectivity checks.

mod config;
mod connector;

pub use config::{DEFAULT_DATABASE, MongoConfig};
pub use connector::{MongoError, connect, connect_lazy, ping, spawn_connectivity_check};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
