//! Test fixtures for the catalog crates.
//!
//! - [`TestMongo`]: throwaway MongoDB container (feature `mongo`)
//! - [`TestDataBuilder`]: seeded names, prices and database names so every
//!   test writes to its own database with reproducible data
//! - [`assertions`]: float-tolerant checks for stored prices
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn stores_products() {
//!     let mongo = TestMongo::new().await;
//!     let data = TestDataBuilder::from_test_name("stores_products");
//!     let db = mongo.database(&data.database_name());
//! }
//! ```

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic test data derived from a seed
#[derive(Debug, Clone, Copy)]
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test's name, so reruns produce the same data
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Database name unique to this seed, well under MongoDB's 63-byte limit
    pub fn database_name(&self) -> String {
        format!("test_{:x}", self.seed)
    }

    /// Price in `0.00..1000.00` for the `index`-th product
    pub fn price(&self, index: u64) -> f64 {
        let mixed = self
            .seed
            .wrapping_add(index)
            .wrapping_mul(6_364_136_223_846_793_005);
        (mixed % 100_000) as f64 / 100.0
    }

    /// `test-{kind}-{seed}-{label}`, e.g. `builder.name("product", "lamp")`
    pub fn name(&self, kind: &str, label: &str) -> String {
        format!("test-{}-{}-{}", kind, self.seed, label)
    }
}

pub mod assertions {
    /// Prices are equal to the cent
    pub fn assert_price_eq(actual: f64, expected: f64, context: &str) {
        assert!(
            (actual - expected).abs() < 0.005,
            "{}: expected price {}, got {}",
            context,
            expected,
            actual
        );
    }
}
