//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for the domain crates:
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: Deterministic event payload generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Features
//!
//! - `postgres` (default): Enables PostgreSQL test infrastructure
//! - `mongo`: Enables MongoDB test infrastructure
//! - `all`: Enables all database test infrastructure
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let user_id = builder.user_id("buyer");
//!     let order = builder.order_completed(&user_id, 10.0);
//! }
//! ```
//!
//! For MongoDB add `features = ["mongo"]` to your dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mongo"] }
//! ```

use serde_json::{Value, json};

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Fixed timestamp carried by every generated payload
pub const TEST_TIMESTAMP: &str = "2024-01-01T00:00:00Z";

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving every value from one seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_lifetime_value");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a user id unique to this builder and `suffix`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.user_id("alice"), "user-7-alice");
    /// ```
    pub fn user_id(&self, suffix: &str) -> String {
        format!("user-{}-{}", self.seed, suffix)
    }

    /// "Page Viewed" payload
    pub fn page_viewed(&self, user_id: &str, url: &str) -> Value {
        json!({
            "type": "Page Viewed",
            "timestamp": TEST_TIMESTAMP,
            "userId": user_id,
            "url": url,
        })
    }

    /// "Order Completed" payload
    pub fn order_completed(&self, user_id: &str, revenue: f64) -> Value {
        json!({
            "type": "Order Completed",
            "timestamp": TEST_TIMESTAMP,
            "userId": user_id,
            "revenue": revenue,
        })
    }

    /// "Heartbeat" payload
    pub fn heartbeat(&self, user_id: &str) -> Value {
        json!({
            "type": "Heartbeat",
            "timestamp": TEST_TIMESTAMP,
            "userId": user_id,
        })
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that two monetary sums agree to six decimal places
    pub fn assert_revenue_eq(actual: f64, expected: f64, context: &str) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "{}: expected revenue {:.6}, got {:.6}",
            context,
            expected,
            actual
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.user_id("a"), builder2.user_id("a"));
        assert_eq!(
            builder1.order_completed("u", 1.5),
            builder2.order_completed("u", 1.5)
        );
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.user_id("a"), builder2.user_id("a"));
    }

    #[test]
    fn test_payloads_carry_discriminator() {
        let builder = TestDataBuilder::new(1);

        assert_eq!(builder.page_viewed("u", "/")["type"], "Page Viewed");
        assert_eq!(builder.order_completed("u", 2.0)["revenue"], 2.0);
        assert_eq!(builder.heartbeat("u")["userId"], "u");
    }

    #[test]
    fn test_assert_revenue_eq_tolerates_float_noise() {
        assertions::assert_revenue_eq(0.1 + 0.2, 0.3, "float sum");
    }
}
