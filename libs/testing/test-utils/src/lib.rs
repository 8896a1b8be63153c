//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied
//! - `TestDataBuilder`: deterministic test data generation

use uuid::Uuid;

pub mod postgres;

pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization.
///
/// Seeding from the test name keeps tests reproducible while avoiding
/// collisions between parallel tests.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (seed = hash of the name)
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    fn seeded_uuid(&self, discriminant: u64) -> Uuid {
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        uuid_bytes[8..16].copy_from_slice(&discriminant.to_le_bytes());
        Uuid::from_bytes(uuid_bytes)
    }

    /// Deterministic user ID for this test
    pub fn user_id(&self) -> Uuid {
        self.seeded_uuid(0)
    }

    /// Deterministic product ID, distinct per index
    pub fn product_id(&self, index: u64) -> Uuid {
        self.seeded_uuid(1 + index)
    }

    /// Unique name like `test-product-12345-main`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Unique email scoped to this test's seed
    pub fn email(&self, local: &str) -> String {
        format!("{}-{}@example.com", local, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_is_deterministic() {
        let a = TestDataBuilder::from_test_name("some_test");
        let b = TestDataBuilder::from_test_name("some_test");
        assert_eq!(a.user_id(), b.user_id());
        assert_eq!(a.product_id(3), b.product_id(3));
        assert_eq!(a.email("buyer"), b.email("buyer"));
    }

    #[test]
    fn test_builder_ids_are_distinct() {
        let builder = TestDataBuilder::from_test_name("some_test");
        assert_ne!(builder.user_id(), builder.product_id(0));
        assert_ne!(builder.product_id(0), builder.product_id(1));
    }
}
