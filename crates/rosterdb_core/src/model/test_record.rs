//! Test record entity.
//!
//! The mutation-path target: tests are seeded/owned by the backend table and
//! updated or deleted by key through `TestDao`.

use serde::{Deserialize, Serialize};

/// Highest passmark accepted by `TestDao::update_test_details`.
pub const PASSMARK_MAX: u32 = 100;

/// Persisted test record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub test_id: String,
    pub name: String,
    /// Percentage required to pass, `0..=100`.
    pub passmark: u32,
}

impl TestRecord {
    pub fn new(test_id: impl Into<String>, name: impl Into<String>, passmark: u32) -> Self {
        Self {
            test_id: test_id.into(),
            name: name.into(),
            passmark,
        }
    }
}
