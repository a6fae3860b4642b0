//! Like relation entity.
//!
//! # Responsibility
//! - Express the "student likes test" association as a validated record.
//!
//! # Invariants
//! - Both identifiers are non-empty.
//! - The relation is keyed by the (student, test) pair, so applying it twice
//!   is a no-op for the caller.

use crate::validate::{self, check, FieldRule, ValidationError};
use serde::{Deserialize, Serialize};

const LIKE_RULES: &[FieldRule<LikeTest>] = &[
    FieldRule {
        field: "student_id",
        message: "is required and must be non-empty",
        check: |like| validate::non_empty(&like.student_id),
    },
    FieldRule {
        field: "test_id",
        message: "is required and must be non-empty",
        check: |like| validate::non_empty(&like.test_id),
    },
];

/// Relation record: a student liking a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeTest {
    pub student_id: String,
    pub test_id: String,
}

impl LikeTest {
    /// Constructs a validated like relation.
    ///
    /// # Errors
    /// Fails with a `ValidationError` naming each empty identifier.
    pub async fn create(
        student_id: impl Into<String>,
        test_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let like = Self {
            student_id: student_id.into(),
            test_id: test_id.into(),
        };
        like.validate()?;
        Ok(like)
    }

    /// Checks this relation against the like rule table.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check(self, LIKE_RULES)
    }
}
