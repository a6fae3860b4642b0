//! Student entity and factory construction.
//!
//! # Responsibility
//! - Define the persisted student shape.
//! - Construct students with generated identity and a derived registration
//!   timestamp, validated before returning.
//!
//! # Invariants
//! - `student_id` is generated once and never reused.
//! - `registered_at` is an RFC 3339 value, whether derived or supplied.
//! - Derivation and validation stay decoupled: a derived timestamp goes
//!   through the same rule table as a caller-supplied one.

use crate::validate::{self, check, FieldRule, ValidationError};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const STUDENT_RULES: &[FieldRule<Student>] = &[
    FieldRule {
        field: "first_name",
        message: "is required and must be non-empty",
        check: |student| validate::non_empty(&student.first_name),
    },
    FieldRule {
        field: "last_name",
        message: "is required and must be non-empty",
        check: |student| validate::non_empty(&student.last_name),
    },
    FieldRule {
        field: "email",
        message: "must be a valid email address",
        check: |student| validate::valid_email(&student.email),
    },
    FieldRule {
        field: "registered_at",
        message: "must be a valid RFC 3339 date-time",
        check: |student| validate::valid_timestamp(&student.registered_at),
    },
];

/// Persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Generated unique identity (UUID v4, simple form).
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Registration timestamp, RFC 3339.
    pub registered_at: String,
    pub username: String,
}

impl Student {
    /// Constructs a student with a derived registration timestamp of "now".
    ///
    /// # Errors
    /// Fails with a `ValidationError` listing every violated field when any
    /// constraint does not hold.
    pub async fn create(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let registered_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        Self::create_registered_at(first_name, last_name, email, username, registered_at).await
    }

    /// Constructs a student with a caller-supplied registration timestamp.
    ///
    /// The supplied value takes the identical validation step as a derived
    /// one, so a malformed override fails the same way a bad derivation would.
    pub async fn create_registered_at(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        registered_at: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let student = Self {
            student_id: Uuid::new_v4().simple().to_string(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            registered_at: registered_at.into(),
            username: username.into(),
        };
        student.validate()?;
        Ok(student)
    }

    /// Checks this student against the student rule table.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check(self, STUDENT_RULES)
    }
}
