//! Declarative entity validation engine.
//!
//! # Responsibility
//! - Define the rule-table shape shared by all entity types.
//! - Evaluate rule tables exhaustively and collect every violation.
//! - Provide the shared field predicates (non-empty, email, timestamp).
//!
//! # Invariants
//! - Rule evaluation is pure: no I/O, no shared state, never raises.
//! - Every rule in a table is checked; diagnostics are never first-only.
//! - Raising a `ValidationError` is the caller's decision (factory or DAO),
//!   not the engine's.

use chrono::DateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("valid email regex"));

/// One violated field constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    /// Entity field name as exposed to callers.
    pub field: &'static str,
    /// Human-readable description of the violated rule.
    pub message: &'static str,
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// One entry of an entity rule table.
///
/// `check` returns `true` when the candidate satisfies the rule.
pub struct FieldRule<T> {
    pub field: &'static str,
    pub message: &'static str,
    pub check: fn(&T) -> bool,
}

/// Evaluates every rule against the candidate and collects all violations.
///
/// Returns an empty vector when the candidate is fully valid.
pub fn run_rules<T>(candidate: &T, rules: &[FieldRule<T>]) -> Vec<FieldViolation> {
    rules
        .iter()
        .filter(|rule| !(rule.check)(candidate))
        .map(|rule| FieldViolation {
            field: rule.field,
            message: rule.message,
        })
        .collect()
}

/// Validation failure carrying every violated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Wraps a non-empty violation list produced by `run_rules`.
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// All violated field constraints, in rule-table order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Violated field names only, for compact matching in callers and tests.
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity validation failed: ")?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

/// Checks a candidate against its rule table, raising on any violation.
pub fn check<T>(candidate: &T, rules: &[FieldRule<T>]) -> Result<(), ValidationError> {
    let violations = run_rules(candidate, rules);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}

/// Required-string predicate: non-empty after trimming.
pub fn non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Email predicate: `local@domain` with at least one dot in the domain.
pub fn valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Timestamp predicate: must parse as a real RFC 3339 calendar date-time.
///
/// A merely "truthy" string is not enough; a logically impossible date
/// (e.g. February 30th) fails here the same way a malformed one does.
pub fn valid_timestamp(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::{check, non_empty, run_rules, valid_email, valid_timestamp, FieldRule};

    struct Candidate {
        name: String,
        email: String,
    }

    const CANDIDATE_RULES: &[FieldRule<Candidate>] = &[
        FieldRule {
            field: "name",
            message: "is required",
            check: |c| non_empty(&c.name),
        },
        FieldRule {
            field: "email",
            message: "must be a valid email address",
            check: |c| valid_email(&c.email),
        },
    ];

    #[test]
    fn run_rules_collects_every_violation() {
        let candidate = Candidate {
            name: "   ".to_string(),
            email: "not-an-email".to_string(),
        };

        let violations = run_rules(&candidate, CANDIDATE_RULES);
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["name", "email"]);
    }

    #[test]
    fn check_passes_valid_candidate() {
        let candidate = Candidate {
            name: "Joe".to_string(),
            email: "joe@example.com".to_string(),
        };
        assert!(check(&candidate, CANDIDATE_RULES).is_ok());
    }

    #[test]
    fn email_requires_dotted_domain() {
        assert!(valid_email("joeboxer@gmail.com"));
        assert!(valid_email("a.b@mail.example.org"));
        assert!(!valid_email("joeboxer"));
        assert!(!valid_email("joe@gmail"));
        assert!(!valid_email("joe@.com"));
        assert!(!valid_email("joe boxer@gmail.com"));
    }

    #[test]
    fn timestamp_rejects_impossible_dates() {
        assert!(valid_timestamp("2021-11-05T14:48:00Z"));
        assert!(valid_timestamp("2021-11-05T14:48:00.123+02:00"));
        assert!(!valid_timestamp("not-a-date"));
        assert!(!valid_timestamp("2021-02-30T00:00:00Z"));
        assert!(!valid_timestamp(""));
    }
}
