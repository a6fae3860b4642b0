//! Service response envelope for mutation outcomes.
//!
//! # Responsibility
//! - Represent mutation results that may legitimately "not find" a target as
//!   values instead of raised errors.
//!
//! # Invariants
//! - `status_code` is always set.
//! - `body` and `error` are never both set; both may be absent on pure
//!   side-effect success.

use serde::Serialize;
use serde_json::Value;

/// Uniform `{status_code, body, error}` result for mutation operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceResponse {
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServiceResponse {
    /// Success with a payload.
    pub fn ok(body: Value) -> Self {
        Self {
            status_code: 200,
            body: Some(body),
            error: None,
        }
    }

    /// Success for a pure side effect, no payload.
    pub fn ok_empty() -> Self {
        Self {
            status_code: 200,
            body: None,
            error: None,
        }
    }

    /// The mutation target does not exist. An expected runtime condition,
    /// never raised as an error.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status_code: 404,
            body: None,
            error: Some(detail.into()),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceResponse;
    use serde_json::json;

    #[test]
    fn ok_carries_body_without_error() {
        let response = ServiceResponse::ok(json!({"test_id": "t1"}));
        assert_eq!(response.status_code(), 200);
        assert!(response.is_success());
        assert_eq!(response.body().unwrap()["test_id"], "t1");
        assert!(response.error().is_none());
    }

    #[test]
    fn ok_empty_has_neither_body_nor_error() {
        let response = ServiceResponse::ok_empty();
        assert_eq!(response.status_code(), 200);
        assert!(response.body().is_none());
        assert!(response.error().is_none());
    }

    #[test]
    fn not_found_carries_error_without_body() {
        let response = ServiceResponse::not_found("test `x` not found");
        assert_eq!(response.status_code(), 404);
        assert!(!response.is_success());
        assert!(response.body().is_none());
        assert_eq!(response.error(), Some("test `x` not found"));
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let json = serde_json::to_value(ServiceResponse::ok_empty()).unwrap();
        assert_eq!(json, json!({"status_code": 200}));
    }
}
