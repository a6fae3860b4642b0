//! Test DAO: the mutation path.
//!
//! # Responsibility
//! - Update, delete and relate test records by key.
//! - Map backend outcomes into `ServiceResponse` values: 200 on success, 404
//!   when the target is missing.
//!
//! # Invariants
//! - Not-found is always a response value; only backend transport failures
//!   and caller-input violations raise.
//! - `like_test` is an upsert keyed by the (student, test) pair, so repeated
//!   likes are no-ops.

use super::{ensure_table, like_key, student_key, test_key, DaoError, DaoResult};
use crate::model::like::LikeTest;
use crate::model::test_record::{TestRecord, PASSMARK_MAX};
use crate::response::ServiceResponse;
use crate::store::{KeyValueStore, MutateOutcome};
use crate::validate::{self, FieldViolation, ValidationError};
use log::{info, warn};
use serde_json::json;
use std::sync::Arc;

/// DAO for test mutation operations against one table.
pub struct TestDao<S: KeyValueStore> {
    store: Arc<S>,
    table: String,
}

impl<S: KeyValueStore> TestDao<S> {
    /// Binds a DAO to a backend handle and table name.
    pub fn new(store: Arc<S>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Setup check: fails when the bound table does not exist.
    pub async fn validate(&self) -> DaoResult<()> {
        ensure_table(self.store.as_ref(), &self.table).await
    }

    /// Updates a test's name and passmark by id.
    ///
    /// Returns 200 with the updated summary, or 404 when no test matches the
    /// id. An empty id or an out-of-range passmark raises
    /// `DaoError::Validation` before any backend call.
    pub async fn update_test_details(
        &self,
        test_id: &str,
        name: &str,
        passmark: u32,
    ) -> DaoResult<ServiceResponse> {
        let mut violations = Vec::new();
        if !validate::non_empty(test_id) {
            violations.push(FieldViolation {
                field: "test_id",
                message: "is required and must be non-empty",
            });
        }
        if passmark > PASSMARK_MAX {
            violations.push(FieldViolation {
                field: "passmark",
                message: "must be between 0 and 100",
            });
        }
        if !violations.is_empty() {
            return Err(ValidationError::new(violations).into());
        }

        let key = test_key(test_id);
        let patch = json!({ "name": name, "passmark": passmark });
        match self.store.update_item(&self.table, &key, patch).await? {
            MutateOutcome::Applied => {
                info!("event=test_update module=dao status=ok key={key}");
                Ok(ServiceResponse::ok(json!({
                    "test_id": test_id,
                    "name": name,
                    "passmark": passmark,
                })))
            }
            MutateOutcome::TargetMissing => {
                warn!("event=test_update module=dao status=not_found key={key}");
                Ok(ServiceResponse::not_found(format!(
                    "test `{test_id}` not found"
                )))
            }
        }
    }

    /// Deletes a test by id.
    ///
    /// Returns 200 when a record was removed, 404 when no record matched.
    /// Idempotent in effect: deleting an already-absent id is 404, never an
    /// error.
    pub async fn delete_test(&self, test_id: &str) -> DaoResult<ServiceResponse> {
        let key = test_key(test_id);
        match self.store.delete_item(&self.table, &key).await? {
            MutateOutcome::Applied => {
                info!("event=test_delete module=dao status=ok key={key}");
                Ok(ServiceResponse::ok_empty())
            }
            MutateOutcome::TargetMissing => {
                warn!("event=test_delete module=dao status=not_found key={key}");
                Ok(ServiceResponse::not_found(format!(
                    "test `{test_id}` not found"
                )))
            }
        }
    }

    /// Records that a student likes a test.
    ///
    /// Returns 404 when either referenced entity does not exist. The like
    /// edge is upserted under the pair key, so repeating the call does not
    /// duplicate its effect.
    pub async fn like_test(&self, like: &LikeTest) -> DaoResult<ServiceResponse> {
        like.validate()?;

        let student = self
            .store
            .get_item(&self.table, &student_key(&like.student_id))
            .await?;
        if student.is_none() {
            return Ok(ServiceResponse::not_found(format!(
                "student `{}` not found",
                like.student_id
            )));
        }

        let test = self
            .store
            .get_item(&self.table, &test_key(&like.test_id))
            .await?;
        if test.is_none() {
            return Ok(ServiceResponse::not_found(format!(
                "test `{}` not found",
                like.test_id
            )));
        }

        let key = like_key(&like.student_id, &like.test_id);
        let item = serde_json::to_value(like)
            .map_err(|err| DaoError::InvalidData(format!("like encode failed: {err}")))?;
        self.store.put_item(&self.table, &key, item).await?;
        info!("event=test_like module=dao status=ok key={key}");

        Ok(ServiceResponse::ok(json!({
            "student_id": like.student_id,
            "test_id": like.test_id,
            "liked": true,
        })))
    }

    /// Reads one test record back by id.
    pub async fn get_test(&self, test_id: &str) -> DaoResult<Option<TestRecord>> {
        let key = test_key(test_id);
        let Some(item) = self.store.get_item(&self.table, &key).await? else {
            return Ok(None);
        };
        let record = serde_json::from_value(item)
            .map_err(|err| DaoError::InvalidData(format!("test at `{key}`: {err}")))?;
        Ok(Some(record))
    }
}
