//! Student DAO: the create path.
//!
//! # Responsibility
//! - Persist validated students through plain or transactional creates.
//! - Translate backend outcomes into the raising create-path contract.
//!
//! # Invariants
//! - Both create operations re-validate before touching the backend.
//! - `txn_create_student` either fully applies or fails; it never partially
//!   writes.

use super::{ensure_table, student_key, DaoError, DaoResult};
use crate::model::student::Student;
use crate::store::{Item, KeyValueStore, PutCondition, WriteAck};
use log::{error, info};
use std::sync::Arc;

/// DAO for student create/read operations against one table.
pub struct StudentDao<S: KeyValueStore> {
    store: Arc<S>,
    table: String,
}

impl<S: KeyValueStore> StudentDao<S> {
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

    /// Unconditional create. Returns the backend write acknowledgment.
    ///
    /// # Errors
    /// - `DaoError::Validation` when the entity fails the rule table; the
    ///   backend is not called in that case.
    /// - `DaoError::Store` when the backend write fails.
    pub async fn create_student(&self, student: &Student) -> DaoResult<WriteAck> {
        student.validate()?;

        let key = student_key(&student.student_id);
        let item = encode_student(student)?;
        match self.store.put_item(&self.table, &key, item).await {
            Ok(ack) => {
                info!("event=student_create module=dao status=ok key={key}");
                Ok(ack)
            }
            Err(err) => {
                error!("event=student_create module=dao status=error key={key} error={err}");
                Err(err.into())
            }
        }
    }

    /// Transactional create: applies only when the key is not already taken.
    ///
    /// All-or-nothing by the backend's conditional-write capability; a
    /// condition conflict surfaces as `DaoError::Store`, never as a partial
    /// write.
    pub async fn txn_create_student(&self, student: &Student) -> DaoResult<WriteAck> {
        student.validate()?;

        let key = student_key(&student.student_id);
        let item = encode_student(student)?;
        match self
            .store
            .put_item_conditional(&self.table, &key, item, PutCondition::KeyAbsent)
            .await
        {
            Ok(ack) => {
                info!("event=student_txn_create module=dao status=ok key={key}");
                Ok(ack)
            }
            Err(err) => {
                error!("event=student_txn_create module=dao status=error key={key} error={err}");
                Err(err.into())
            }
        }
    }

    /// Reads one student back by id.
    pub async fn get_student(&self, student_id: &str) -> DaoResult<Option<Student>> {
        let key = student_key(student_id);
        let Some(item) = self.store.get_item(&self.table, &key).await? else {
            return Ok(None);
        };
        let student = serde_json::from_value(item)
            .map_err(|err| DaoError::InvalidData(format!("student at `{key}`: {err}")))?;
        Ok(Some(student))
    }
}

fn encode_student(student: &Student) -> DaoResult<Item> {
    serde_json::to_value(student)
        .map_err(|err| DaoError::InvalidData(format!("student encode failed: {err}")))
}
