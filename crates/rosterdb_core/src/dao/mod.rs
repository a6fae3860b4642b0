//! DAO orchestration layer.
//!
//! # Responsibility
//! - Orchestrate accept entity -> validate -> backend call -> typed outcome.
//! - Keep the two failure contracts apart: the create path raises `DaoError`,
//!   the mutation path returns `ServiceResponse` values for expected
//!   conditions.
//!
//! # Invariants
//! - Write paths re-validate defensively; a failing entity never reaches the
//!   backend.
//! - Not-found on the mutation path is a response value, never an `Err`.
//! - DAOs hold no entity state between calls.

use crate::store::{KeyValueStore, StoreError};
use crate::validate::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod student_dao;
pub mod test_dao;

const STUDENT_KEY_PREFIX: &str = "student#";
const TEST_KEY_PREFIX: &str = "test#";
const LIKE_KEY_PREFIX: &str = "like#";

pub type DaoResult<T> = Result<T, DaoError>;

/// Failure taxonomy for DAO operations.
#[derive(Debug)]
pub enum DaoError {
    /// One or more entity field constraints violated; raised before any I/O.
    Validation(ValidationError),
    /// The DAO's table is unusable (missing or unreachable).
    Setup(String),
    /// The backend call itself failed after validation passed.
    Store(StoreError),
    /// A persisted item could not be decoded back into its entity shape.
    InvalidData(String),
}

impl Display for DaoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Setup(detail) => write!(f, "dao setup failed: {detail}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(detail) => write!(f, "invalid persisted item: {detail}"),
        }
    }
}

impl Error for DaoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Setup(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for DaoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for DaoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub(crate) fn student_key(student_id: &str) -> String {
    format!("{STUDENT_KEY_PREFIX}{student_id}")
}

pub(crate) fn test_key(test_id: &str) -> String {
    format!("{TEST_KEY_PREFIX}{test_id}")
}

pub(crate) fn like_key(student_id: &str, test_id: &str) -> String {
    format!("{LIKE_KEY_PREFIX}{student_id}#{test_id}")
}

/// Table-existence precondition shared by the DAOs.
///
/// A DAO bound to a missing or unreachable table fails here with a setup
/// error before any write is attempted.
pub(crate) async fn ensure_table<S: KeyValueStore>(store: &S, table: &str) -> DaoResult<()> {
    match store.table_exists(table).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(DaoError::Setup(format!("table `{table}` does not exist"))),
        Err(err) => Err(DaoError::Setup(format!("table `{table}` is unusable: {err}"))),
    }
}
