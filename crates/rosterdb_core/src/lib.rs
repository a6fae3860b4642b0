//! Validated entity persistence core for a single-table key-value store.
//! This crate is the single source of truth for write-admission rules and
//! mutation-outcome contracts; the backing store is consumed through the
//! `KeyValueStore` contract.

pub mod dao;
pub mod logging;
pub mod model;
pub mod response;
pub mod store;
pub mod validate;

pub use dao::student_dao::StudentDao;
pub use dao::test_dao::TestDao;
pub use dao::{DaoError, DaoResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::like::LikeTest;
pub use model::student::Student;
pub use model::test_record::{TestRecord, PASSMARK_MAX};
pub use response::ServiceResponse;
pub use store::{
    Item, KeyValueStore, MemoryStore, MutateOutcome, PutCondition, StoreError, StoreResult,
    WriteAck,
};
pub use validate::{FieldRule, FieldViolation, ValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
