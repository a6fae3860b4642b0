//! Persistence backend contract.
//!
//! # Responsibility
//! - Define the minimal single-table key-value contract the DAOs consume.
//! - Keep transport concerns (network, retries, table provisioning) outside
//!   the core.
//!
//! # Invariants
//! - `update`/`delete` report a missing target as a `MutateOutcome`, not an
//!   error; transport failures stay errors.
//! - Conditional put is the sole same-key atomicity primitive; the core holds
//!   no locks of its own.

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;

pub use memory::MemoryStore;

/// Opaque stored item: a JSON object keyed by field name.
pub type Item = serde_json::Value;

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend transport/transaction failure taxonomy.
#[derive(Debug)]
pub enum StoreError {
    /// The named table does not exist or is unreachable.
    MissingTable(String),
    /// A conditional put found its condition unsatisfied.
    ConditionFailed { table: String, key: String },
    /// The backend call exceeded its deadline. Distinct from not-found.
    Timeout(String),
    /// Any other backend-side failure (network, storage).
    Backend(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTable(table) => write!(f, "table `{table}` does not exist"),
            Self::ConditionFailed { table, key } => {
                write!(f, "conditional put on `{table}`/`{key}` failed its condition")
            }
            Self::Timeout(detail) => write!(f, "backend call timed out: {detail}"),
            Self::Backend(detail) => write!(f, "backend failure: {detail}"),
        }
    }
}

impl Error for StoreError {}

/// Acknowledgment for a completed write, carrying the written key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAck {
    key: String,
}

impl WriteAck {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The key the write landed on. Never empty for a successful write.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Condition attached to a conditional put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutCondition {
    /// The write applies only when the key is not already present.
    KeyAbsent,
}

/// Outcome of an update/delete aimed at one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutateOutcome {
    /// The target existed and the mutation was applied.
    Applied,
    /// No record matched the key. Not an error.
    TargetMissing,
}

/// Single-table key-value backend consumed by the DAOs.
///
/// Implementations own connection and table lifecycle; the core only issues
/// these calls and suspends at them.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Whether the named table exists and is usable.
    async fn table_exists(&self, table: &str) -> StoreResult<bool>;

    /// Reads one item by key.
    async fn get_item(&self, table: &str, key: &str) -> StoreResult<Option<Item>>;

    /// Unconditional write; overwrites any existing item under the key.
    async fn put_item(&self, table: &str, key: &str, item: Item) -> StoreResult<WriteAck>;

    /// Conditional write; applies fully or fails with `ConditionFailed`.
    async fn put_item_conditional(
        &self,
        table: &str,
        key: &str,
        item: Item,
        condition: PutCondition,
    ) -> StoreResult<WriteAck>;

    /// Merges the patch's top-level fields into the item under the key.
    async fn update_item(&self, table: &str, key: &str, patch: Item) -> StoreResult<MutateOutcome>;

    /// Removes the item under the key.
    async fn delete_item(&self, table: &str, key: &str) -> StoreResult<MutateOutcome>;
}
