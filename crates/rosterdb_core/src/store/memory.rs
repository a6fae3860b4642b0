//! In-memory reference backend.
//!
//! # Responsibility
//! - Implement `KeyValueStore` over process-local tables for tests and
//!   embedded use.
//! - Provide table lifecycle/seeding helpers that a networked backend would
//!   own externally.
//!
//! # Invariants
//! - Conditional puts are checked and applied under one write-lock hold.
//! - `update_item` merges top-level fields; it never creates a missing item.

use super::{Item, KeyValueStore, MutateOutcome, PutCondition, StoreError, StoreResult, WriteAck};
use async_trait::async_trait;
use log::info;
use std::collections::HashMap;
use tokio::sync::RwLock;

type Table = HashMap<String, Item>;

/// Process-local `KeyValueStore` implementation.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table. Recreating an existing table clears it.
    pub async fn create_table(&self, table: impl Into<String>) {
        let table = table.into();
        let mut tables = self.tables.write().await;
        tables.insert(table.clone(), Table::new());
        info!("event=table_create module=store status=ok table={table}");
    }

    /// Drops a table and everything in it.
    pub async fn drop_table(&self, table: &str) {
        let mut tables = self.tables.write().await;
        tables.remove(table);
        info!("event=table_drop module=store status=ok table={table}");
    }

    /// Seeds keyed items into an existing table.
    pub async fn seed(
        &self,
        table: &str,
        items: impl IntoIterator<Item = (String, Item)>,
    ) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::MissingTable(table.to_string()))?;
        for (key, item) in items {
            rows.insert(key, item);
        }
        Ok(())
    }

    /// Number of items currently stored in a table.
    pub async fn item_count(&self, table: &str) -> StoreResult<usize> {
        let tables = self.tables.read().await;
        tables
            .get(table)
            .map(Table::len)
            .ok_or_else(|| StoreError::MissingTable(table.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn table_exists(&self, table: &str) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.contains_key(table))
    }

    async fn get_item(&self, table: &str, key: &str) -> StoreResult<Option<Item>> {
        let tables = self.tables.read().await;
        let rows = tables
            .get(table)
            .ok_or_else(|| StoreError::MissingTable(table.to_string()))?;
        Ok(rows.get(key).cloned())
    }

    async fn put_item(&self, table: &str, key: &str, item: Item) -> StoreResult<WriteAck> {
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::MissingTable(table.to_string()))?;
        rows.insert(key.to_string(), item);
        Ok(WriteAck::new(key))
    }

    async fn put_item_conditional(
        &self,
        table: &str,
        key: &str,
        item: Item,
        condition: PutCondition,
    ) -> StoreResult<WriteAck> {
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::MissingTable(table.to_string()))?;

        match condition {
            PutCondition::KeyAbsent => {
                if rows.contains_key(key) {
                    return Err(StoreError::ConditionFailed {
                        table: table.to_string(),
                        key: key.to_string(),
                    });
                }
            }
        }

        rows.insert(key.to_string(), item);
        Ok(WriteAck::new(key))
    }

    async fn update_item(&self, table: &str, key: &str, patch: Item) -> StoreResult<MutateOutcome> {
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::MissingTable(table.to_string()))?;

        let Some(existing) = rows.get_mut(key) else {
            return Ok(MutateOutcome::TargetMissing);
        };

        match (existing.as_object_mut(), patch.as_object()) {
            (Some(target), Some(fields)) => {
                for (field, value) in fields {
                    target.insert(field.clone(), value.clone());
                }
                Ok(MutateOutcome::Applied)
            }
            _ => Err(StoreError::Backend(format!(
                "update on `{table}`/`{key}` requires object items"
            ))),
        }
    }

    async fn delete_item(&self, table: &str, key: &str) -> StoreResult<MutateOutcome> {
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::MissingTable(table.to_string()))?;
        match rows.remove(key) {
            Some(_) => Ok(MutateOutcome::Applied),
            None => Ok(MutateOutcome::TargetMissing),
        }
    }
}
