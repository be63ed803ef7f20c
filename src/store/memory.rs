//! In-memory record store backend
//!
//! Used by tests and `--store memory` dry runs. Tables live behind a single
//! RwLock; primary keys are assigned from a per-table counter seeded at 1.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;

use super::{
    apply_query, id_column, row_matches, tables, Filter, Query, RecordStore, Row, StoreError,
};
use async_trait::async_trait;

#[derive(Default)]
struct TableData {
    next_id: i64,
    rows: Vec<Row>,
}

pub struct MemoryStore {
    inner: RwLock<HashMap<String, TableData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut tables_map = HashMap::new();
        for name in [
            tables::PLAYERS,
            tables::GAMES,
            tables::AT_BATS,
            tables::PITCHES,
            tables::RUNNER_EVENTS,
        ] {
            tables_map.insert(name.to_string(), TableData { next_id: 1, rows: Vec::new() });
        }
        Self {
            inner: RwLock::new(tables_map),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, table: &str, mut row: Row) -> Result<Row, StoreError> {
        let id_col = id_column(table)?;
        let mut guard = self.inner.write().await;
        let data = guard
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;

        match row.get(id_col).and_then(Value::as_i64) {
            // Caller-supplied ids move the counter past themselves
            Some(id) => data.next_id = data.next_id.max(id + 1),
            None => {
                row.insert(id_col.to_string(), Value::from(data.next_id));
                data.next_id += 1;
            }
        }
        data.rows.push(row.clone());
        Ok(row)
    }

    async fn select(&self, table: &str, query: Query) -> Result<Vec<Row>, StoreError> {
        let guard = self.inner.read().await;
        let data = guard
            .get(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        Ok(apply_query(&data.rows, &query))
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Row,
    ) -> Result<Vec<Row>, StoreError> {
        let mut guard = self.inner.write().await;
        let data = guard
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;

        let mut updated = Vec::new();
        for row in data.rows.iter_mut().filter(|r| row_matches(r, filters)) {
            for (k, v) in &patch {
                row.insert(k.clone(), v.clone());
            }
            updated.push(row.clone());
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        let data = guard
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        data.rows.retain(|r| !row_matches(r, filters));
        Ok(())
    }
}
