//! JSON-file record store backend
//!
//! Default backend for local use: each table is one JSON file of rows under
//! the data directory. Writes go to a temp file first and are renamed into
//! place. Query semantics are identical to the in-memory backend.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use super::{
    apply_query, id_column, row_matches, tables, Filter, Query, RecordStore, Row, StoreError,
};
use async_trait::async_trait;

#[derive(Default)]
struct TableData {
    next_id: i64,
    rows: Vec<Row>,
}

pub struct FileStore {
    dir: PathBuf,
    inner: RwLock<HashMap<String, TableData>>,
}

const KNOWN_TABLES: [&str; 5] = [
    tables::PLAYERS,
    tables::GAMES,
    tables::AT_BATS,
    tables::PITCHES,
    tables::RUNNER_EVENTS,
];

impl FileStore {
    /// Open the store rooted at `dir`, loading any existing table files.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;

        let mut tables_map = HashMap::new();
        for name in KNOWN_TABLES {
            let path = table_path(&dir, name);
            let rows: Vec<Row> = if path.exists() {
                let content = fs::read_to_string(&path).await?;
                serde_json::from_str(&content)?
            } else {
                Vec::new()
            };

            let id_col = id_column(name)?;
            let next_id = rows
                .iter()
                .filter_map(|r| r.get(id_col).and_then(Value::as_i64))
                .max()
                .unwrap_or(0)
                + 1;

            tables_map.insert(name.to_string(), TableData { next_id, rows });
        }

        debug!(dir = %dir.display(), "Opened file store");
        Ok(Self {
            dir,
            inner: RwLock::new(tables_map),
        })
    }

    async fn flush(&self, table: &str, rows: &[Row]) -> Result<(), StoreError> {
        let path = table_path(&self.dir, table);
        let json = serde_json::to_string_pretty(rows)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

fn table_path(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("{table}.json"))
}

#[async_trait]
impl RecordStore for FileStore {
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

        let snapshot = data.rows.clone();
        drop(guard);
        self.flush(table, &snapshot).await?;
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

        if !updated.is_empty() {
            let snapshot = data.rows.clone();
            drop(guard);
            self.flush(table, &snapshot).await?;
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        let data = guard
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;

        let before = data.rows.len();
        data.rows.retain(|r| !row_matches(r, filters));
        if data.rows.len() != before {
            let snapshot = data.rows.clone();
            drop(guard);
            self.flush(table, &snapshot).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Row {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_rows_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).await.unwrap();
            store
                .insert(tables::GAMES, obj(json!({"HomeTeam": "Hawks", "AwayTeam": "Owls"})))
                .await
                .unwrap();
        }

        let store = FileStore::open(dir.path()).await.unwrap();
        let rows = store.select(tables::GAMES, Query::new()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("GameID"), Some(&json!(1)));

        // Ids keep counting from the persisted maximum
        let next = store
            .insert(tables::GAMES, obj(json!({"HomeTeam": "Bats", "AwayTeam": "Cubs"})))
            .await
            .unwrap();
        assert_eq!(next.get("GameID"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_delete_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        let created = store
            .insert(tables::PITCHES, obj(json!({"AtBatID": 1, "PitchNo": 1})))
            .await
            .unwrap();
        store
            .delete(
                tables::PITCHES,
                &[Filter::eq("PitchID", created.get("PitchID").cloned().unwrap())],
            )
            .await
            .unwrap();

        let store = FileStore::open(dir.path()).await.unwrap();
        let rows = store.select(tables::PITCHES, Query::new()).await.unwrap();
        assert!(rows.is_empty());
    }
}
