//! Record store abstraction over the game-event tables
//!
//! Every persisted entity (players, games, at-bats, pitches, runner events)
//! lives in a named table behind the [`RecordStore`] trait: insert returns the
//! created row, select takes exact-match filters plus optional ordering and a
//! limit, update patches matching rows, delete removes them. No transactions.
//!
//! Rows are dynamic JSON objects so the same trait covers the hosted REST
//! backend and the local/in-memory backends; typed domain structs cross the
//! boundary through [`to_row`] / [`from_row`].

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub mod file;
pub mod memory;
pub mod rest;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use rest::RestStore;

/// A single persisted record: column name to JSON value.
pub type Row = Map<String, Value>;

/// Table names used by the tracker schema.
pub mod tables {
    pub const PLAYERS: &str = "Players";
    pub const GAMES: &str = "Games";
    pub const AT_BATS: &str = "AtBats";
    pub const PITCHES: &str = "Pitches";
    pub const RUNNER_EVENTS: &str = "RunnerEvents";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("insert into {0} returned no created row")]
    EmptyInsert(String),

    #[error("update of {0} matched no rows")]
    EmptyUpdate(String),

    #[error("row in {table} is missing column {column}")]
    MissingColumn { table: String, column: String },

    #[error("invalid store URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Exact-match column filter. The observed table-store only ever filters
/// with equality, so that is the whole surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Sort specification for a select.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub descending: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

/// Select parameters: filters, optional order, optional limit.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// CRUD contract of the backing table-store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record and return the created row (with its assigned id).
    async fn insert(&self, table: &str, row: Row) -> Result<Row, StoreError>;

    /// Select rows matching the query.
    async fn select(&self, table: &str, query: Query) -> Result<Vec<Row>, StoreError>;

    /// Patch all rows matching the filters; returns the updated rows.
    async fn update(&self, table: &str, filters: &[Filter], patch: Row)
        -> Result<Vec<Row>, StoreError>;

    /// Delete all rows matching the filters.
    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError>;
}

/// Serialize a domain struct into a dynamic row.
pub fn to_row<T: Serialize>(value: &T) -> Result<Row, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::Codec(serde::ser::Error::custom(
            "record did not serialize to an object",
        ))),
    }
}

/// Deserialize a dynamic row into a domain struct.
pub fn from_row<T: DeserializeOwned>(row: Row) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

/// Read an integer column out of a row, e.g. the assigned primary key of a
/// freshly created record.
pub fn row_i64(row: &Row, table: &str, column: &str) -> Result<i64, StoreError> {
    row.get(column)
        .and_then(Value::as_i64)
        .ok_or_else(|| StoreError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        })
}

/// Primary key column for each table the local backends auto-assign.
pub(crate) fn id_column(table: &str) -> Result<&'static str, StoreError> {
    match table {
        tables::PLAYERS => Ok("PlayerID"),
        tables::GAMES => Ok("GameID"),
        tables::AT_BATS => Ok("AtBatID"),
        tables::PITCHES => Ok("PitchID"),
        tables::RUNNER_EVENTS => Ok("RunnerEventID"),
        other => Err(StoreError::UnknownTable(other.to_string())),
    }
}

pub(crate) fn row_matches(row: &Row, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|f| row.get(&f.column) == Some(&f.value))
}

fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Filter, order, and truncate a snapshot of table rows. Shared by the
/// in-memory and file backends.
pub(crate) fn apply_query(rows: &[Row], query: &Query) -> Vec<Row> {
    let mut out: Vec<Row> = rows
        .iter()
        .filter(|r| row_matches(r, &query.filters))
        .cloned()
        .collect();

    if let Some(order) = &query.order {
        out.sort_by(|a, b| {
            let cmp = compare_values(
                a.get(&order.column).unwrap_or(&Value::Null),
                b.get(&order.column).unwrap_or(&Value::Null),
            );
            if order.descending { cmp.reverse() } else { cmp }
        });
    }

    if let Some(limit) = query.limit {
        out.truncate(limit);
    }

    out
}
