//! Hosted table-store backend speaking the PostgREST conventions
//!
//! The hosted backend exposes one route per table: `POST /{table}` creates a
//! row (with `Prefer: return=representation` the created row comes back),
//! `GET /{table}?Col=eq.V&order=Col.desc&limit=N` selects, `PATCH` and
//! `DELETE` take the same filter encoding. Authentication is an `apikey`
//! header plus a bearer token.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{Filter, Query, RecordStore, Row, StoreError};
use async_trait::async_trait;

pub struct RestStore {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, StoreError> {
        let mut base_url = Url::parse(base_url)?;
        // A trailing slash keeps Url::join from eating the last path segment
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            api_key,
        })
    }

    fn request(&self, method: Method, table: &str) -> Result<RequestBuilder, StoreError> {
        let url = self.base_url.join(table)?;
        let mut req = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            req = req
                .header("apikey", key)
                .bearer_auth(key);
        }
        Ok(req)
    }

    async fn expect_success(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|f| (f.column.clone(), format!("eq.{}", value_literal(&f.value))))
        .collect()
}

fn value_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn insert(&self, table: &str, row: Row) -> Result<Row, StoreError> {
        debug!(table, "REST insert");
        let response = self
            .request(Method::POST, table)?
            .header("Prefer", "return=representation")
            .json(&Value::Object(row))
            .send()
            .await?;
        let response = Self::expect_success(response).await?;

        let created: Vec<Row> = response.json().await?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::EmptyInsert(table.to_string()))
    }

    async fn select(&self, table: &str, query: Query) -> Result<Vec<Row>, StoreError> {
        let mut params = filter_params(&query.filters);
        if let Some(order) = &query.order {
            let dir = if order.descending { "desc" } else { "asc" };
            params.push(("order".to_string(), format!("{}.{}", order.column, dir)));
        }
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        debug!(table, params = ?params, "REST select");
        let response = self
            .request(Method::GET, table)?
            .query(&params)
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Row,
    ) -> Result<Vec<Row>, StoreError> {
        debug!(table, "REST update");
        let response = self
            .request(Method::PATCH, table)?
            .query(&filter_params(filters))
            .header("Prefer", "return=representation")
            .json(&Value::Object(patch))
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError> {
        debug!(table, "REST delete");
        let response = self
            .request(Method::DELETE, table)?
            .query(&filter_params(filters))
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }
}
