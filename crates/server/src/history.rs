use async_trait::async_trait;
use lecturelens_common::{AppError, Result};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

use crate::types::NewTranscript;

const TABLE: &str = "transcripts";

/// Persistence for saved transcript/summary pairs
///
/// Rows are passed through as the store returns them.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// All rows, newest first
    async fn list(&self) -> Result<Vec<Value>>;

    /// Insert a record and return the stored row
    async fn insert(&self, record: NewTranscript) -> Result<Value>;
}

/// Supabase (PostgREST) backed history
pub struct SupabaseHistoryStore {
    base_url: String,
    api_key: String,
    client: Client,
}

impl SupabaseHistoryStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::unexpected(format!("Failed to create HTTP client: {}", e)))?;

        info!("History store initialized: {}", base_url);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            client,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let body = serde_json::from_str(&body).unwrap_or(Value::String(body));
        Err(AppError::storage(format!("History store returned status {}", status.as_u16()))
            .with_details(json!({ "status": status.as_u16(), "body": body })))
    }
}

#[async_trait]
impl HistoryStore for SupabaseHistoryStore {
    async fn list(&self) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(self.table_url())
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::storage(format!("Failed to reach history store: {}", e)))?;

        let rows: Vec<Value> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::storage(format!("Failed to parse history rows: {}", e)))?;

        debug!("Fetched {} history records", rows.len());
        Ok(rows)
    }

    async fn insert(&self, record: NewTranscript) -> Result<Value> {
        let response = self
            .client
            .post(self.table_url())
            .query(&[("select", "*")])
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(&self.api_key)
            .json(&[record])
            .send()
            .await
            .map_err(|e| AppError::storage(format!("Failed to reach history store: {}", e)))?;

        let rows: Vec<Value> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::storage(format!("Failed to parse inserted row: {}", e)))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::storage("History store returned no inserted row"))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use lecturelens_common::ErrorKind;
    use lecturelens_llm::testing::StubServer;

    fn store_at(url: &str) -> SupabaseHistoryStore {
        SupabaseHistoryStore::new(url, "anon-key", None).unwrap()
    }

    #[test]
    fn test_table_url() {
        let store = store_at("https://abc.supabase.co/");
        assert_eq!(store.table_url(), "https://abc.supabase.co/rest/v1/transcripts");
    }

    #[tokio::test]
    async fn test_list_keeps_rows_as_returned() {
        let rows = r#"[{"id":7,"transcript":"t","summary":null,"created_at":null,"title":"Week 1"}]"#;
        let server = StubServer::respond(200, rows).await;
        let listed = store_at(&server.url).list().await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], 7);
        assert_eq!(listed[0]["summary"], Value::Null);

        let request = server.request().await;
        assert!(request.starts_with("GET /rest/v1/transcripts?select=*&order=created_at.desc "));
        assert!(request.to_lowercase().contains("apikey: anon-key"));
    }

    #[tokio::test]
    async fn test_insert_sends_one_row() {
        let server = StubServer::respond(201, r#"[{"id":1,"title":"Untitled Summary"}]"#).await;
        let row = store_at(&server.url)
            .insert(NewTranscript::new("t".into(), "s".into(), None))
            .await
            .unwrap();
        assert_eq!(row["id"], 1);

        let request = server.request().await;
        assert!(request.to_lowercase().contains("prefer: return=representation"));
        assert!(request.contains(r#"[{"title":"Untitled Summary","transcript":"t","summary":"s"}]"#));
    }

    #[tokio::test]
    async fn test_error_status_carries_details() {
        let server = StubServer::respond(401, r#"{"message":"Invalid API key"}"#).await;
        let err = store_at(&server.url).list().await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::StorageError);
        assert_eq!(err.message, "History store returned status 401");
        assert_eq!(
            err.details.unwrap(),
            json!({ "status": 401, "body": { "message": "Invalid API key" } })
        );
    }

    #[tokio::test]
    async fn test_memory_store_orders_newest_first() {
        let store = memory::MemoryHistoryStore::default();
        store
            .insert(NewTranscript::new("t1".into(), "s1".into(), None))
            .await
            .unwrap();
        store
            .insert(NewTranscript::new("t2".into(), "s2".into(), None))
            .await
            .unwrap();

        let rows = store.list().await.unwrap();
        assert_eq!(rows[0]["transcript"], "t2");
        assert_eq!(rows[1]["transcript"], "t1");
    }
}
