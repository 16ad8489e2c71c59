use async_trait::async_trait;
use lecturelens_common::{AppError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::http::{body_value, build_client, read_body, send_error};
use crate::llm_trait::TextGenerator;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

const PROVIDER: &str = "Gemini";

/// Google Gemini client (primary provider)
#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: Client,
}

impl GeminiClient {
    /// Create new Gemini client
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = build_client(timeout)?;

        info!("Gemini client initialized: {} ({})", base_url, model);
        Ok(Self {
            base_url,
            model,
            api_key: api_key.into(),
            client,
        })
    }

    /// generateContent endpoint for the configured model
    fn endpoint(&self) -> String {
        let model = self.model.strip_prefix("models/").unwrap_or(&self.model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(
            "Sending generateContent request - Model: {}, Prompt length: {}",
            self.model,
            prompt.len()
        );

        let request = GenerateContentRequest::from_prompt(prompt);
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error(PROVIDER, e))?;

        let body = read_body(PROVIDER, response).await?;

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::provider(format!("Failed to parse {} response: {}", PROVIDER, e))
                .with_raw(body_value(&body))
        })?;

        let text = parsed.text().ok_or_else(|| {
            AppError::provider("No summary text returned by Gemini").with_raw(body_value(&body))
        })?;

        debug!("Received Gemini response - Length: {}", text.len());
        Ok(text)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubServer;
    use crate::Summarizer;
    use lecturelens_common::ErrorKind;
    use serde_json::json;
    use std::sync::Arc;

    fn client(model: &str) -> GeminiClient {
        client_at("https://generativelanguage.googleapis.com/v1beta/", model)
    }

    fn client_at(base_url: &str, model: &str) -> GeminiClient {
        GeminiClient::new(base_url, model, "test-key", None).unwrap()
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            client("gemini-1.5-flash").endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(
            client("models/gemini-pro").endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_name() {
        assert_eq!(client("gemini-1.5-flash").name(), "Gemini");
    }

    #[tokio::test]
    async fn test_summarize_through_gemini() {
        let reply = json!({
            "candidates": [{ "content": { "parts": [{ "text": "# Notes\n..." }] } }]
        });
        let server = StubServer::respond(200, &reply.to_string()).await;
        let gemini = client_at(&server.url, "gemini-1.5-flash");
        let summarizer = Summarizer::new(Some(Arc::new(gemini)), None);

        let transcript = "A".repeat(50);
        let summary = summarizer.summarize(&transcript).await.unwrap();
        assert_eq!(summary, "# Notes\n...");

        let request = server.request().await;
        assert!(request.starts_with("POST /models/gemini-1.5-flash:generateContent?key=test-key "));
        assert!(request.contains(&transcript));
    }

    #[tokio::test]
    async fn test_error_status_carries_details() {
        let server =
            StubServer::respond(429, r#"{"error":{"code":429,"status":"RESOURCE_EXHAUSTED"}}"#).await;
        let err = client_at(&server.url, "gemini-1.5-flash")
            .generate("prompt")
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::ProviderError);
        let details = err.details.unwrap();
        assert_eq!(details["status"], 429);
        assert_eq!(details["body"]["error"]["status"], "RESOURCE_EXHAUSTED");
    }

    #[tokio::test]
    async fn test_unparseable_body_carries_raw() {
        let server = StubServer::respond(200, "<html>upstream hiccup</html>").await;
        let err = client_at(&server.url, "gemini-1.5-flash")
            .generate("prompt")
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::ProviderError);
        assert!(err.message.starts_with("Failed to parse Gemini response"));
        assert_eq!(err.raw.unwrap(), json!("<html>upstream hiccup</html>"));
    }

    #[tokio::test]
    async fn test_no_candidates_carries_raw() {
        let server = StubServer::respond(200, r#"{"candidates":[]}"#).await;
        let err = client_at(&server.url, "gemini-1.5-flash")
            .generate("prompt")
            .await
            .unwrap_err();

        assert_eq!(err.message, "No summary text returned by Gemini");
        assert_eq!(err.raw.unwrap(), json!({ "candidates": [] }));
    }
}
