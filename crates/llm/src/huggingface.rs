use async_trait::async_trait;
use lecturelens_common::{AppError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::http::{body_value, build_client, read_body, send_error};
use crate::llm_trait::TextGenerator;
use crate::types::{InferenceOptions, InferenceRequest, InferenceResponse};

const PROVIDER: &str = "Hugging Face";

/// Hugging Face inference API client (secondary provider)
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    base_url: String,
    model: String,
    api_key: String,
    client: Client,
}

impl HuggingFaceClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = build_client(timeout)?;

        info!("Hugging Face client initialized: {} ({})", base_url, model);
        Ok(Self {
            base_url,
            model,
            api_key: api_key.into(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(
            "Sending inference request - Model: {}, Input length: {}",
            self.model,
            prompt.len()
        );

        let request = InferenceRequest {
            inputs: prompt.to_string(),
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error(PROVIDER, e))?;

        let body = read_body(PROVIDER, response).await?;

        let parsed: InferenceResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::provider(format!("Failed to parse {} response: {}", PROVIDER, e))
                .with_raw(body_value(&body))
        })?;

        let text = parsed.text().ok_or_else(|| {
            AppError::provider("Empty summary_text from Hugging Face").with_raw(body_value(&body))
        })?;

        debug!("Received inference response - Length: {}", text.len());
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
    use lecturelens_common::ErrorKind;
    use serde_json::json;

    fn client_at(base_url: &str) -> HuggingFaceClient {
        HuggingFaceClient::new(base_url, "facebook/bart-large-cnn", "hf_test", None).unwrap()
    }

    #[test]
    fn test_endpoint() {
        let client = client_at("https://api-inference.huggingface.co/models");
        assert_eq!(
            client.endpoint(),
            "https://api-inference.huggingface.co/models/facebook/bart-large-cnn"
        );
        assert_eq!(client.name(), "Hugging Face");
    }

    #[tokio::test]
    async fn test_generate_reads_summary_text() {
        let server = StubServer::respond(200, r#"[{"summary_text":"short notes"}]"#).await;
        let text = client_at(&server.url).generate("long passage").await.unwrap();
        assert_eq!(text, "short notes");

        let request = server.request().await;
        assert!(request.starts_with("POST /facebook/bart-large-cnn "));
        assert!(request.to_lowercase().contains("authorization: bearer hf_test"));
        assert!(request.contains(r#""wait_for_model":true"#));
    }

    #[tokio::test]
    async fn test_empty_summary_text_is_provider_error() {
        let server = StubServer::respond(200, r#"[{"summary_text":""}]"#).await;
        let err = client_at(&server.url).generate("long passage").await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::ProviderError);
        assert_eq!(err.message, "Empty summary_text from Hugging Face");
        assert_eq!(err.raw.unwrap(), json!([{ "summary_text": "" }]));
    }

    #[tokio::test]
    async fn test_model_loading_status() {
        let server =
            StubServer::respond(503, r#"{"error":"Model is currently loading","estimated_time":20.0}"#)
                .await;
        let err = client_at(&server.url).generate("long passage").await.unwrap_err();
        assert_eq!(err.details.unwrap()["status"], 503);
    }
}
