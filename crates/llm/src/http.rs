use lecturelens_common::{AppError, Result};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::time::Duration;

/// Build the shared HTTP client for provider calls
///
/// Without a timeout, a call waits as long as the provider takes.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| AppError::unexpected(format!("Failed to create HTTP client: {}", e)))
}

/// Body as JSON when it parses, otherwise as a JSON string
pub(crate) fn body_value(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Read a provider response, mapping non-success status to `ProviderError`
///
/// The returned string is the raw body of a successful response.
pub(crate) async fn read_body(provider: &str, response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        AppError::provider(format!("Failed to read {} response: {}", provider, e))
    })?;

    if !status.is_success() {
        return Err(
            AppError::provider(format!("{} request failed with status {}", provider, status.as_u16()))
                .with_details(json!({
                    "status": status.as_u16(),
                    "body": body_value(&body),
                })),
        );
    }

    Ok(body)
}

/// Map a transport-level failure (DNS, connect, timeout) to `ProviderError`
pub(crate) fn send_error(provider: &str, e: reqwest::Error) -> AppError {
    AppError::provider(format!("Failed to send request to {}: {}", provider, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubServer;
    use lecturelens_common::ErrorKind;

    async fn fetch(server: &StubServer) -> Response {
        build_client(None).unwrap().get(&server.url).send().await.unwrap()
    }

    #[test]
    fn test_body_value() {
        assert_eq!(body_value(r#"{"error":"quota"}"#), json!({ "error": "quota" }));
        assert_eq!(body_value("Bad Gateway"), json!("Bad Gateway"));
    }

    #[tokio::test]
    async fn test_read_body_success() {
        let server = StubServer::respond(200, r#"{"ok":true}"#).await;
        let body = read_body("Gemini", fetch(&server).await).await.unwrap();
        assert_eq!(body, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn test_read_body_status_details() {
        let server = StubServer::respond(503, r#"{"error":{"message":"overloaded"}}"#).await;
        let err = read_body("Gemini", fetch(&server).await).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::ProviderError);
        assert_eq!(err.message, "Gemini request failed with status 503");
        assert_eq!(
            err.details.unwrap(),
            json!({ "status": 503, "body": { "error": { "message": "overloaded" } } })
        );
    }

    #[tokio::test]
    async fn test_read_body_plain_text_error() {
        let server = StubServer::respond(502, "Bad Gateway").await;
        let err = read_body("Hugging Face", fetch(&server).await).await.unwrap_err();
        assert_eq!(err.details.unwrap()["body"], "Bad Gateway");
    }
}
