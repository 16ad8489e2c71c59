use actix_web::{web, HttpResponse};
use lecturelens_common::AppError;
use serde_json::Value;
use tracing::info;

use super::read_payload;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::SummarizeResponse;

/// Non-blank `transcript` string from the request body
fn parse_transcript(body: &[u8]) -> Result<String, AppError> {
    let payload: Value = serde_json::from_slice(body)?;

    payload
        .get("transcript")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::invalid_input("Transcript is required"))
}

/// Summarize a lecture transcript
pub async fn summarize(
    state: web::Data<AppState>,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let body = read_payload(payload).await?;
    let transcript = parse_transcript(&body)?;
    info!("Summarize request - Transcript length: {} chars", transcript.chars().count());

    let summary = state.summarizer.summarize(&transcript).await?;

    Ok(HttpResponse::Ok().json(SummarizeResponse { summary }))
}
