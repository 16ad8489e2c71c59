use actix_web::{web, HttpResponse};
use lecturelens_common::AppError;
use serde_json::Value;
use tracing::info;

use super::read_payload;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::NewTranscript;

/// Re-label a store failure, keeping the original message as detail
fn store_failure(message: &str, e: AppError) -> AppError {
    let details = e.details.clone().unwrap_or(Value::Null);
    AppError::storage(message).with_details(serde_json::json!({
        "message": e.message,
        "upstream": details,
    }))
}

fn non_empty(payload: &Value, field: &str) -> Option<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// List saved summaries, newest first
pub async fn list_history(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let store = state.history_store()?;
    let records = store
        .list()
        .await
        .map_err(|e| store_failure("Failed to fetch history", e))?;

    Ok(HttpResponse::Ok().json(records))
}

/// Save a transcript/summary pair
pub async fn save_history(
    state: web::Data<AppState>,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let store = state.history_store()?;
    let body = read_payload(payload).await?;
    let payload: Value = serde_json::from_slice(&body).map_err(AppError::from)?;

    let (transcript, summary) = match (non_empty(&payload, "transcript"), non_empty(&payload, "summary")) {
        (Some(t), Some(s)) => (t, s),
        _ => return Err(AppError::invalid_input("Transcript and summary are required").into()),
    };
    let title = non_empty(&payload, "title");

    let record = store
        .insert(NewTranscript::new(transcript, summary, title))
        .await
        .map_err(|e| store_failure("Failed to save summary", e))?;

    info!("Saved history record {}", record.get("id").unwrap_or(&serde_json::Value::Null));
    Ok(HttpResponse::Ok().json(record))
}
