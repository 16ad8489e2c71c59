use actix_web::http::Method;
use actix_web::web;
use futures_util::StreamExt;
use lecturelens_common::AppError;

use crate::cors::{preflight, HISTORY_METHODS, SUMMARIZE_METHODS};
use crate::error::method_not_allowed;

pub mod history;
pub mod summarize;
pub mod system;

/// Collect the whole request body
///
/// Transcripts have no size cap, so the body is streamed here instead of
/// going through the size-limited `web::Bytes` extractor.
pub(crate) async fn read_payload(mut payload: web::Payload) -> Result<web::Bytes, AppError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk =
            chunk.map_err(|e| AppError::unexpected(format!("Failed to read request body: {}", e)))?;
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/summarize")
            .route(web::post().to(summarize::summarize))
            .route(web::method(Method::OPTIONS).to(|| async { preflight(SUMMARIZE_METHODS) }))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/api/history")
            .route(web::get().to(history::list_history))
            .route(web::post().to(history::save_history))
            .route(web::method(Method::OPTIONS).to(|| async { preflight(HISTORY_METHODS) }))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(system::health);
}
