use actix_web::{get, web, HttpResponse};

use crate::state::AppState;
use crate::types::HealthResponse;

/// Liveness plus which summarization path is active
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        service: "lecturelens",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.summarizer.choice(),
        history_configured: state.history.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use lecturelens_llm::testing::StubGenerator;
    use lecturelens_llm::Summarizer;
    use serde_json::Value;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_health_reports_provider() {
        let summarizer = Summarizer::new(None, Some(Arc::new(StubGenerator::echo())));
        let app = test_app!(AppState::with_parts(summarizer, None));

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["provider"], "fallback");
        assert_eq!(body["history_configured"], false);
    }
}
