//! LectureLens HTTP Server
//!
//! Actix-web REST API: summarize, history and health routes

use actix_web::{web, App, HttpServer};
use lecturelens_common::{AppConfig, Result};
use tracing::info;
use tracing_actix_web::TracingLogger;

#[cfg(test)]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap(crate::cors::allow_any_origin())
                .configure(crate::routes::configure),
        )
        .await
    };
}

pub mod cors;
pub mod error;
pub mod history;
pub mod routes;
pub mod state;
pub mod types;

pub use error::ApiError;
pub use history::{HistoryStore, SupabaseHistoryStore};
pub use state::AppState;

/// Build state from `config` and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = web::Data::new(AppState::new(&config)?);

    info!(
        "Summarization provider: {}, history store: {}",
        state.summarizer.choice().as_str(),
        if state.history.is_some() { "configured" } else { "not configured" }
    );
    info!("Server listening on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors::allow_any_origin())
            .wrap(TracingLogger::default())
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
