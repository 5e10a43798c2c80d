//! tubesum HTTP server
//!
//! actix-web REST API: `/health`, `/transcribe`, `/summarize`

pub mod error;
pub mod routes;
pub mod state;
pub mod types;
pub mod workflow;

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tubesum_common::{AppConfig, Result};

pub use state::AppState;
pub use workflow::{SummarizeResult, TranscribeResult, VideoWorkflow, WorkflowError};

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = web::Data::new(AppState::new(config)?);

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors())
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
