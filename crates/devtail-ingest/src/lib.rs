//! devtail Ingest - HTTP boundary for browser log batches
//!
//! Hosts the ingestion endpoint (POST, fire-and-forget batches) and serves
//! the generated client script next to it. Malformed payloads are
//! acknowledged and dropped; only an unconfigured ingestion point reports a
//! server error.

pub mod ingest;
pub mod script;

pub use ingest::ingest;
pub use script::client_script;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use devtail_core::{Options, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Shared state behind the ingestion routes.
pub struct IngestState {
    /// Active session's primary log file; `None` means not configured
    pub log_path: Option<PathBuf>,
    pub excludes: Vec<String>,
    pub script: String,
}

impl IngestState {
    pub fn new(log_path: Option<PathBuf>, options: &Options) -> Self {
        Self {
            log_path,
            excludes: options.excludes.clone(),
            script: client_script(options),
        }
    }
}

/// Build the router: POST `<endpoint>` ingests a batch, GET `<endpoint>.js`
/// serves the client script. Non-POST requests to the ingestion route get a
/// method-not-allowed status from the method router.
pub fn router(state: Arc<IngestState>, endpoint: &str) -> Router {
    let script_route = format!("{}.js", endpoint);
    Router::new()
        .route(endpoint, post(ingest_batch))
        .route(&script_route, get(client_js))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve the ingestion router until the process exits.
pub async fn serve(addr: &str, endpoint: &str, state: Arc<IngestState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Ingestion endpoint on http://{}{}", addr, endpoint);
    axum::serve(listener, router(state, endpoint)).await?;
    Ok(())
}

async fn ingest_batch(State(state): State<Arc<IngestState>>, body: Bytes) -> StatusCode {
    let Some(log_path) = &state.log_path else {
        return StatusCode::INTERNAL_SERVER_ERROR;
    };
    match ingest::ingest(&body, log_path, &state.excludes) {
        Ok(appended) => debug!("Batch accepted, {} entries appended", appended),
        Err(e) => warn!("Failed to append batch: {}", e),
    }
    StatusCode::NO_CONTENT
}

async fn client_js(State(state): State<Arc<IngestState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript")],
        state.script.clone(),
    )
}
