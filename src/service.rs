use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    config::SyncConfig,
    helpers::{
        extract::extract,
        sync::{render_report, submit, SyncError, SyncTransport},
    },
    models::document::{ActiveDocument, SyncDocumentRequest},
};

/// The main sync service: extracts time entries from the active document
/// and forwards them to the configured time-tracking service
#[derive(Clone)]
pub struct SyncService {
    pub transport: Arc<dyn SyncTransport>,
    pub config: SyncConfig,
}

impl SyncService {
    /// Create a new sync service instance
    pub fn new(transport: Arc<dyn SyncTransport>, config: SyncConfig) -> Self {
        info!("Creating new SyncService instance");
        Self { transport, config }
    }

    /// Create an Axum router for the sync service
    pub fn router(self) -> Router {
        info!("Creating sync service router");
        let shared_state = Arc::new(self);

        Router::new()
            .route("/sync-document", post(sync_document))
            .route("/sync-preview", post(sync_preview))
            .with_state(shared_state)
    }

    /// Run one sync: extract the entries from the document, submit them,
    /// and return the report of what was sent.
    ///
    /// No active document renders the "empty" placeholder instead of
    /// erroring. Zero extracted entries still submits (an empty list) and
    /// renders an empty report.
    pub async fn sync_document(
        &self,
        document: Option<ActiveDocument>,
    ) -> Result<String, SyncError> {
        let Some(document) = document else {
            info!("No active document, nothing to sync");
            return Ok("empty".to_string());
        };

        let extraction = extract(&document.content, &document.name);
        if !extraction.skipped.is_empty() {
            warn!(
                "{} malformed rows in '{}' were skipped",
                extraction.skipped.len(),
                document.name
            );
        }

        submit(self.transport.as_ref(), &extraction.entries, &self.config).await
    }

    /// Render what a sync of this document would send, without touching
    /// the network.
    pub fn preview_document(&self, document: Option<ActiveDocument>) -> Result<String, SyncError> {
        let Some(document) = document else {
            return Ok("empty".to_string());
        };

        let extraction = extract(&document.content, &document.name);
        render_report(&extraction.entries)
    }
}

// Route handlers
async fn sync_document(
    State(service): State<Arc<SyncService>>,
    Json(payload): Json<SyncDocumentRequest>,
) -> String {
    info!("Received sync request");

    match service.sync_document(payload.document).await {
        Ok(report) => {
            info!("Sync completed");
            report
        }
        Err(e) => {
            error!("Failed to sync time entries: {}", e);
            format!("Error syncing time entries: {}", e)
        }
    }
}

async fn sync_preview(
    State(service): State<Arc<SyncService>>,
    Json(payload): Json<SyncDocumentRequest>,
) -> String {
    info!("Received preview request");

    match service.preview_document(payload.document) {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to render preview: {}", e);
            format!("Error rendering preview: {}", e)
        }
    }
}
