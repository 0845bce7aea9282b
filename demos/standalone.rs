use axum::Router;
use chrono::Local;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use time_sync_util::{
    helpers::{sync::HttpTransport, vault},
    SettingsStore, SyncService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting time sync service example");

    // Load configuration, merging any persisted settings over the defaults
    let store = SettingsStore::new("time-sync.toml");
    let config = store.load()?;

    // Today's daily note, if it exists, is the document a host would hand us
    let note_name = format!("{}.md", Local::now().format("%Y-%m-%d"));
    match vault::read_document(&note_name)? {
        Some(document) => info!(
            "Found today's note '{}' ({} bytes)",
            document.name,
            document.content.len()
        ),
        None => info!("No note named '{}' next to the binary", note_name),
    }

    // Create the sync service
    let transport = Arc::new(HttpTransport::new()?);
    let sync_service = SyncService::new(transport, config);

    // Create router with the sync service
    let app = Router::new()
        .nest("/api/time-sync", sync_service.router())
        .route("/health", axum::routing::get(|| async { "OK" }));

    // Start server
    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    info!("Server running on http://0.0.0.0:3000");

    axum::serve(listener, app).await?;

    Ok(())
}

/*
Example usage of the service:

1. POST /api/time-sync/sync-document
   - Body: {"document": {"name": "2024-01-15.md", "content": "..."}}
   - Extracts the time-entry rows, submits them to the configured
     service, and returns one serialized entry per line
   - {"document": null} returns the "empty" placeholder

2. POST /api/time-sync/sync-preview
   - Same body; renders what would be sent without submitting

Configure the target in time-sync.toml:

    service_url = "https://redmine.example.com/time_entries"
    service_token = "abc123"

The token is sent exactly as stored in an `Authorization: Basic` header.
*/
