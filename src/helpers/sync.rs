use async_trait::async_trait;
use reqwest::{header, Client};
use thiserror::Error;
use tracing::{error, info};

use crate::config::SyncConfig;
use crate::models::entry::TimeEntry;

/// Errors surfaced by a submission attempt. A failed submission never
/// produces a report.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The request never reached the service, or the response could not be
    /// read.
    #[error("failed to reach time service: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("time service returned status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Entry serialization failed.
    #[error("failed to serialize time entries: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One outbound submission, fully assembled.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub url: String,
    pub authorization: String,
    pub body: String,
}

/// Whatever the service answered, success or not.
#[derive(Debug, Clone)]
pub struct SyncResponse {
    pub status: u16,
    pub body: String,
}

/// Transport seam for the time-tracking service. The core issues exactly
/// one POST per sync through this; tests substitute their own
/// implementation.
#[async_trait]
pub trait SyncTransport: Send + Sync {
    async fn post(&self, request: SyncRequest) -> Result<SyncResponse, SyncError>;
}

/// reqwest-backed transport used outside of tests.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, SyncError> {
        match Client::builder().build() {
            Ok(client) => Ok(Self { client }),
            Err(e) => {
                error!("Failed to build HTTP client: {}", e);
                Err(SyncError::Transport(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl SyncTransport for HttpTransport {
    async fn post(&self, request: SyncRequest) -> Result<SyncResponse, SyncError> {
        let auth = match header::HeaderValue::from_str(&request.authorization) {
            Ok(value) => {
                let mut val = value;
                val.set_sensitive(true);
                val
            }
            Err(e) => {
                error!("Failed to create Authorization header value: {}", e);
                return Err(SyncError::Transport(e.to_string()));
            }
        };

        info!("Posting {} bytes to {}", request.body.len(), request.url);

        let response = self
            .client
            .post(&request.url)
            .header(header::AUTHORIZATION, auth)
            .header(header::CONTENT_TYPE, "application/json")
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to time service: {}", e);
                SyncError::Transport(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read response body: {}", e);
            SyncError::Transport(e.to_string())
        })?;

        Ok(SyncResponse { status, body })
    }
}

/// Serialize `entries`, POST them once to the configured endpoint and, on
/// success, return the report text: one serialized entry per line, in the
/// order they were extracted.
///
/// The token is sent exactly as stored, prefixed with `Basic `; the
/// service expects a preformatted credential.
pub async fn submit(
    transport: &dyn SyncTransport,
    entries: &[TimeEntry],
    config: &SyncConfig,
) -> Result<String, SyncError> {
    let body = serde_json::to_string(entries)?;

    info!(
        "Submitting {} time entries to {}",
        entries.len(),
        config.service_url
    );

    let request = SyncRequest {
        url: config.service_url.clone(),
        authorization: format!("Basic {}", config.service_token),
        body,
    };

    let response = transport.post(request).await?;

    if !(200..300).contains(&response.status) {
        error!(
            "Time service rejected submission with status {}: {}",
            response.status, response.body
        );
        return Err(SyncError::Rejected {
            status: response.status,
            body: response.body,
        });
    }

    info!("Time service accepted {} entries", entries.len());
    render_report(entries)
}

/// Render what was (or would be) sent, one JSON line per entry.
pub fn render_report(entries: &[TimeEntry]) -> Result<String, SyncError> {
    let mut report = String::new();
    for entry in entries {
        report.push_str(&serde_json::to_string(entry)?);
        report.push('\n');
    }
    Ok(report)
}
