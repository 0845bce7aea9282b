use serde::{Deserialize, Serialize};

/// The document the host currently has open: its filename-like identifier
/// and its full text.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ActiveDocument {
    pub name: String,
    pub content: String,
}

/// Payload for the sync routes. `document` is absent when the host has no
/// active document, which the service renders as a placeholder rather than
/// an error.
#[derive(Serialize, Deserialize, Debug)]
pub struct SyncDocumentRequest {
    pub document: Option<ActiveDocument>,
}
